/* Analyze command - show the union models extracted from manifests */

use super::common::load_compilation;
use crate::generator::Generator;
use crate::model::DiscriminatedUnionTypeInfo;
use crate::options::GeneratorOptions;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModelOutputFormat {
    Json,
    Yaml,
}

/* Execute the analyze command */
pub fn run(
    files: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    print_model: bool,
    format: ModelOutputFormat,
) -> anyhow::Result<()> {
    println!("Discriminated Union Generator - Analysis Tool");
    println!("=============================================\n");

    let compilation = load_compilation(&files, &include_dirs, true)?;
    let candidates = compilation.candidates().len();
    let models = Generator::new(GeneratorOptions::default()).models(&compilation);

    println!("[~] Marked declarations: {}", candidates);
    println!("[~] Unions with cases: {}", models.len());
    if candidates > models.len() {
        println!(
            "[~] Skipped (unresolved or without cases): {}",
            candidates - models.len()
        );
    }

    for model in &models {
        print_union_summary(model);
    }

    if print_model {
        print_models(&models, format)?;
    }

    Ok(())
}

fn print_union_summary(model: &DiscriminatedUnionTypeInfo) {
    let layout = if model.declaration.is_value_type {
        "value"
    } else {
        "reference"
    };
    println!("\n[~] {} -> {}", model.unique_name, model.file_name());
    println!("    Layout: {}", layout);
    for header in &model.declaration.type_headers {
        println!("    Header: {}", header);
    }
    for case in &model.cases {
        let parameters: Vec<String> = case
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect();
        println!(
            "      - {}({})  handler: {}",
            case.name,
            parameters.join(", "),
            case.name_as_argument
        );
    }
    if !model.generate_to_string {
        println!("    ToString: user-defined");
    }
}

fn print_models(models: &[DiscriminatedUnionTypeInfo], format: ModelOutputFormat) -> anyhow::Result<()> {
    match format {
        ModelOutputFormat::Json => {
            println!("\n[~] Union Models (JSON)");
            println!("======================");
            println!("{}", serde_json::to_string_pretty(models)?);
        }
        ModelOutputFormat::Yaml => {
            println!("\n[~] Union Models (YAML)");
            println!("======================");
            print!("{}", serde_yml::to_string(models)?);
        }
    }
    Ok(())
}
