/* Generate command - emit C# sources for every discriminated union */

use super::common::load_compilation;
use crate::generator::Generator;
use crate::options::{GeneratorOptions, ReferenceStyle};
use crate::sink::{DirectorySink, MemorySink};
use du_loader::CancellationToken;
use std::path::PathBuf;

/* Execute the generate command */
pub fn run(
    files: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    output_dir: PathBuf,
    reference_style: ReferenceStyle,
    emit_attribute: bool,
    dry_run: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        println!("Discriminated Union Generator");
        println!("=============================\n");
        println!("[~] Configuration:");
        println!("  Reference style: {:?}", reference_style);
        println!("  Marker attribute: {}", if emit_attribute { "emit" } else { "skip" });
        if dry_run {
            println!("  Output: dry run (stdout)");
        } else {
            println!("  Output directory: {}", output_dir.display());
        }
        println!("  Input files: {}", files.len());
        for file in &files {
            println!("    - {}", file.display());
        }
        println!();
    }

    let compilation = load_compilation(&files, &include_dirs, verbose)?;

    let options = GeneratorOptions {
        reference_style,
        emit_attribute,
    };
    let generator = Generator::new(options);
    let token = CancellationToken::new();

    let report = if dry_run {
        let mut sink = MemorySink::new();
        let report = generator.run(&compilation, &mut sink, &token)?;
        for (file_name, text) in sink.into_sources() {
            println!("// ===== {} =====", file_name);
            print!("{}", text);
            println!();
        }
        report
    } else {
        let mut sink = DirectorySink::new(&output_dir);
        generator.run(&compilation, &mut sink, &token)?
    };

    if verbose {
        for file_name in &report.generated {
            println!("[✓] {}", file_name);
        }
        if report.skipped > 0 {
            println!("[~] Skipped {} marked declaration(s) without cases", report.skipped);
        }
    }
    if !dry_run {
        println!(
            "[✓] Generated {} file(s) in {}",
            report.generated.len(),
            output_dir.display()
        );
    }

    Ok(())
}
