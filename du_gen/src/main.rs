use clap::{Parser, Subcommand, ValueEnum};
use du_gen::cmds;
use du_gen::cmds::analyze::ModelOutputFormat;
use du_gen::ReferenceStyle;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "du-gen")]
#[command(about = "Discriminated union source generator for C#", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate C# sources for every marked declaration */
    Generate {
        /* Input YAML manifests describing C# declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported manifests */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Output directory for generated sources */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /* How reference-type unions expose cases to Match handlers */
        #[arg(long = "style", value_enum, default_value = "capability")]
        style: Style,

        /* Do not emit the marker attribute source */
        #[arg(long = "no-attribute")]
        no_attribute: bool,

        /* Print generated sources instead of writing them */
        #[arg(long = "dry-run")]
        dry_run: bool,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Show the union models extracted from manifests */
    Analyze {
        /* Input YAML manifests describing C# declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Include directories for imported manifests */
        #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
        include_dirs: Vec<PathBuf>,

        /* Print the extracted models */
        #[arg(long = "print-model")]
        print_model: bool,

        /* Format to use when printing models */
        #[arg(long = "format", value_enum, default_value = "json")]
        format: ModelOutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Style {
    /* Handlers receive a per-case interface */
    Capability,
    /* Handlers receive the stored values */
    Flat,
}

impl From<Style> for ReferenceStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Capability => ReferenceStyle::Capability,
            Style::Flat => ReferenceStyle::Flat,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            files,
            include_dirs,
            output_dir,
            style,
            no_attribute,
            dry_run,
            verbose,
        } => {
            cmds::generate::run(
                files,
                include_dirs,
                output_dir,
                style.into(),
                !no_attribute,
                dry_run,
                verbose,
            )?;
        }

        Commands::Analyze {
            files,
            include_dirs,
            print_model,
            format,
        } => {
            cmds::analyze::run(files, include_dirs, print_model, format)?;
        }
    }

    Ok(())
}
