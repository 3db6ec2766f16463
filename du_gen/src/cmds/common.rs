/* Common utilities shared between analyze and generate commands */

use du_loader::{Compilation, ImportResolver};
use std::path::PathBuf;

/* Load every input manifest together with its imports */
pub fn load_compilation(
    files: &[PathBuf],
    include_dirs: &[PathBuf],
    verbose: bool,
) -> anyhow::Result<Compilation> {
    let mut resolver = ImportResolver::new(include_dirs.to_vec());

    if verbose {
        println!("[~] Loading manifests and resolving imports...");
        if !include_dirs.is_empty() {
            println!("    Include directories:");
            for dir in include_dirs {
                println!("      - {}", dir.display());
            }
        }
    }

    for file in files {
        resolver.load_file_with_imports(file)?;
    }

    if verbose {
        println!(
            "[~] Loaded {} manifest(s) total (including imports)",
            resolver.loaded_file_count()
        );
        for file in resolver.files() {
            println!("    - {}", file.display_name());
        }
        println!();
    }

    Ok(resolver.into_compilation())
}
