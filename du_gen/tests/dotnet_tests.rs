/* End-to-end check: generated sources compile and behave under the .NET SDK.
 *
 * Ignored by default since it needs `dotnet` on PATH and network access for
 * the first restore. Run with `cargo test -- --ignored`.
 */

use du_gen::{DirectorySink, GeneratorOptions, Generator};
use du_loader::{CancellationToken, ImportResolver};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const EXPECTED_OUTPUT: &str = "\
dot
Dot()
square 2
Square(Length=2)
rectangle 2x3.5
Rectangle(Length=2, Width=3.5)
ok 42
error boom
0
Dot()
12
Rectangle(Length=3, Width=4)
15
AlternativeTriangle(BaseWidth=5, Height=6, ApexAngle=0.5)
fine
Failure(Error=bad)
";

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/* Copy the C# project, generate into it, and return `dotnet run` stdout */
fn build_and_run(project_dir: &Path) -> Result<String, String> {
    for file in ["Demo.csproj", "Declarations.cs", "Program.cs"] {
        fs::copy(fixtures().join("dotnet").join(file), project_dir.join(file))
            .map_err(|e| format!("Failed to copy {}: {}", file, e))?;
    }

    let mut resolver = ImportResolver::new(Vec::new());
    resolver
        .load_file_with_imports(&fixtures().join("shapes.du.yaml"))
        .map_err(|e| format!("Failed to load manifest: {}", e))?;
    let compilation = resolver.into_compilation();

    let mut sink = DirectorySink::new(project_dir.join("Generated"));
    Generator::new(GeneratorOptions::default())
        .run(&compilation, &mut sink, &CancellationToken::new())
        .map_err(|e| format!("Generation failed: {}", e))?;

    let output = Command::new("dotnet")
        .arg("run")
        .arg("--project")
        .arg(project_dir.join("Demo.csproj"))
        .output()
        .map_err(|e| format!("Failed to run dotnet: {}", e))?;

    if !output.status.success() {
        return Err(format!(
            "dotnet run failed:\n{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).replace("\r\n", "\n"))
}

#[test]
#[ignore] /* requires the .NET 8 SDK */
fn test_generated_code_compiles_and_runs() {
    let dir = tempfile::tempdir().unwrap();
    match build_and_run(dir.path()) {
        Ok(stdout) => assert_eq!(stdout, EXPECTED_OUTPUT),
        Err(e) => panic!("{}", e),
    }
}
