/* Pipeline driver: candidates -> models -> source text -> sink.

   Candidates are independent. A candidate that yields no model contributes
   nothing; a cancelled run stops before rendering the next candidate. */

use du_loader::{Candidate, CancellationToken, Compilation, SemanticModel};

use crate::attribute::{ATTRIBUTE_FILE_NAME, ATTRIBUTE_SOURCE};
use crate::model::DiscriminatedUnionTypeInfo;
use crate::options::GeneratorOptions;
use crate::parser;
use crate::render;
use crate::sink::{EmissionSink, EmitError};

/* Outcome of one generation run */
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /* File names handed to the sink, in order */
    pub generated: Vec<String>,
    pub skipped: usize,
    pub cancelled: bool,
}

pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /* Every union model in the compilation, in candidate order */
    pub fn models(&self, compilation: &Compilation) -> Vec<DiscriminatedUnionTypeInfo> {
        let semantic = SemanticModel::new(compilation);
        compilation
            .candidates()
            .iter()
            .filter_map(|candidate| parser::parse(candidate, &semantic))
            .collect()
    }

    /* File name and text for one candidate, if it describes a union */
    pub fn generate_one(
        &self,
        candidate: &Candidate<'_>,
        semantic: &SemanticModel<'_>,
    ) -> Option<(String, String)> {
        let info = parser::parse(candidate, semantic)?;
        Some((info.file_name(), render::render(&info, &self.options)))
    }

    pub fn run(
        &self,
        compilation: &Compilation,
        sink: &mut dyn EmissionSink,
        token: &CancellationToken,
    ) -> Result<GenerationReport, EmitError> {
        let mut report = GenerationReport::default();

        if self.options.emit_attribute {
            sink.add_source(ATTRIBUTE_FILE_NAME, ATTRIBUTE_SOURCE)?;
            report.generated.push(ATTRIBUTE_FILE_NAME.to_string());
        }

        let semantic = SemanticModel::new(compilation);
        for candidate in compilation.candidates() {
            let Some(info) = parser::parse(&candidate, &semantic) else {
                report.skipped += 1;
                continue;
            };

            if token.is_cancelled() {
                tracing::info!("generation cancelled before {}", info.unique_name);
                report.cancelled = true;
                break;
            }

            let file_name = info.file_name();
            let text = render::render(&info, &self.options);
            tracing::debug!(
                "rendered {} ({} case(s), {} layout)",
                file_name,
                info.cases.len(),
                if info.declaration.is_value_type { "value" } else { "reference" }
            );

            sink.add_source(&file_name, &text)?;
            report.generated.push(file_name);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use du_loader::SourceFile;
    use std::path::PathBuf;

    const SHAPES: &str = r#"
namespaces:
  - name: Demo
    types:
      - name: Shape
        keyword: record
        modifiers: [public, abstract, partial]
        attributes: [DiscriminatedUnion]
        members:
          - method:
              name: Dot
              modifiers: [public, static, partial]
              return-type: Shape
      - name: Inert
        keyword: record
        modifiers: [public, partial]
        attributes: [DiscriminatedUnion]
"#;

    fn compilation() -> Compilation {
        let file = SourceFile::parse(&PathBuf::from("shapes.du.yaml"), SHAPES).unwrap();
        Compilation::new(vec![file])
    }

    #[test]
    fn emits_attribute_and_unions() {
        let compilation = compilation();
        let mut sink = MemorySink::new();
        let report = Generator::new(GeneratorOptions::default())
            .run(&compilation, &mut sink, &CancellationToken::new())
            .unwrap();

        assert_eq!(report.generated, vec![ATTRIBUTE_FILE_NAME, "Demo.Shape.g.cs"]);
        assert_eq!(report.skipped, 1);
        assert!(!report.cancelled);
        assert!(sink.get("Demo.Shape.g.cs").unwrap().starts_with("// <auto-generated />"));
    }

    #[test]
    fn attribute_can_be_disabled() {
        let compilation = compilation();
        let mut sink = MemorySink::new();
        let options = GeneratorOptions {
            emit_attribute: false,
            ..GeneratorOptions::default()
        };
        Generator::new(options)
            .run(&compilation, &mut sink, &CancellationToken::new())
            .unwrap();
        assert_eq!(sink.file_names().collect::<Vec<_>>(), vec!["Demo.Shape.g.cs"]);
    }

    #[test]
    fn generate_one_skips_inert_declarations() {
        let compilation = compilation();
        let semantic = SemanticModel::new(&compilation);
        let generator = Generator::new(GeneratorOptions::default());
        let candidates = compilation.candidates();

        let (file_name, text) = generator.generate_one(&candidates[0], &semantic).unwrap();
        assert_eq!(file_name, "Demo.Shape.g.cs");
        assert!(text.contains("public static partial global::Demo.Shape Dot() =>"));
        assert!(generator.generate_one(&candidates[1], &semantic).is_none());
    }

    #[test]
    fn cancelled_run_renders_nothing() {
        let compilation = compilation();
        let token = CancellationToken::new();
        token.cancel();
        let mut sink = MemorySink::new();
        let report = Generator::new(GeneratorOptions::default())
            .run(&compilation, &mut sink, &token)
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(sink.len(), 1);
        assert!(sink.get("Demo.Shape.g.cs").is_none());
    }
}
