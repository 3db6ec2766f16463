/* Emission sinks: where generated sources go */

use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("generated file name '{0}' was emitted twice")]
    DuplicateFileName(String),
}

pub trait EmissionSink {
    fn add_source(&mut self, file_name: &str, text: &str) -> Result<(), EmitError>;
}

/* Writes each source into an output directory, creating it on first use */
#[derive(Debug)]
pub struct DirectorySink {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl EmissionSink for DirectorySink {
    fn add_source(&mut self, file_name: &str, text: &str) -> Result<(), EmitError> {
        let path = self.output_dir.join(file_name);
        if self.written.contains(&path) {
            return Err(EmitError::DuplicateFileName(file_name.to_string()));
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| EmitError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        std::fs::write(&path, text).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

/* Keeps sources in memory, in emission order */
#[derive(Debug, Default)]
pub struct MemorySink {
    sources: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.sources.get(file_name).map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn into_sources(self) -> IndexMap<String, String> {
        self.sources
    }
}

impl EmissionSink for MemorySink {
    fn add_source(&mut self, file_name: &str, text: &str) -> Result<(), EmitError> {
        if self.sources.contains_key(file_name) {
            return Err(EmitError::DuplicateFileName(file_name.to_string()));
        }
        self.sources.insert(file_name.to_string(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order_and_rejects_duplicates() {
        let mut sink = MemorySink::new();
        sink.add_source("B.g.cs", "b").unwrap();
        sink.add_source("A.g.cs", "a").unwrap();
        assert_eq!(sink.file_names().collect::<Vec<_>>(), vec!["B.g.cs", "A.g.cs"]);
        assert_eq!(sink.get("A.g.cs"), Some("a"));
        assert!(matches!(
            sink.add_source("A.g.cs", "again"),
            Err(EmitError::DuplicateFileName(_))
        ));
    }

    #[test]
    fn directory_sink_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("generated");
        let mut sink = DirectorySink::new(&out);
        sink.add_source("Shape.g.cs", "// text\n").unwrap();

        assert_eq!(std::fs::read_to_string(out.join("Shape.g.cs")).unwrap(), "// text\n");
        assert_eq!(sink.written().len(), 1);
    }
}
