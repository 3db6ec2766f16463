use du_types::SourceUnit;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/* A declaration manifest loaded from disk */
#[derive(Debug, Clone)]
pub struct SourceFile {
    /* Path the manifest was loaded from */
    pub path: PathBuf,

    /* Parsed compilation unit */
    pub unit: SourceUnit,
}

impl SourceFile {
    /* Read and parse a manifest */
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /* Parse manifest text that claims to come from `path` */
    pub fn parse(path: &Path, text: &str) -> Result<Self, LoadError> {
        let unit = SourceUnit::from_yaml(text).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            unit,
        })
    }

    /* Logical C# file name, falling back to the manifest path */
    pub fn display_name(&self) -> String {
        match &self.unit.source.path {
            Some(path) => path.clone(),
            None => self.path.display().to_string(),
        }
    }

    /* Get the imports */
    pub fn imports(&self) -> &[String] {
        &self.unit.source.imports
    }
}
