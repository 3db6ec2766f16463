//! Error types for manifest loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading declaration manifests
#[derive(Error, Debug)]
pub enum LoadError {
    /// The manifest could not be read from disk
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid YAML for a source unit
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    /// An import could not be located
    #[error("import '{import}' not found relative to '{}' or in include directories", base.display())]
    ImportNotFound { import: String, base: PathBuf },
}
