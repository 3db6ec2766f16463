use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::compilation::Compilation;
use crate::error::LoadError;
use crate::file::SourceFile;

/* Import resolver for loading a manifest together with the manifests it imports */
pub struct ImportResolver {
    /* Track loaded files to skip duplicates and break import cycles */
    loaded_files: HashSet<PathBuf>,

    /* Include directories for searching imports */
    include_dirs: Vec<PathBuf>,

    /* All loaded files, in load order */
    files: Vec<SourceFile>,
}

impl ImportResolver {
    /* Create a new import resolver with the given include directories */
    pub fn new(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            loaded_files: HashSet::new(),
            include_dirs,
            files: Vec::new(),
        }
    }

    /* Resolve an import path relative to a base file or include directories */
    fn resolve_import_path(&self, import_path: &str, base_file: &Path) -> Result<PathBuf, LoadError> {
        /* First try relative to the base file's directory */
        if let Some(parent) = base_file.parent() {
            let relative_path = parent.join(import_path);
            if relative_path.exists() {
                return Ok(relative_path);
            }
        }

        /* Then try each include directory */
        for include_dir in &self.include_dirs {
            let include_path = include_dir.join(import_path);
            if include_path.exists() {
                return Ok(include_path);
            }
        }

        Err(LoadError::ImportNotFound {
            import: import_path.to_string(),
            base: base_file.to_path_buf(),
        })
    }

    /* Load a manifest and recursively load its imports */
    pub fn load_file_with_imports(&mut self, file_path: &Path) -> Result<(), LoadError> {
        /* Canonicalize the path to detect duplicates */
        let canonical_path = file_path.canonicalize().map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;

        if self.loaded_files.contains(&canonical_path) {
            tracing::debug!("skipping already loaded file: {}", file_path.display());
            return Ok(());
        }

        /* Mark as loaded before processing imports so cycles terminate */
        self.loaded_files.insert(canonical_path);

        let file = SourceFile::load(file_path)?;
        tracing::debug!(
            "loaded {} ({} import(s))",
            file_path.display(),
            file.imports().len()
        );

        let imports: Vec<String> = file.imports().to_vec();
        self.files.push(file);

        for import in &imports {
            let import_path = self.resolve_import_path(import, file_path)?;
            self.load_file_with_imports(&import_path)?;
        }

        Ok(())
    }

    /* Number of manifests loaded so far (including imports) */
    pub fn loaded_file_count(&self) -> usize {
        self.files.len()
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /* Finish loading and hand the files to a compilation */
    pub fn into_compilation(self) -> Compilation {
        Compilation::new(self.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_imports_once() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("root.du.yaml"),
            "source:\n  imports: [common.du.yaml, other.du.yaml]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("other.du.yaml"),
            "source:\n  imports: [common.du.yaml]\n",
        )
        .unwrap();
        fs::write(dir.path().join("common.du.yaml"), "usings: [\"using System;\"]\n").unwrap();

        let mut resolver = ImportResolver::new(Vec::new());
        resolver
            .load_file_with_imports(&dir.path().join("root.du.yaml"))
            .unwrap();

        assert_eq!(resolver.loaded_file_count(), 3);
        let names: Vec<String> = resolver
            .files()
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["root.du.yaml", "common.du.yaml", "other.du.yaml"]);
    }

    #[test]
    fn searches_include_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let include = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("root.du.yaml"),
            "source:\n  imports: [shared.du.yaml]\n",
        )
        .unwrap();
        fs::write(include.path().join("shared.du.yaml"), "types: []\n").unwrap();

        let mut resolver = ImportResolver::new(vec![include.path().to_path_buf()]);
        resolver
            .load_file_with_imports(&dir.path().join("root.du.yaml"))
            .unwrap();
        assert_eq!(resolver.loaded_file_count(), 2);
    }

    #[test]
    fn missing_import_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("root.du.yaml"),
            "source:\n  imports: [nowhere.du.yaml]\n",
        )
        .unwrap();

        let mut resolver = ImportResolver::new(Vec::new());
        let err = resolver
            .load_file_with_imports(&dir.path().join("root.du.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::ImportNotFound { .. }));
    }
}
