use std::path::{Path, PathBuf};

use crate::service::mime::file_extension;

/// A file handed over by the front end for one conversion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
}

impl UploadedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UploadedFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercase extension including the dot, or an empty string.
    pub fn extension(&self) -> String {
        file_extension(&self.path)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string())
    }
}

#[derive(Clone)]
pub struct FileCollectInput {
    pub input_path: PathBuf,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_size: Option<f64>,
}

#[derive(Debug)]
pub struct FileCollectOutput {
    pub files: Vec<PathBuf>,
    pub total_size: usize,
}
