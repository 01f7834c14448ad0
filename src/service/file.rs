use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use log::{debug, warn};
use regex::RegexSet;
use walkdir::WalkDir;

use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::create_regex_sets;

pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let (data, _) = read_file_content(path)?;
        Ok(data)
    }

    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput> {
        let (include_set, exclude_set) = create_regex_sets(
            &input.include_patterns,
            input.exclude_patterns.as_deref().unwrap_or(&[]),
        );
        let mut files = Vec::new();
        collect_files(&input.input_path, &mut files, &include_set, &exclude_set, input.max_size)?;

        let mut total_size = 0;
        for file_path in &files {
            total_size += fs::metadata(file_path)?.len() as usize;
        }
        debug!("Collected {} files from {}", files.len(), input.input_path.display());

        Ok(FileCollectOutput { files, total_size })
    }
}

pub fn read_file_content(file_path: &Path) -> io::Result<(Vec<u8>, usize)> {
    let mut file = File::open(file_path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    let file_size = buffer.len();
    Ok((buffer, file_size))
}

/// Patterns are matched against the file name only.
pub fn is_file_valid(
    path: &Path,
    include_set: &RegexSet,
    exclude_set: &RegexSet,
    max_size: Option<f64>,
) -> io::Result<bool> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if !include_set.is_match(&file_name) || exclude_set.is_match(&file_name) {
        return Ok(false);
    }
    within_size_limit(path, max_size)
}

pub fn within_size_limit(path: &Path, max_size: Option<f64>) -> io::Result<bool> {
    if let Some(max) = max_size {
        let file_size = fs::metadata(path)?.len() as f64 / 1_048_576.0;
        if file_size > max {
            warn!("Skipping {}: {:.2} MB exceeds the {} MB limit", path.display(), file_size, max);
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn collect_files(
    path: &Path,
    files: &mut Vec<PathBuf>,
    include_set: &RegexSet,
    exclude_set: &RegexSet,
    max_size: Option<f64>,
) -> io::Result<()> {
    if path.is_file() {
        // An explicitly named file only has to respect the size limit.
        if within_size_limit(path, max_size)? {
            files.push(path.to_path_buf());
        }
        return Ok(());
    }

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", path.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file()
            && is_file_valid(entry.path(), include_set, exclude_set, max_size)?
        {
            files.push(entry.into_path());
        }
    }
    Ok(())
}
