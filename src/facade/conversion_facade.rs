use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{error, info, warn};
use rayon::prelude::*;

use crate::config::ports::{AppConfig, ConversionPort};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{
    ConversionInput, ConversionOutput, ConversionResult, FileOutcome, ERROR_PREFIX,
};
use crate::models::file::{FileCollectInput, UploadedFile};
use crate::models::page::PageRenderInput;
use crate::service::encoder::EncoderService;
use crate::service::file::FileService;
use crate::service::page::PageService;
use crate::service::traits::i_service::{EncoderServiceTrait, FileServiceTrait, PageServiceTrait};
use crate::utils::utils::ProgressManager;

pub struct ConversionFacade {
    file_service: Box<dyn FileServiceTrait>,
    encoder_service: Box<dyn EncoderServiceTrait>,
    page_service: Box<dyn PageServiceTrait>,
}

impl ConversionFacade {
    pub fn new(
        file_service: Box<dyn FileServiceTrait>,
        encoder_service: Box<dyn EncoderServiceTrait>,
        page_service: Box<dyn PageServiceTrait>,
    ) -> Self {
        ConversionFacade {
            file_service,
            encoder_service,
            page_service,
        }
    }

    /// Facade wired to the real filesystem.
    pub fn with_defaults() -> Self {
        ConversionFacade::new(
            Box::new(FileService::new()),
            Box::new(EncoderService::new(Box::new(FileService::new()))),
            Box::new(PageService::new()),
        )
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: ConversionInput) -> io::Result<ConversionOutput> {
        // (file, root it is named relative to)
        let mut selected: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut total_size = 0;
        for input_path in &input.inputs {
            let file_output = self.file_service.collect_files(FileCollectInput {
                input_path: input_path.clone(),
                include_patterns: input.include.clone(),
                exclude_patterns: input.exclude.clone(),
                max_size: input.max_size,
            })?;
            let root = naming_root(input_path);
            total_size += file_output.total_size;
            selected.extend(file_output.files.into_iter().map(|f| (f, root.clone())));
        }

        if selected.is_empty() {
            warn!("No files matched the given inputs and patterns");
            return Ok(ConversionOutput {
                output_path: input.output_dir.clone(),
                processed_files: 0,
                failed_files: 0,
                outcomes: Vec::new(),
            });
        }

        info!("Converting {} files into {}", selected.len(), input.output_dir);
        if !input.to_stdout {
            fs::create_dir_all(&input.output_dir)?;
        }

        let pm = ProgressManager::new(selected.len() as u64, input.no_progress || input.to_stdout);
        let encoded: Vec<(PathBuf, PathBuf, ConversionResult)> = selected
            .into_par_iter()
            .map(|(file, root)| {
                let result = self.encoder_service.convert(Some(&UploadedFile::new(file.clone())));
                pm.inc();
                (file, root, result)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(encoded.len());
        let mut failed_files = 0;
        let mut used_pages: HashSet<PathBuf> = HashSet::new();
        for (file, root, result) in encoded {
            let mut page_path = None;
            let mut write_failure = None;
            match &result {
                ConversionResult::Success { data_uri, html_snippet } if !input.to_stdout => {
                    let target = unique_page_path(
                        page_path_for(&input.output_dir, &root, &file),
                        &mut used_pages,
                    );
                    let file_size = fs::metadata(&file).map(|m| m.len() as usize).unwrap_or(0);
                    let written = self.page_service.write_page(PageRenderInput {
                        page_path: target.clone(),
                        file_name: UploadedFile::new(file.clone()).file_name(),
                        file_size,
                        data_uri: data_uri.clone(),
                        html_snippet: html_snippet.clone(),
                    });
                    match written {
                        Ok(page) => page_path = Some(page.html_file_path),
                        Err(e) => {
                            error!("Could not write page {}: {}", target.display(), e);
                            failed_files += 1;
                            write_failure = Some(ConversionResult::Failure {
                                message: format!("{}: {}", ERROR_PREFIX, e),
                            });
                        }
                    }
                }
                ConversionResult::Success { .. } => {}
                ConversionResult::Failure { message } => {
                    error!("{}: {}", file.display(), message);
                    failed_files += 1;
                }
                ConversionResult::NoFile => failed_files += 1,
            }
            let result = write_failure.unwrap_or(result);
            outcomes.push(FileOutcome { path: file, result, page_path });
        }

        let processed_files = outcomes.len() - failed_files;
        pm.finish(processed_files, failed_files, total_size);
        info!("Done: {} converted, {} failed", processed_files, failed_files);

        Ok(ConversionOutput {
            output_path: input.output_dir.clone(),
            processed_files,
            failed_files,
            outcomes,
        })
    }
}

fn naming_root(input_path: &Path) -> PathBuf {
    if input_path.is_dir() {
        input_path.to_path_buf()
    } else {
        input_path.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}

/// `<output>/<path relative to root>.html`, e.g. `output/img/cat.png.html`.
pub fn page_path_for(output_dir: &str, root: &Path, file: &Path) -> PathBuf {
    let relative = pathdiff::diff_paths(file, root)
        .filter(|p| !p.as_os_str().is_empty() && !p.starts_with(".."))
        .or_else(|| file.file_name().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("file"));
    let mut name = relative.into_os_string();
    name.push(".html");
    Path::new(output_dir).join(name)
}

/// Suffix `-1`, `-2`, ... before `.html` until the path is unused in this run.
fn unique_page_path(path: PathBuf, used: &mut HashSet<PathBuf>) -> PathBuf {
    let mut candidate = path.clone();
    let mut n = 0;
    while used.contains(&candidate) {
        n += 1;
        let stem = path.with_extension("");
        let mut name = stem.into_os_string();
        name.push(format!("-{}.html", n));
        candidate = PathBuf::from(name);
    }
    used.insert(candidate.clone());
    candidate
}

// Runs an AppConfig through the default facade
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<ConversionOutput> {
        let input = ConversionInput {
            inputs: config.inputs.iter().map(PathBuf::from).collect(),
            output_dir: config.output.clone(),
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            max_size: config.max_size,
            no_progress: config.no_progress,
            to_stdout: config.to_stdout,
        };
        ConversionFacade::with_defaults().execute_conversion(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_path_mirrors_relative_layout() {
        let path = page_path_for("out", Path::new("photos"), Path::new("photos/2024/cat.png"));
        assert_eq!(path, Path::new("out").join("2024").join("cat.png.html"));
    }

    #[test]
    fn page_path_for_single_file_uses_name() {
        let path = page_path_for("out", Path::new(""), Path::new("cat.png"));
        assert_eq!(path, Path::new("out").join("cat.png.html"));
    }

    #[test]
    fn page_path_never_escapes_output() {
        let path = page_path_for("out", Path::new("a/b"), Path::new("c/d.pdf"));
        assert_eq!(path, Path::new("out").join("d.pdf.html"));
    }

    #[test]
    fn repeated_page_paths_get_numbered() {
        let mut used = HashSet::new();
        let first = unique_page_path(PathBuf::from("out/cat.png.html"), &mut used);
        let second = unique_page_path(PathBuf::from("out/cat.png.html"), &mut used);
        let third = unique_page_path(PathBuf::from("out/cat.png.html"), &mut used);
        assert_eq!(first, PathBuf::from("out/cat.png.html"));
        assert_eq!(second, PathBuf::from("out/cat.png-1.html"));
        assert_eq!(third, PathBuf::from("out/cat.png-2.html"));
    }
}
