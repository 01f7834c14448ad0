use std::path::PathBuf;

use crate::error::ConversionError;

/// Text shown in the Data URI slot when no file is selected.
pub const UPLOAD_PROMPT: &str = "Vui lòng tải lên một tệp.";

/// Prefix of the message shown in the Data URI slot when a conversion fails.
pub const ERROR_PREFIX: &str = "Đã xảy ra lỗi";

/// Outcome of one encoder call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    NoFile,
    Success { data_uri: String, html_snippet: String },
    Failure { message: String },
}

impl ConversionResult {
    pub fn from_error(err: &ConversionError) -> Self {
        ConversionResult::Failure {
            message: format!("{}: {}", ERROR_PREFIX, err),
        }
    }

    /// The pair of texts displayed by the front end: (Data URI slot, HTML slot).
    pub fn outputs(&self) -> (String, String) {
        match self {
            ConversionResult::NoFile => (UPLOAD_PROMPT.to_string(), String::new()),
            ConversionResult::Success { data_uri, html_snippet } => {
                (data_uri.clone(), html_snippet.clone())
            }
            ConversionResult::Failure { message } => (message.clone(), String::new()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConversionInput {
    pub inputs: Vec<PathBuf>,
    pub output_dir: String,
    pub include: Vec<String>,
    pub exclude: Option<Vec<String>>,
    pub max_size: Option<f64>,
    pub no_progress: bool,
    pub to_stdout: bool,
}

/// What happened to one collected file in a batch run.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: ConversionResult,
    /// Preview page written for it, if any.
    pub page_path: Option<String>,
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub output_path: String,
    pub processed_files: usize,
    pub failed_files: usize,
    pub outcomes: Vec<FileOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn no_file_outputs_prompt_and_empty_snippet() {
        assert_eq!(
            ConversionResult::NoFile.outputs(),
            ("Vui lòng tải lên một tệp.".to_string(), String::new())
        );
    }

    #[test]
    fn failure_message_goes_to_first_slot() {
        let err = ConversionError::Read {
            path: PathBuf::from("a.png"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let (first, second) = ConversionResult::from_error(&err).outputs();
        assert!(first.starts_with("Đã xảy ra lỗi: "));
        assert!(first.contains("denied"));
        assert!(second.is_empty());
    }
}
