//! Failure raised while turning an uploaded file into a Data URI.
//!
//! The encoder never lets a [`ConversionError`] escape to its caller: it is
//! folded into [`crate::models::conversion::ConversionResult::Failure`] so the
//! front end can show it in the Data URI slot like any other output.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The single read-or-encode failure of the encoder, split by cause.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The uploaded file could not be read (missing, permission denied, ...).
    #[error("không đọc được tệp '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the bytes through the base64 encoder failed.
    #[error("không mã hóa được dữ liệu base64: {source}")]
    Encode {
        #[source]
        source: io::Error,
    },
}
