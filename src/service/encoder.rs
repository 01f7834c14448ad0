//! File → Data URI + embed snippet.
//!
//! The pure part ([`encode_bytes`]) maps bytes and an extension to an
//! [`EncodedFile`]. [`EncoderService`] adds the read step and folds every
//! failure into [`ConversionResult::Failure`].

use std::io::Write;
use base64::{engine::general_purpose, write::EncoderWriter};
use log::{debug, warn};

use crate::error::ConversionError;
use crate::models::conversion::ConversionResult;
use crate::models::file::UploadedFile;
use crate::service::mime::{mime_for_extension, MediaKind, MimeType};
use crate::service::traits::i_service::{EncoderServiceTrait, FileServiceTrait};

/// Payloads above this many base64 characters get a warning; browsers and
/// text widgets start to struggle with them.
const MAX_BASE64_SIZE: usize = 1_000_000;

const IMAGE_ALT: &str = "Nhúng Base64";
const DOWNLOAD_LABEL: &str = "Tải xuống Tệp (Base64 Data URI)";
const INLINE_STYLE: &str = "max-width:100%; height:auto;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub mime: MimeType,
    pub data_uri: String,
    pub html_snippet: String,
}

pub struct EncoderService {
    file_service: Box<dyn FileServiceTrait>,
}

impl EncoderService {
    pub fn new(file_service: Box<dyn FileServiceTrait>) -> Self {
        EncoderService { file_service }
    }

    fn try_convert(&self, file: &UploadedFile) -> Result<EncodedFile, ConversionError> {
        let data = self
            .file_service
            .read_file(file.path())
            .map_err(|source| ConversionError::Read {
                path: file.path.clone(),
                source,
            })?;
        debug!("Read {} bytes from {}", data.len(), file.path.display());
        encode_bytes(&data, &file.extension())
    }
}

impl EncoderServiceTrait for EncoderService {
    fn convert(&self, file: Option<&UploadedFile>) -> ConversionResult {
        let Some(file) = file else {
            return ConversionResult::NoFile;
        };
        match self.try_convert(file) {
            Ok(encoded) => {
                debug!("{} encoded as {}", file.path.display(), encoded.mime.essence);
                ConversionResult::Success {
                    data_uri: encoded.data_uri,
                    html_snippet: encoded.html_snippet,
                }
            }
            Err(e) => {
                log::error!("Conversion of {} failed: {}", file.path.display(), e);
                ConversionResult::from_error(&e)
            }
        }
    }
}

/// Encode `data` for a file with extension `ext` (lowercase, dot included).
pub fn encode_bytes(data: &[u8], ext: &str) -> Result<EncodedFile, ConversionError> {
    let mime = mime_for_extension(ext);
    let payload = encode_to_base64(data)?;
    let data_uri = build_data_uri(&mime, &payload);
    let html_snippet = build_html_snippet(mime.kind, &data_uri, ext);
    Ok(EncodedFile {
        mime,
        data_uri,
        html_snippet,
    })
}

/// Standard-alphabet base64 with padding and no line wrapping.
pub fn encode_to_base64(data: &[u8]) -> Result<String, ConversionError> {
    let mut base64_buffer = Vec::with_capacity(data.len().div_ceil(3) * 4);
    {
        let mut encoder = EncoderWriter::new(&mut base64_buffer, &general_purpose::STANDARD);
        encoder
            .write_all(data)
            .map_err(|source| ConversionError::Encode { source })?;
        // finish() emits the trailing partial chunk and its padding
        encoder
            .finish()
            .map_err(|source| ConversionError::Encode { source })?;
    }
    let encoded = String::from_utf8(base64_buffer).map_err(|e| ConversionError::Encode {
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;
    if encoded.len() > MAX_BASE64_SIZE {
        warn!(
            "Base64 payload is {} chars, above the suggested {}; display may be slow",
            encoded.len(),
            MAX_BASE64_SIZE
        );
    }
    Ok(encoded)
}

pub fn build_data_uri(mime: &MimeType, payload: &str) -> String {
    format!("data:{};base64,{}", mime.essence, payload)
}

pub fn build_html_snippet(kind: MediaKind, data_uri: &str, ext: &str) -> String {
    match kind {
        MediaKind::Image => format!(
            "<img src=\"{}\" style=\"{}\" alt=\"{}\">\n</img>",
            data_uri, INLINE_STYLE, IMAGE_ALT
        ),
        MediaKind::Audio => media_tag("audio", data_uri),
        MediaKind::Video => media_tag("video", data_uri),
        MediaKind::Download => format!(
            "\n\n<a href=\"{}\" download=\"file{}\">{}</a>",
            data_uri, ext, DOWNLOAD_LABEL
        ),
    }
}

fn media_tag(tag: &str, data_uri: &str) -> String {
    format!(
        "<{tag} src=\"{uri}\" controls style=\"{style}\">\n  Trình duyệt của bạn không hỗ trợ thẻ {tag}.\n</{tag}>",
        tag = tag,
        uri = data_uri,
        style = INLINE_STYLE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;
    use base64::Engine as _;
    use crate::models::file::{FileCollectInput, FileCollectOutput};

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    struct FixedFile(io::Result<Vec<u8>>);

    impl FileServiceTrait for FixedFile {
        fn read_file(&self, _path: &Path) -> io::Result<Vec<u8>> {
            match &self.0 {
                Ok(data) => Ok(data.clone()),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }

        fn collect_files(&self, _input: FileCollectInput) -> io::Result<FileCollectOutput> {
            Ok(FileCollectOutput { files: Vec::new(), total_size: 0 })
        }
    }

    fn payload_of(data_uri: &str) -> Vec<u8> {
        let (_, payload) = data_uri.split_once(";base64,").expect("base64 marker");
        general_purpose::STANDARD.decode(payload).expect("valid base64")
    }

    #[test]
    fn payload_round_trips() {
        let samples: [&[u8]; 4] = [b"", b"a", b"ab", &[0, 255, 10, 13, 128, 64]];
        for data in samples {
            let encoded = encode_bytes(data, ".bin").unwrap();
            assert_eq!(payload_of(&encoded.data_uri), data);
        }
    }

    #[test]
    fn padding_is_kept_and_no_wrapping() {
        assert_eq!(encode_to_base64(b"a").unwrap(), "YQ==");
        let long = vec![7u8; 4096];
        assert!(!encode_to_base64(&long).unwrap().contains('\n'));
    }

    #[test]
    fn png_gets_img_tag() {
        let encoded = encode_bytes(PNG_HEADER, ".png").unwrap();
        assert!(encoded.data_uri.starts_with("data:image/png;base64,"));
        assert!(encoded.html_snippet.starts_with("<img "));
        assert!(encoded.html_snippet.contains(&format!("src=\"{}\"", encoded.data_uri)));
        assert!(encoded.html_snippet.contains("alt=\"Nhúng Base64\""));
        assert!(encoded.html_snippet.ends_with("</img>"));
    }

    #[test]
    fn audio_and_video_get_controls_and_fallback() {
        let audio = encode_bytes(b"ID3", ".mp3").unwrap();
        assert!(audio.data_uri.starts_with("data:audio/mp3;base64,"));
        assert!(audio.html_snippet.starts_with("<audio src=\""));
        assert!(audio.html_snippet.contains(" controls "));
        assert!(audio.html_snippet.contains("không hỗ trợ thẻ audio."));
        assert!(audio.html_snippet.ends_with("</audio>"));

        let video = encode_bytes(b"ftyp", ".mp4").unwrap();
        assert!(video.html_snippet.starts_with("<video src=\""));
        assert!(video.html_snippet.contains("không hỗ trợ thẻ video."));
        assert!(video.html_snippet.ends_with("</video>"));
    }

    #[test]
    fn pdf_gets_download_link() {
        let encoded = encode_bytes(b"%PDF-1.7", ".pdf").unwrap();
        assert!(encoded.data_uri.starts_with("data:application/pdf;base64,"));
        assert!(encoded.html_snippet.contains(&format!("href=\"{}\"", encoded.data_uri)));
        assert!(encoded.html_snippet.contains("download=\"file.pdf\""));
        assert_eq!(encoded.html_snippet.trim_start().find("<a "), Some(0));
    }

    #[test]
    fn no_extension_downloads_as_octet_stream() {
        let encoded = encode_bytes(b"raw", "").unwrap();
        assert!(encoded.data_uri.starts_with("data:application/octet-stream;base64,"));
        assert!(encoded.html_snippet.contains("download=\"file\""));
    }

    #[test]
    fn service_without_file_prompts() {
        let service = EncoderService::new(Box::new(FixedFile(Ok(Vec::new()))));
        assert_eq!(service.convert(None), ConversionResult::NoFile);
    }

    #[test]
    fn service_reports_read_failure_as_text() {
        let service = EncoderService::new(Box::new(FixedFile(Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        )))));
        let file = UploadedFile::new("locked.png");
        let (first, second) = service.convert(Some(&file)).outputs();
        assert!(first.starts_with("Đã xảy ra lỗi"), "got: {first}");
        assert!(first.contains("permission denied"));
        assert_eq!(second, "");
    }

    #[test]
    fn service_uses_file_extension() {
        let service = EncoderService::new(Box::new(FixedFile(Ok(PNG_HEADER.to_vec()))));
        let file = UploadedFile::new("shots/Screen.PNG");
        match service.convert(Some(&file)) {
            ConversionResult::Success { data_uri, html_snippet } => {
                assert!(data_uri.starts_with("data:image/png;base64,"));
                assert!(html_snippet.starts_with("<img "));
                assert_eq!(payload_of(&data_uri), PNG_HEADER);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn conversion_is_idempotent() {
        let service = EncoderService::new(Box::new(FixedFile(Ok(b"same".to_vec()))));
        let file = UploadedFile::new("x.gif");
        assert_eq!(service.convert(Some(&file)), service.convert(Some(&file)));
    }
}
