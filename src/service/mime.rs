use std::path::Path;

/// How a file can be shown inline in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    /// Not embeddable; offered as a download link.
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType {
    pub essence: String,
    pub kind: MediaKind,
}

impl MimeType {
    fn new(essence: &str, kind: MediaKind) -> Self {
        MimeType {
            essence: essence.to_string(),
            kind,
        }
    }
}

/// Look up the MIME type for an extension such as `.png`.
///
/// Unknown extensions map to `application/<ext>`, an empty one to
/// `application/octet-stream`.
pub fn mime_for_extension(ext: &str) -> MimeType {
    let ext = ext.to_ascii_lowercase();
    match ext.as_str() {
        ".jpg" | ".jpeg" => MimeType::new("image/jpeg", MediaKind::Image),
        ".png" => MimeType::new("image/png", MediaKind::Image),
        ".gif" => MimeType::new("image/gif", MediaKind::Image),
        ".svg" => MimeType::new("image/svg+xml", MediaKind::Image),
        ".mp3" => MimeType::new("audio/mp3", MediaKind::Audio),
        ".mp4" => MimeType::new("video/mp4", MediaKind::Video),
        "" | "." => MimeType::new("application/octet-stream", MediaKind::Download),
        other => {
            let bare = other.strip_prefix('.').unwrap_or(other);
            MimeType::new(&format!("application/{}", bare), MediaKind::Download)
        }
    }
}

/// Last extension of `path`, lowercased, with its leading dot.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
