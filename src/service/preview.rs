/// Placeholder shown in the preview region before any file is converted.
pub const PREVIEW_PLACEHOLDER: &str = "Tải lên tệp để xem trước...";

/// Derive the preview markup from the HTML slot.
///
/// Text that looks like a tag (after trimming) is rendered as-is; anything
/// else is wrapped verbatim in a code block. Empty input stays empty.
pub fn update_preview(html_code: &str) -> String {
    if !html_code.is_empty() && !html_code.trim().starts_with('<') {
        format!("<pre><code>{}</code></pre>", html_code)
    } else {
        html_code.to_string()
    }
}
