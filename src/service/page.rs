use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use log::info;

use crate::models::page::{PageRenderInput, PageRenderOutput};
use crate::service::preview::update_preview;
use crate::service::traits::i_service::PageServiceTrait;
use crate::utils::utils::{escape_html, format_file_size};

const PAGE_TEMPLATE: &str = include_str!("../../assets/template/page_template.html");

/// Writes the standalone preview page for a converted file.
pub struct PageService;

impl PageService {
    pub fn new() -> Self {
        PageService
    }
}

impl Default for PageService {
    fn default() -> Self {
        Self::new()
    }
}

impl PageServiceTrait for PageService {
    fn write_page(&self, input: PageRenderInput) -> io::Result<PageRenderOutput> {
        let html_content = generate_page_content(
            &input.file_name,
            &format_file_size(input.file_size),
            &input.data_uri,
            &input.html_snippet,
        );
        write_html_file(&html_content, &input.page_path)?;
        info!(
            "Wrote preview page {} ({} bytes)",
            input.page_path.display(),
            html_content.len()
        );
        Ok(PageRenderOutput {
            html_file_path: input.page_path.to_string_lossy().to_string(),
        })
    }
}

/// Fill the page template.
pub fn generate_page_content(
    file_name: &str,
    file_size_str: &str,
    data_uri: &str,
    html_snippet: &str,
) -> String {
    render_template(
        PAGE_TEMPLATE,
        &[
            ("FILE_NAME", escape_html(file_name)),
            ("FILE_SIZE", file_size_str.to_string()),
            ("DATA_URI", escape_html(data_uri)),
            ("HTML_CODE", escape_html(html_snippet)),
            ("PREVIEW", update_preview(html_snippet)),
        ],
    )
}

/// Substitute `{{KEY}}` placeholders in one pass, so values that happen to
/// contain placeholder text are copied verbatim. Unknown keys are kept.
fn render_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after_open[..close];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);
    out
}

pub fn write_html_file(html_content: &str, output_path: &Path) -> io::Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html_content.as_bytes())?;
    writer.flush()?;
    Ok(())
}
