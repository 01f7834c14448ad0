use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct PageRenderInput {
    /// Where the page is written, `.html` included.
    pub page_path: PathBuf,
    pub file_name: String,
    pub file_size: usize,
    pub data_uri: String,
    pub html_snippet: String,
}

#[derive(Debug)]
pub struct PageRenderOutput {
    pub html_file_path: String,
}
