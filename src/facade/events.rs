//! Event/callback graph behind the interactive front end.
//!
//! The form has three fields. Two triggers update them:
//!
//! ```text
//! FileChanged(file) ──▶ DataUri, HtmlCode
//!                                  │ (only when its value changed)
//!                                  ▼
//!                      HtmlChanged(html) ──▶ Preview
//! ```
//!
//! Each trigger is a pure function from current values to a list of
//! [`FieldUpdate`]s; [`EventGraph::dispatch`] applies them to a
//! [`FormState`] and follows the cascade.

use crate::models::file::UploadedFile;
use crate::service::preview::{update_preview, PREVIEW_PLACEHOLDER};
use crate::service::traits::i_service::EncoderServiceTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DataUri,
    HtmlCode,
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: Field,
    pub value: String,
}

impl FieldUpdate {
    fn new(field: Field, value: String) -> Self {
        FieldUpdate { field, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    FileChanged(Option<UploadedFile>),
    HtmlChanged(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub data_uri: String,
    pub html_code: String,
    pub preview: String,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            data_uri: String::new(),
            html_code: String::new(),
            preview: PREVIEW_PLACEHOLDER.to_string(),
        }
    }
}

impl FormState {
    /// Apply one update; returns whether the value actually changed.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        let slot = match update.field {
            Field::DataUri => &mut self.data_uri,
            Field::HtmlCode => &mut self.html_code,
            Field::Preview => &mut self.preview,
        };
        if *slot == update.value {
            return false;
        }
        *slot = update.value;
        true
    }
}

pub struct EventGraph {
    encoder: Box<dyn EncoderServiceTrait>,
}

impl EventGraph {
    pub fn new(encoder: Box<dyn EncoderServiceTrait>) -> Self {
        EventGraph { encoder }
    }

    pub fn on_file_change(&self, file: Option<&UploadedFile>) -> Vec<FieldUpdate> {
        let (data_uri, html_code) = self.encoder.convert(file).outputs();
        vec![
            FieldUpdate::new(Field::DataUri, data_uri),
            FieldUpdate::new(Field::HtmlCode, html_code),
        ]
    }

    pub fn on_html_change(&self, html_code: &str) -> Vec<FieldUpdate> {
        vec![FieldUpdate::new(Field::Preview, update_preview(html_code))]
    }

    /// Fire `trigger` against `state`, following cascades until quiet.
    /// Returns the fields that changed, in order.
    pub fn dispatch(&self, state: &mut FormState, trigger: Trigger) -> Vec<Field> {
        let mut changed = Vec::new();
        let mut pending = vec![trigger];
        while let Some(trigger) = pending.pop() {
            let updates = match &trigger {
                Trigger::FileChanged(file) => self.on_file_change(file.as_ref()),
                Trigger::HtmlChanged(html) => self.on_html_change(html),
            };
            for update in updates {
                let field = update.field;
                if state.apply(update) {
                    changed.push(field);
                    if field == Field::HtmlCode {
                        pending.push(Trigger::HtmlChanged(state.html_code.clone()));
                    }
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::conversion::ConversionResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubEncoder {
        calls: AtomicUsize,
    }

    impl EncoderServiceTrait for StubEncoder {
        fn convert(&self, file: Option<&UploadedFile>) -> ConversionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match file {
                None => ConversionResult::NoFile,
                Some(f) if f.extension() == ".png" => ConversionResult::Success {
                    data_uri: "data:image/png;base64,AA==".to_string(),
                    html_snippet: "<img src=\"data:image/png;base64,AA==\">\n</img>".to_string(),
                },
                Some(_) => ConversionResult::Failure {
                    message: "Đã xảy ra lỗi: boom".to_string(),
                },
            }
        }
    }

    fn graph() -> EventGraph {
        EventGraph::new(Box::new(StubEncoder { calls: AtomicUsize::new(0) }))
    }

    #[test]
    fn initial_state_shows_placeholder() {
        assert_eq!(FormState::default().preview, "Tải lên tệp để xem trước...");
    }

    #[test]
    fn file_change_cascades_into_preview() {
        let graph = graph();
        let mut state = FormState::default();
        let changed = graph.dispatch(&mut state, Trigger::FileChanged(Some(UploadedFile::new("a.png"))));

        assert_eq!(changed, vec![Field::DataUri, Field::HtmlCode, Field::Preview]);
        assert_eq!(state.data_uri, "data:image/png;base64,AA==");
        assert_eq!(state.preview, state.html_code);
    }

    #[test]
    fn no_file_sets_prompt_and_leaves_preview() {
        let graph = graph();
        let mut state = FormState::default();
        let changed = graph.dispatch(&mut state, Trigger::FileChanged(None));

        // html slot stays empty, so the preview trigger never fires
        assert_eq!(changed, vec![Field::DataUri]);
        assert_eq!(state.data_uri, "Vui lòng tải lên một tệp.");
        assert_eq!(state.preview, "Tải lên tệp để xem trước...");
    }

    #[test]
    fn failure_clears_html_and_preview() {
        let graph = graph();
        let mut state = FormState::default();
        graph.dispatch(&mut state, Trigger::FileChanged(Some(UploadedFile::new("a.png"))));
        let changed = graph.dispatch(&mut state, Trigger::FileChanged(Some(UploadedFile::new("b.pdf"))));

        assert_eq!(changed, vec![Field::DataUri, Field::HtmlCode, Field::Preview]);
        assert!(state.data_uri.starts_with("Đã xảy ra lỗi"));
        assert_eq!(state.html_code, "");
        assert_eq!(state.preview, "");
    }

    #[test]
    fn same_file_twice_changes_nothing() {
        let graph = graph();
        let mut state = FormState::default();
        let file = UploadedFile::new("a.png");
        graph.dispatch(&mut state, Trigger::FileChanged(Some(file.clone())));
        let before = state.clone();
        let changed = graph.dispatch(&mut state, Trigger::FileChanged(Some(file)));

        assert!(changed.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn html_change_wraps_plain_text() {
        let graph = graph();
        let mut state = FormState::default();
        graph.dispatch(&mut state, Trigger::HtmlChanged("just text".to_string()));
        assert_eq!(state.preview, "<pre><code>just text</code></pre>");
    }
}
