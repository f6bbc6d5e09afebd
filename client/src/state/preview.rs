//! Display models derived from [`PreviewPanel`] for the preview component.
//!
//! Kept free of Leptos types so the rendering decisions are testable
//! natively.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use previews::panel::PreviewPanel;
use previews::{RenderResult, RenderStatus};

/// Title of the collapsible preview section.
pub const PREVIEW_TITLE: &str = "Template live preview";

/// Option value meaning "no document selected".
pub const NO_DOCUMENT_VALUE: &str = "";

/// One `<option>` of the document selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Selector options for the current panel state.
///
/// Before the list has loaded this is a single disabled-looking placeholder;
/// an empty list still offers the "no document" choice.
pub fn document_options(panel: &PreviewPanel) -> Vec<DocumentOption> {
    let Some(docs) = panel.documents() else {
        return vec![DocumentOption {
            value: NO_DOCUMENT_VALUE.to_owned(),
            label: "Loading documents...".to_owned(),
            selected: true,
        }];
    };

    let selected = panel.selected_document_id();
    let mut options = Vec::with_capacity(docs.len() + 1);
    options.push(DocumentOption {
        value: NO_DOCUMENT_VALUE.to_owned(),
        label: "No document (placeholder values)".to_owned(),
        selected: selected.is_none(),
    });
    options.extend(docs.iter().map(|doc| DocumentOption {
        value: doc.id.to_string(),
        label: doc.title.clone(),
        selected: selected == Some(doc.id),
    }));
    options
}

/// Map a selector value back to a document id.
pub fn parse_document_choice(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Render-ready view of a [`RenderResult`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub preview: String,
    pub debug: Option<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ResultView {
    pub fn from_result(result: &RenderResult) -> Self {
        let (status_label, status_class) = match (result.status, result.errors.is_empty()) {
            (RenderStatus::Failed, _) => ("Failed", "templating-preview__status--failed"),
            (RenderStatus::Ok, false) => ("Rendered with errors", "templating-preview__status--warn"),
            (RenderStatus::Ok, true) => ("OK", "templating-preview__status--ok"),
        };
        let preview = result.preview.clone().unwrap_or_default();
        let debug = result
            .debug_string
            .clone()
            .filter(|debug| *debug != preview);

        Self {
            status_label,
            status_class,
            preview,
            debug,
            errors: result.errors.clone(),
            warnings: result.warnings.clone(),
        }
    }
}
