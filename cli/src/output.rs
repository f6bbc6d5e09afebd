//! Plain-text rendering of preview responses for terminal output.

use previews::{PreviewableDocument, RenderResult, RenderStatus};

/// One `id<TAB>title` line per document.
#[must_use]
pub fn format_documents(docs: &[PreviewableDocument]) -> String {
    docs.iter()
        .map(|doc| format!("{}\t{}", doc.id, doc.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable summary of a render result, errors and warnings included.
#[must_use]
pub fn format_result(result: &RenderResult) -> String {
    let mut lines = Vec::new();
    let status = match result.status {
        RenderStatus::Ok => "OK",
        RenderStatus::Failed => "FAILED",
    };
    lines.push(format!("status: {status}"));
    if let Some(doc_id) = result.doc_id {
        lines.push(format!("document: {doc_id}"));
    }
    if let Some(preview) = &result.preview {
        lines.push(format!("preview: {preview}"));
    }
    if let Some(debug) = &result.debug_string
        && result.preview.as_ref() != Some(debug)
    {
        lines.push(format!("debug: {debug}"));
    }
    lines.extend(result.errors.iter().map(|e| format!("error: {e}")));
    lines.extend(result.warnings.iter().map(|w| format!("warning: {w}")));
    lines.join("\n")
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
