use super::*;
use previews::PreviewableDocument;

fn loaded_panel() -> PreviewPanel {
    let mut panel = PreviewPanel::new(true);
    panel.set_documents(vec![
        PreviewableDocument { id: 4, title: "Invoice".to_owned() },
        PreviewableDocument { id: 9, title: "Letter".to_owned() },
    ]);
    panel
}

fn result(status: RenderStatus, errors: &[&str]) -> RenderResult {
    RenderResult {
        status,
        preview: Some("Invoice".to_owned()),
        debug_string: Some("Invoice".to_owned()),
        input: None,
        doc_id: None,
        errors: errors.iter().map(|e| (*e).to_owned()).collect(),
        warnings: Vec::new(),
    }
}

// =============================================================
// document_options
// =============================================================

#[test]
fn options_show_loading_placeholder_before_list_arrives() {
    let options = document_options(&PreviewPanel::default());
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Loading documents...");
}

#[test]
fn options_for_empty_list_offer_only_no_document() {
    let mut panel = PreviewPanel::default();
    panel.set_documents(Vec::new());
    let options = document_options(&panel);
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, NO_DOCUMENT_VALUE);
    assert!(options[0].selected);
    assert_ne!(options[0].label, "Loading documents...");
}

#[test]
fn options_preserve_document_order_and_mark_selection() {
    let mut panel = loaded_panel();
    panel.select_document(Some(9));
    let options = document_options(&panel);
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["", "4", "9"]);
    assert!(!options[0].selected);
    assert!(!options[1].selected);
    assert!(options[2].selected);
    assert_eq!(options[2].label, "Letter");
}

#[test]
fn parse_document_choice_maps_empty_to_none() {
    assert_eq!(parse_document_choice(NO_DOCUMENT_VALUE), None);
    assert_eq!(parse_document_choice("9"), Some(9));
    assert_eq!(parse_document_choice("nine"), None);
}

// =============================================================
// ResultView
// =============================================================

#[test]
fn result_view_marks_failed_and_keeps_errors() {
    let view = ResultView::from_result(&result(RenderStatus::Failed, &["bad token"]));
    assert_eq!(view.status_label, "Failed");
    assert_eq!(view.errors, vec!["bad token".to_owned()]);
}

#[test]
fn result_view_flags_ok_with_errors() {
    let view = ResultView::from_result(&result(RenderStatus::Ok, &["Syntax error: x"]));
    assert_eq!(view.status_label, "Rendered with errors");
}

#[test]
fn result_view_hides_debug_equal_to_preview() {
    let view = ResultView::from_result(&result(RenderStatus::Ok, &[]));
    assert_eq!(view.status_label, "OK");
    assert_eq!(view.preview, "Invoice");
    assert_eq!(view.debug, None);
}

#[test]
fn result_view_keeps_differing_debug_string() {
    let mut raw = result(RenderStatus::Ok, &[]);
    raw.debug_string = Some("Invoice-{{ missing }}".to_owned());
    let view = ResultView::from_result(&raw);
    assert_eq!(view.debug.as_deref(), Some("Invoice-{{ missing }}"));
}
