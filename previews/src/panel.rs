//! Preview panel state, independent of any UI framework.
//!
//! DESIGN
//! ======
//! The panel never performs I/O. A template change returns a
//! [`PendingRender`] ticket that the caller sends over whatever transport it
//! has; the response comes back through [`PreviewPanel::apply_result`].
//! Tickets carry a sequence number so a response that resolves after a newer
//! one has already been shown is dropped instead of overwriting it.

use crate::{PreviewableDocument, RenderRequest, RenderResult};

/// Newlines are always stripped from previews; the result is a filename.
pub const REMOVE_NEW_LINES: bool = true;

/// Decide whether a template change notification should produce a request.
///
/// `previous` is `None` before the first template value has been seen.
#[must_use]
pub fn should_request(live_preview: bool, previous: Option<&str>, next: &str) -> bool {
    live_preview && previous != Some(next)
}

/// A render request handed to the transport, tagged with its sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRender {
    pub seq: u64,
    pub request: RenderRequest,
}

/// What happened to a response handed to [`PreviewPanel::apply_result`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The result is now the displayed one.
    Applied,
    /// A response for a newer request was already displayed.
    Stale,
}

/// State behind the templating preview panel.
#[derive(Clone, Debug, Default)]
pub struct PreviewPanel {
    template: Option<String>,
    live_preview: bool,
    selected_document_id: Option<i64>,
    documents: Option<Vec<PreviewableDocument>>,
    result: Option<RenderResult>,
    issued: u64,
    applied: Option<u64>,
}

impl PreviewPanel {
    /// Create a panel with live preview switched on or off.
    #[must_use]
    pub fn new(live_preview: bool) -> Self {
        Self {
            live_preview,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    #[must_use]
    pub fn live_preview(&self) -> bool {
        self.live_preview
    }

    #[must_use]
    pub fn selected_document_id(&self) -> Option<i64> {
        self.selected_document_id
    }

    /// Candidate documents; `None` until the initial list has arrived.
    #[must_use]
    pub fn documents(&self) -> Option<&[PreviewableDocument]> {
        self.documents.as_deref()
    }

    /// The displayed render result, if any response has been applied.
    #[must_use]
    pub fn result(&self) -> Option<&RenderResult> {
        self.result.as_ref()
    }

    /// Number of render requests issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Switch live preview on or off. Never issues a request by itself.
    pub fn set_live_preview(&mut self, enabled: bool) {
        self.live_preview = enabled;
    }

    /// Select the sample document used for subsequent requests.
    pub fn select_document(&mut self, id: Option<i64>) {
        self.selected_document_id = id;
    }

    /// Store the document list once it has been fetched.
    pub fn set_documents(&mut self, documents: Vec<PreviewableDocument>) {
        self.documents = Some(documents);
    }

    /// Record a template change. Returns the request to send when live
    /// preview is enabled and the text actually changed.
    pub fn set_template(&mut self, template: impl Into<String>) -> Option<PendingRender> {
        let template = template.into();
        let fire = should_request(self.live_preview, self.template.as_deref(), &template);
        self.template = Some(template);
        if !fire {
            return None;
        }
        Some(self.issue())
    }

    /// Build a request for the current template regardless of the live
    /// preview flag, e.g. for an explicit "refresh" action. `None` before any
    /// template has been set.
    pub fn refresh(&mut self) -> Option<PendingRender> {
        self.template.as_ref()?;
        Some(self.issue())
    }

    /// Apply a response for the request with sequence number `seq`.
    pub fn apply_result(&mut self, seq: u64, result: RenderResult) -> ApplyOutcome {
        if self.applied.is_some_and(|applied| applied > seq) {
            return ApplyOutcome::Stale;
        }
        self.applied = Some(seq);
        self.result = Some(result);
        ApplyOutcome::Applied
    }

    fn issue(&mut self) -> PendingRender {
        self.issued = self.issued.saturating_add(1);
        let template = self.template.clone().unwrap_or_default();
        PendingRender {
            seq: self.issued,
            request: RenderRequest::new(template, self.selected_document_id, REMOVE_NEW_LINES),
        }
    }
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;
