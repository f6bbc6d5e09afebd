//! Wire-protocol DTOs for the templating preview endpoint.
//!
//! The shapes are owned by the `previews` crate so the browser client and the
//! native CLI decode the backend identically.

pub use previews::panel::{ApplyOutcome, PendingRender, PreviewPanel};
pub use previews::{PreviewableDocument, RenderRequest, RenderResult, RenderStatus};
