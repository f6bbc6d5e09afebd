//! UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from context where the host provides it and
//! keep their own panel state otherwise.

pub mod templating_preview;
