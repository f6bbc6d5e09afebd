//! Networking modules for the templating preview REST surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the REST calls; wire types live in the shared `previews`
//! crate and are re-exported from `types`.

pub mod api;
pub mod types;
