//! # client
//!
//! Leptos + WASM UI slice for previewing document templates.
//!
//! The `TemplatingPreview` component is mounted by the host document
//! management UI next to a template input. Panel logic and wire types come
//! from the `previews` crate; this crate adds the reactive wiring and the
//! browser-side REST calls.

pub mod components;
pub mod net;
pub mod state;

/// Install the panic hook and route `log` output to the browser console.
///
/// Safe to call more than once; later calls keep the first logger.
#[cfg(feature = "hydrate")]
pub fn init_browser_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
