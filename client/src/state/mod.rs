//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `preview` derives display models from the framework-free panel state;
//! `notices` is the host application's error area that components report
//! transport failures into.

pub mod notices;
pub mod preview;
