//! Top-level facade crate for Lumen.
//!
//! Re-exports the core primitives and the service library so users can depend on a single crate.

pub mod core {
    pub use lumen_core::*;
}

pub mod service {
    pub use lumen_service::*;
}
