//! Mediakit: legacy media locator parsing and gallery configuration assembly.
//!
//! Re-exports the `mediakit-core` library.

pub use mediakit_core::*;
