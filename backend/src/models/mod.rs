//! Database models for the Ombor warehouse tracker
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
