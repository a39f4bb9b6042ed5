//! Shared types and domain logic for the Ombor warehouse inventory tracker
//!
//! This crate contains the models, validation rules and the pure ledger
//! arithmetic shared between the backend and its tests. It performs no I/O.

pub mod ledger;
pub mod models;
pub mod types;
pub mod validation;

pub use ledger::*;
pub use models::*;
pub use types::*;
pub use validation::*;
