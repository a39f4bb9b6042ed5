//! HTTP handlers for the Ombor warehouse tracker

pub mod auth;
pub mod health;
pub mod import;
pub mod ledger;
pub mod product;
pub mod unit;

pub use auth::*;
pub use health::*;
pub use import::*;
pub use ledger::*;
pub use product::*;
pub use unit::*;
