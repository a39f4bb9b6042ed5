//! Business logic services for the Ombor warehouse tracker

pub mod auth;
pub mod export;
pub mod import;
pub mod ledger;
pub mod product;
pub mod unit;

pub use auth::AuthService;
pub use import::ImportService;
pub use ledger::LedgerService;
pub use product::ProductService;
pub use unit::UnitService;
