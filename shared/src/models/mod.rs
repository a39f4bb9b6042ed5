//! Domain models for the Ombor warehouse inventory tracker

mod movement;
mod product;
mod unit;
mod user;

pub use movement::*;
pub use product::*;
pub use unit::*;
pub use user::*;
