//! Public API surface: errors and the input provider contract.
mod errors;
mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{AcceptDefaults, FixedInput, InputProvider};
