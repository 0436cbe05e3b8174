//! Shared types, models and production workflow for the Print Shop Console
//!
//! This crate contains the in-memory console used by the browser UI (via WASM)
//! and the backend API, along with the models both sides exchange.

pub mod console;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use console::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
