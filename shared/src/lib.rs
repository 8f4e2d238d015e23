//! Shared types and models for the Rações Stock tracker
//!
//! This crate contains types shared between the backend and the browser
//! client (via WASM): domain models, wire payloads, input validation and
//! the derived stock arithmetic.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
