//! # krishi-core
//!
//! Core crate for the Krishi Smart Crop Advisory backend. Contains the
//! push gateway trait, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Krishi crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
