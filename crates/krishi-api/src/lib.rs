//! # krishi-api
//!
//! HTTP API layer for the Krishi advisory backend built on Axum.
//!
//! Provides the REST endpoints for alert matching, notification dispatch,
//! read state, token registration, and subscription preferences, plus the
//! DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
