//! # krishi-database
//!
//! PostgreSQL connection management, migrations, and repository
//! implementations for the Krishi advisory backend. Repositories own a
//! `PgPool` clone and expose domain-shaped queries; entities are mapped at
//! this boundary via `sqlx::FromRow`.

pub mod connection;
pub mod migration;
pub mod repositories;
