//! # krishi-entity
//!
//! Domain entity models for the Krishi Smart Crop Advisory backend. Every
//! struct in this crate represents a database table row or a domain value
//! object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and database entities additionally derive `sqlx::FromRow`.

pub mod alert;
pub mod receipt;
pub mod subscription;
pub mod user;

pub use alert::model::{Alert, MatchedAlert, NewAlert};
pub use alert::{AlertKind, Severity};
pub use receipt::AlertReceipt;
pub use subscription::AlertSubscription;
pub use user::User;
pub use user::model::Recipient;
