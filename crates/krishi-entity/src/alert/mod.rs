//! Alert entity and its enums.

pub mod kind;
pub mod model;
pub mod severity;

pub use kind::AlertKind;
pub use model::Alert;
pub use severity::Severity;
