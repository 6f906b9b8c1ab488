//! Per-user alert read receipt entity.

pub mod model;

pub use model::AlertReceipt;
