//! Alert subscription entity.

pub mod model;

pub use model::AlertSubscription;
