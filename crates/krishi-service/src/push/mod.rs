//! Ad-hoc push messaging and token registration.

pub mod service;

pub use service::PushService;
