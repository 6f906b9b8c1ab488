//! Core traits implemented by leaf crates.

pub mod push;

pub use push::{PushGateway, PushMessage, PushPriority, PushTicket};
