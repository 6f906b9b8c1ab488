//! # krishi-service
//!
//! Business logic for the Krishi advisory backend. The alert module holds
//! the matching engine, the notification fan-out dispatcher, and the
//! read-state tracker; the push module holds ad-hoc device messaging.

pub mod alert;
pub mod push;
