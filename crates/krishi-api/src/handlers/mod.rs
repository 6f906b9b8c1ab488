//! HTTP request handlers.

pub mod alert;
pub mod health;
pub mod notification;
pub mod subscription;
