//! # krishi-push
//!
//! Push delivery gateway client. Implements the [`PushGateway`] trait from
//! `krishi-core` against an Expo-compatible push HTTP API.
//!
//! [`PushGateway`]: krishi_core::traits::push::PushGateway

pub mod expo;

pub use expo::ExpoPushGateway;
