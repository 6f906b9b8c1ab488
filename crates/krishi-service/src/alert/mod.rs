//! Alert matching, dispatch, and read-state services.

pub mod dispatch;
pub mod matching;
pub mod read_state;
pub mod service;

pub use dispatch::{AlertDispatcher, DispatchOutcome};
pub use matching::AlertMatcher;
pub use read_state::{AlertStats, ReadStateTracker};
pub use service::AlertService;
