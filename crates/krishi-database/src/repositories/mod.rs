//! Repository implementations, one per aggregate.

pub mod alert;
pub mod receipt;
pub mod subscription;
pub mod user;

pub use alert::AlertRepository;
pub use receipt::ReceiptRepository;
pub use subscription::SubscriptionRepository;
pub use user::UserRepository;
