//! Domain models

pub mod message;
pub mod user;

// Re-export for convenience
pub use message::{Message, MessageDetail, ReceivedMessage, SentMessage};
pub use user::{NewUser, PublicUser, UserProfile};
