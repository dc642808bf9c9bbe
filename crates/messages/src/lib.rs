//! Messages domain module.

pub mod message;
pub mod service;

pub use message::{Message, MessageConfig, MessageId, with_author_id, with_channel_id, with_content};
pub use service::MessageService;
