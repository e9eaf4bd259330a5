//! Query handlers.

mod get_messages;

pub use get_messages::{GetMessagesHandler, GetMessagesQuery, MessagePage};
