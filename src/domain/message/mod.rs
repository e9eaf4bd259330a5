//! Message entity and its value objects.
//!
//! Messages are immutable records within a session. Each message has a
//! role, an ordered sequence of parts, and optional metadata split into
//! system fields and an opaque caller blob.

mod cursor;
mod message;
mod meta;
mod part;
mod role;

pub use cursor::MessageCursor;
pub use message::Message;
pub use meta::{MessageMeta, SystemMeta, USER_META_KEY};
pub use part::{Part, PartKind};
pub use role::Role;
