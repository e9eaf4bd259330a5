//! Compound pagination cursor over (created_at, id).
//!
//! Timestamps alone are not unique, so the message id breaks ties. The
//! cursor denotes an exclusive lower bound: the next page contains
//! messages strictly greater than it in (created_at, id) order. Keyset
//! pagination keeps client positions stable under concurrent inserts,
//! which offset paging cannot.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, MessageId, Timestamp};

/// Opaque pagination position: the ordering key of the last-seen message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCursor {
    created_at: Timestamp,
    id: MessageId,
}

impl MessageCursor {
    /// Creates a cursor from a message's ordering key.
    pub fn new(created_at: Timestamp, id: MessageId) -> Self {
        Self { created_at, id }
    }

    /// The "from the beginning" cursor: zero timestamp, nil id.
    pub fn start() -> Self {
        Self {
            created_at: Timestamp::zero(),
            id: MessageId::nil(),
        }
    }

    /// Returns the timestamp component.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the id component.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Encodes the cursor as an opaque URL-safe string.
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.created_at.as_unix_nanos(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }
}

impl Default for MessageCursor {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for MessageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for MessageCursor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::new(ErrorCode::InvalidCursor, format!("invalid cursor: {}", s));

        let bytes = URL_SAFE_NO_PAD.decode(s.as_bytes()).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (nanos, id) = raw.split_once(':').ok_or_else(invalid)?;

        let nanos: i64 = nanos.parse().map_err(|_| invalid())?;
        let id: MessageId = id.parse().map_err(|_| invalid())?;

        Ok(Self {
            created_at: Timestamp::from_unix_nanos(nanos),
            id,
        })
    }
}
