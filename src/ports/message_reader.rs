//! Message reader port (read side / CQRS queries).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MessageId, SessionId, Timestamp};
use crate::domain::message::Message;

/// Reader port for session message history.
///
/// Implementations must honor the keyset ordering contract: rows are
/// returned in ascending `(created_at, id)` order, strictly greater than
/// the `(after_created_at, after_id)` bound, at most `limit` of them.
/// The zero bound denotes "from the beginning of the session".
#[async_trait]
pub trait MessageReader: Send + Sync {
    /// Fetch one page of messages after the given ordering key.
    async fn list_after(
        &self,
        session_id: &SessionId,
        after_created_at: &Timestamp,
        after_id: &MessageId,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError>;
}
