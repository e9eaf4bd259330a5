//! PostgreSQL implementation of MessageReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, MessageId, SessionId, Timestamp};
use crate::domain::message::{Message, MessageMeta, Part, Role};
use crate::ports::MessageReader;

/// PostgreSQL implementation of MessageReader.
#[derive(Clone)]
pub struct PostgresMessageReader {
    pool: PgPool,
}

impl PostgresMessageReader {
    /// Creates a new PostgresMessageReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageReader for PostgresMessageReader {
    async fn list_after(
        &self,
        session_id: &SessionId,
        after_created_at: &Timestamp,
        after_id: &MessageId,
        limit: i64,
    ) -> Result<Vec<Message>, DomainError> {
        // Keyset predicate on the compound ordering key; offset paging
        // would drift under concurrent inserts.
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, parts, meta, created_at
            FROM messages
            WHERE session_id = $1
              AND (created_at, id) > ($2, $3)
            ORDER BY created_at ASC, id ASC
            LIMIT $4
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(after_created_at.as_datetime())
        .bind(after_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch messages: {}", e)))?;

        rows.iter()
            .map(|row| {
                let id: uuid::Uuid = row.get("id");
                let session_uuid: uuid::Uuid = row.get("session_id");
                let role_str: &str = row.get("role");
                let parts: serde_json::Value = row.get("parts");
                let meta: Option<serde_json::Value> = row.get("meta");
                let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

                let role = str_to_role(role_str)?;
                let parts: Vec<Part> = serde_json::from_value(parts).map_err(|e| {
                    DomainError::database(format!("Invalid stored parts for message {}: {}", id, e))
                })?;
                let meta: Option<MessageMeta> = meta
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(|e| {
                        DomainError::database(format!(
                            "Invalid stored meta for message {}: {}",
                            id, e
                        ))
                    })?;

                Ok(Message::reconstitute(
                    MessageId::from_uuid(id),
                    SessionId::from_uuid(session_uuid),
                    role,
                    parts,
                    meta,
                    Timestamp::from_datetime(created_at),
                ))
            })
            .collect()
    }
}

fn str_to_role(s: &str) -> Result<Role, DomainError> {
    s.parse()
        .map_err(|_| DomainError::database(format!("Invalid stored role: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_to_role_maps_all_roles() {
        assert_eq!(str_to_role("user").unwrap(), Role::User);
        assert_eq!(str_to_role("assistant").unwrap(), Role::Assistant);
        assert_eq!(str_to_role("system").unwrap(), Role::System);
        assert_eq!(str_to_role("tool").unwrap(), Role::Tool);
    }

    #[test]
    fn str_to_role_rejects_unknown() {
        assert!(str_to_role("operator").is_err());
    }
}
