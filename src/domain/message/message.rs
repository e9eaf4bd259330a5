//! Message entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{DomainError, MessageId, SessionId, Timestamp};

use super::{MessageMeta, Part, Role};

/// An immutable message within a session.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `(created_at, id)` is the total ordering key within a session
/// - `parts` is non-empty and each part satisfies its variant's
///   required fields (validated at construction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    session_id: SessionId,
    role: Role,
    parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<MessageMeta>,
    created_at: Timestamp,
}

impl Message {
    /// Creates a new message after validating every part.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `parts` is empty or any part is missing a
    ///   required field
    pub fn new(
        session_id: SessionId,
        role: Role,
        parts: Vec<Part>,
        meta: Option<MessageMeta>,
    ) -> Result<Self, DomainError> {
        if parts.is_empty() {
            return Err(DomainError::validation(
                "parts",
                "message requires at least one part",
            ));
        }
        for part in &parts {
            part.validate()?;
        }

        Ok(Self {
            id: MessageId::new(),
            session_id,
            role,
            parts,
            meta,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        session_id: SessionId,
        role: Role,
        parts: Vec<Part>,
        meta: Option<MessageMeta>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            role,
            parts,
            meta,
            created_at,
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the session this message belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the ordered parts.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns the metadata, if any.
    pub fn meta(&self) -> Option<&MessageMeta> {
        self.meta.as_ref()
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the caller-supplied metadata blob.
    ///
    /// Always a map: callers never need to distinguish "no meta" from
    /// "no user meta".
    pub fn user_meta(&self) -> Map<String, Value> {
        self.meta
            .as_ref()
            .map(|m| m.user.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_message(content: &str) -> Message {
        Message::new(
            SessionId::new(),
            Role::User,
            vec![Part::text(content)],
            None,
        )
        .unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn new_creates_message_with_role_and_parts() {
            let msg = text_message("Hello");
            assert_eq!(msg.role(), Role::User);
            assert_eq!(msg.parts().len(), 1);
        }

        #[test]
        fn rejects_empty_parts() {
            let result = Message::new(SessionId::new(), Role::User, vec![], None);
            assert!(result.is_err());
        }

        #[test]
        fn rejects_invalid_part() {
            let bad = Part {
                kind: crate::domain::message::PartKind::Text,
                text: None,
                meta: Map::new(),
            };
            let result = Message::new(SessionId::new(), Role::User, vec![bad], None);
            assert!(result.is_err());
        }

        #[test]
        fn sets_created_at() {
            let before = Timestamp::now();
            let msg = text_message("Hello");
            assert!(msg.created_at() >= &before);
        }
    }

    mod reconstitute {
        use super::*;

        #[test]
        fn preserves_all_fields() {
            let id = MessageId::new();
            let session_id = SessionId::new();
            let created_at = Timestamp::now();

            let msg = Message::reconstitute(
                id,
                session_id,
                Role::Assistant,
                vec![Part::text("stored")],
                None,
                created_at,
            );

            assert_eq!(msg.id(), &id);
            assert_eq!(msg.session_id(), &session_id);
            assert_eq!(msg.created_at(), &created_at);
        }
    }

    mod user_meta {
        use super::*;

        #[test]
        fn returns_stored_user_blob() {
            let mut user = Map::new();
            user.insert("k".to_string(), json!("v"));
            let msg = Message::new(
                SessionId::new(),
                Role::User,
                vec![Part::text("hi")],
                Some(MessageMeta::from_user(user)),
            )
            .unwrap();

            assert_eq!(msg.user_meta()["k"], "v");
        }

        #[test]
        fn returns_empty_map_when_meta_absent() {
            let msg = text_message("hi");
            assert!(msg.user_meta().is_empty());
        }

        #[test]
        fn returns_empty_map_when_user_blob_absent() {
            let msg = Message::new(
                SessionId::new(),
                Role::User,
                vec![Part::text("hi")],
                Some(MessageMeta::default()),
            )
            .unwrap();
            assert!(msg.user_meta().is_empty());
        }
    }
}
