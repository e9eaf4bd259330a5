//! Message metadata: system fields and the caller's opaque blob.
//!
//! Stored data keeps both in a single JSON object, with caller-supplied
//! metadata isolated under the reserved `__user_meta__` key. In memory the
//! two are explicit fields so system code never reaches through an
//! untyped map; the wire nesting is preserved by the serde shape below.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key isolating caller-supplied metadata from system fields.
pub const USER_META_KEY: &str = "__user_meta__";

/// System-owned metadata fields.
///
/// Unrecognized system fields written by other services round-trip through
/// `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMeta {
    /// Processing status stamped by the background task pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_process_status: Option<String>,

    /// Producer channel or client that created the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full message metadata: system fields plus the caller blob.
///
/// Serializes to a single JSON object with system fields at the top level
/// and the caller blob nested under [`USER_META_KEY`], matching stored data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMeta {
    #[serde(flatten)]
    pub system: SystemMeta,

    #[serde(
        rename = "__user_meta__",
        default,
        skip_serializing_if = "Map::is_empty"
    )]
    pub user: Map<String, Value>,
}

impl MessageMeta {
    /// Creates metadata holding only a caller blob.
    pub fn from_user(user: Map<String, Value>) -> Self {
        Self {
            system: SystemMeta::default(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_user_blob_under_reserved_key() {
        let mut user = Map::new();
        user.insert("client_tag".to_string(), json!("mobile"));
        let meta = MessageMeta::from_user(user);

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["__user_meta__"]["client_tag"], "mobile");
    }

    #[test]
    fn deserializes_stored_shape() {
        let stored = json!({
            "task_process_status": "running",
            "source": "sdk-py",
            "pipeline_version": 3,
            "__user_meta__": {"trace": "abc"}
        });

        let meta: MessageMeta = serde_json::from_value(stored).unwrap();
        assert_eq!(meta.system.task_process_status.as_deref(), Some("running"));
        assert_eq!(meta.system.source.as_deref(), Some("sdk-py"));
        assert_eq!(meta.system.extra["pipeline_version"], 3);
        assert_eq!(meta.user["trace"], "abc");
    }

    #[test]
    fn absent_user_key_yields_empty_map() {
        let stored = json!({"source": "sdk-ts"});
        let meta: MessageMeta = serde_json::from_value(stored).unwrap();
        assert!(meta.user.is_empty());
    }

    #[test]
    fn empty_user_blob_is_omitted_on_the_wire() {
        let meta = MessageMeta::default();
        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.get("__user_meta__").is_none());
    }

    #[test]
    fn roundtrips_unknown_system_fields() {
        let stored = json!({"shard": "eu-1", "__user_meta__": {"k": 1}});
        let meta: MessageMeta = serde_json::from_value(stored.clone()).unwrap();
        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back, stored);
    }
}
