//! HTTP DTOs for session message endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::application::handlers::MessagePage;
use crate::domain::conversion::{ConvertedMessages, PublicUrl};

/// Query parameters for message retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct GetMessagesParams {
    pub limit: i64,
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub edit_boundary_id: Option<String>,
}

/// One page of converted messages.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub items: ConvertedMessages,
    pub ids: Vec<String>,
    pub metas: Vec<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub this_time_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_at_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_urls: Option<HashMap<String, PublicUrl>>,
}

impl From<MessagePage> for MessagesResponse {
    fn from(page: MessagePage) -> Self {
        Self {
            items: page.items,
            ids: page.ids.iter().map(ToString::to_string).collect(),
            metas: page.metas,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
            this_time_tokens: page.this_time_tokens,
            edit_at_message_id: page.edit_at_message_id.map(|id| id.to_string()),
            public_urls: page.public_urls,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_deserialize_with_defaults() {
        let params: GetMessagesParams =
            serde_urlencoded::from_str("limit=20").unwrap();
        assert_eq!(params.limit, 20);
        assert!(params.cursor.is_none());
        assert!(params.format.is_none());
    }

    #[test]
    fn params_require_limit() {
        let result: Result<GetMessagesParams, _> = serde_urlencoded::from_str("format=openai");
        assert!(result.is_err());
    }

    #[test]
    fn response_omits_absent_optionals() {
        let response = MessagesResponse {
            items: ConvertedMessages::Acontext(vec![]),
            ids: vec![],
            metas: vec![],
            next_cursor: None,
            has_more: false,
            this_time_tokens: 0,
            edit_at_message_id: None,
            public_urls: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("next_cursor").is_none());
        assert!(value.get("edit_at_message_id").is_none());
        assert!(value.get("public_urls").is_none());
        assert_eq!(value["has_more"], false);
    }
}
