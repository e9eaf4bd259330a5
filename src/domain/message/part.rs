//! Message parts - the semantic units within a message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Tag over the supported part variants.
///
/// The tag determines which meta fields are mandatory; see
/// [`Part::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "tool-call")]
    ToolCall,
    #[serde(rename = "tool-result")]
    ToolResult,
    #[serde(rename = "data")]
    Data,
}

impl PartKind {
    /// Returns the wire string for this part type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Text => "text",
            PartKind::ToolCall => "tool-call",
            PartKind::ToolResult => "tool-result",
            PartKind::Data => "data",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PartKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(PartKind::Text),
            "tool-call" => Ok(PartKind::ToolCall),
            "tool-result" => Ok(PartKind::ToolResult),
            "data" => Ok(PartKind::Data),
            other => Err(DomainError::new(
                ErrorCode::UnsupportedPartType,
                format!("unsupported part type: {}", other),
            )),
        }
    }
}

/// One semantic unit within a message: text, a tool invocation, a tool
/// result, or opaque data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Variant tag. Determines which fields are mandatory.
    #[serde(rename = "type")]
    pub kind: PartKind,

    /// Text payload. Required non-empty for text parts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Variant-specific fields (tool_name, arguments, tool_call_id,
    /// data_type, content, asset_key, ...).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Text,
            text: Some(text.into()),
            meta: Map::new(),
        }
    }

    /// Creates a tool-call part.
    pub fn tool_call(tool_name: impl Into<String>, arguments: Value) -> Self {
        let mut meta = Map::new();
        meta.insert("tool_name".to_string(), Value::String(tool_name.into()));
        meta.insert("arguments".to_string(), arguments);
        Self {
            kind: PartKind::ToolCall,
            text: None,
            meta,
        }
    }

    /// Creates a tool-result part.
    pub fn tool_result(tool_call_id: impl Into<String>, result: Value) -> Self {
        let mut meta = Map::new();
        meta.insert(
            "tool_call_id".to_string(),
            Value::String(tool_call_id.into()),
        );
        meta.insert("result".to_string(), result);
        Self {
            kind: PartKind::ToolResult,
            text: None,
            meta,
        }
    }

    /// Creates a data part.
    pub fn data(data_type: impl Into<String>, content: Value) -> Self {
        let mut meta = Map::new();
        meta.insert("data_type".to_string(), Value::String(data_type.into()));
        meta.insert("content".to_string(), content);
        Self {
            kind: PartKind::Data,
            text: None,
            meta,
        }
    }

    /// Returns a meta field as a string slice, if present and a string.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }

    /// Validates the part against its variant's required fields.
    ///
    /// Deterministic, no side effects. Absence of a required field is a
    /// validation failure, never a silent default.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.kind {
            PartKind::Text => {
                if self.text.as_deref().unwrap_or("").is_empty() {
                    return Err(DomainError::validation(
                        "text",
                        "text part requires non-empty text field",
                    ));
                }
            }
            PartKind::ToolCall => {
                if !self.meta.contains_key("tool_name") {
                    return Err(DomainError::validation(
                        "tool_name",
                        "tool-call part requires 'tool_name' in meta",
                    ));
                }
                if !self.meta.contains_key("arguments") {
                    return Err(DomainError::validation(
                        "arguments",
                        "tool-call part requires 'arguments' in meta",
                    ));
                }
            }
            PartKind::ToolResult => {
                if !self.meta.contains_key("tool_call_id") {
                    return Err(DomainError::validation(
                        "tool_call_id",
                        "tool-result part requires 'tool_call_id' in meta",
                    ));
                }
            }
            PartKind::Data => {
                if !self.meta.contains_key("data_type") {
                    return Err(DomainError::validation(
                        "data_type",
                        "data part requires 'data_type' in meta",
                    ));
                }
            }
        }
        Ok(())
    }
}
