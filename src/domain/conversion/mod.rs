//! Conversion of canonical messages into provider wire formats.
//!
//! The format set is closed and known at compile time, so selection is a
//! plain enum dispatch. Every variant preserves message count, per-message
//! part count, and ordering; a malformed part renders as a best-effort
//! placeholder rather than failing the batch. Only the format tag itself
//! can be invalid, and that is rejected at parse time before any fetch.

mod acontext;
mod anthropic;
mod gemini;
mod openai;

pub use anthropic::{AnthropicBlock, AnthropicImageSource, AnthropicMessage};
pub use gemini::{GeminiContent, GeminiFileData, GeminiFunctionCall, GeminiFunctionResponse, GeminiPart};
pub use openai::{OpenAiContentPart, OpenAiFunctionCall, OpenAiImageUrl, OpenAiMessage, OpenAiToolCall};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::message::{Message, Part};

/// A time-limited public URL resolved from an opaque asset key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUrl {
    pub url: String,
    pub expires_at: Timestamp,
}

/// Pre-resolved asset URL substitutions, keyed by asset key.
pub type AssetUrlMap = HashMap<String, PublicUrl>;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// Native pass-through projection (the default).
    #[default]
    Acontext,
    OpenAi,
    Anthropic,
    Gemini,
}

impl MessageFormat {
    /// Returns the wire string for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageFormat::Acontext => "acontext",
            MessageFormat::OpenAi => "openai",
            MessageFormat::Anthropic => "anthropic",
            MessageFormat::Gemini => "gemini",
        }
    }

    /// Converts a message batch into this format.
    ///
    /// Infallible for a typed format: per-part problems degrade to
    /// placeholders, and a missing asset URL mapping leaves the raw key
    /// in the output.
    pub fn convert(&self, messages: &[Message], urls: &AssetUrlMap) -> ConvertedMessages {
        match self {
            MessageFormat::Acontext => ConvertedMessages::Acontext(acontext::convert(messages)),
            MessageFormat::OpenAi => ConvertedMessages::OpenAi(openai::convert(messages, urls)),
            MessageFormat::Anthropic => {
                ConvertedMessages::Anthropic(anthropic::convert(messages, urls))
            }
            MessageFormat::Gemini => ConvertedMessages::Gemini(gemini::convert(messages, urls)),
        }
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // Absent tag defaults to the native format.
            "" | "acontext" => Ok(MessageFormat::Acontext),
            "openai" => Ok(MessageFormat::OpenAi),
            "anthropic" => Ok(MessageFormat::Anthropic),
            "gemini" => Ok(MessageFormat::Gemini),
            other => Err(DomainError::new(
                ErrorCode::UnsupportedFormat,
                format!(
                    "invalid format: {}, supported formats: acontext, openai, anthropic, gemini",
                    other
                ),
            )),
        }
    }
}

/// Format-dependent conversion output.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ConvertedMessages {
    Acontext(Vec<Message>),
    OpenAi(Vec<OpenAiMessage>),
    Anthropic(Vec<AnthropicMessage>),
    Gemini(Vec<GeminiContent>),
}

impl ConvertedMessages {
    /// Number of converted messages, across all variants.
    pub fn len(&self) -> usize {
        match self {
            ConvertedMessages::Acontext(v) => v.len(),
            ConvertedMessages::OpenAi(v) => v.len(),
            ConvertedMessages::Anthropic(v) => v.len(),
            ConvertedMessages::Gemini(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renders a meta value for a text-bearing slot: strings pass through,
/// anything else serializes to compact JSON.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolves a part's asset reference to a public URL, falling back to the
/// raw key when no mapping exists. `None` when the part carries no asset.
pub(crate) fn resolve_asset(part: &Part, urls: &AssetUrlMap) -> Option<String> {
    let key = part.meta_str("asset_key")?;
    Some(
        urls.get(key)
            .map(|u| u.url.clone())
            .unwrap_or_else(|| key.to_string()),
    )
}

/// Tool-call identifier: `tool_call_id` from meta when present, otherwise
/// a deterministic name-derived fallback so paired results can still be
/// correlated by readers.
pub(crate) fn tool_call_id(part: &Part) -> String {
    match part.meta_str("tool_call_id") {
        Some(id) => id.to_string(),
        None => format!("call_{}", part.meta_str("tool_name").unwrap_or("unknown")),
    }
}
