//! OpenAI-style transcript conversion.
//!
//! Tool invocations become `tool_calls` entries on the message; a message
//! carrying tool-result parts gets the originating `tool_call_id` so the
//! response can be matched back to its call. Content stays an array of
//! typed blocks so per-part structure survives the trip.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::message::{Message, Part, PartKind};

use super::{render_value, resolve_asset, tool_call_id, AssetUrlMap};

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<OpenAiContentPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAiToolCall>>,
    /// Set when the message carries tool-result parts; references the
    /// originating call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OpenAiContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: OpenAiImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: OpenAiFunctionCall,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenAiFunctionCall {
    pub name: String,
    /// JSON-encoded argument object, per the OpenAI wire convention.
    pub arguments: String,
}

pub(super) fn convert(messages: &[Message], urls: &AssetUrlMap) -> Vec<OpenAiMessage> {
    messages.iter().map(|m| convert_message(m, urls)).collect()
}

fn convert_message(message: &Message, urls: &AssetUrlMap) -> OpenAiMessage {
    let mut out = OpenAiMessage {
        role: message.role().as_str().to_string(),
        content: Vec::new(),
        tool_calls: None,
        tool_call_id: None,
    };

    for part in message.parts() {
        match part.kind {
            PartKind::Text => out.content.push(OpenAiContentPart::Text {
                text: part.text.clone().unwrap_or_default(),
            }),
            PartKind::ToolCall => {
                let arguments = part.meta.get("arguments").cloned().unwrap_or(json!({}));
                out.tool_calls
                    .get_or_insert_with(Vec::new)
                    .push(OpenAiToolCall {
                        id: tool_call_id(part),
                        kind: "function",
                        function: OpenAiFunctionCall {
                            name: part.meta_str("tool_name").unwrap_or("unknown").to_string(),
                            arguments: arguments.to_string(),
                        },
                    });
            }
            PartKind::ToolResult => {
                // First result part wins the message-level linkage.
                if out.tool_call_id.is_none() {
                    out.tool_call_id = part.meta_str("tool_call_id").map(str::to_string);
                }
                let result = part.meta.get("result").cloned().unwrap_or(Value::Null);
                out.content.push(OpenAiContentPart::Text {
                    text: render_value(&result),
                });
            }
            PartKind::Data => out.content.push(convert_data_part(part, urls)),
        }
    }

    out
}

fn convert_data_part(part: &Part, urls: &AssetUrlMap) -> OpenAiContentPart {
    let data_type = part.meta_str("data_type").unwrap_or("");
    if let Some(url) = resolve_asset(part, urls) {
        if data_type.starts_with("image/") {
            return OpenAiContentPart::ImageUrl {
                image_url: OpenAiImageUrl { url },
            };
        }
        return OpenAiContentPart::Text { text: url };
    }
    let content = part.meta.get("content").cloned().unwrap_or(Value::Null);
    OpenAiContentPart::Text {
        text: render_value(&content),
    }
}
