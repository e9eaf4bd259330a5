//! Gemini-style transcript conversion.
//!
//! Gemini contents use camelCase part fields and a user/model role
//! vocabulary. Tool invocations become `functionCall` parts and results
//! `functionResponse` parts named after the originating tool so the pair
//! can be correlated.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::message::{Message, Part, PartKind, Role};

use super::{render_value, resolve_asset, AssetUrlMap};

#[derive(Debug, Clone, Serialize)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: GeminiFunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: GeminiFunctionResponse,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: GeminiFileData,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiFunctionCall {
    pub name: String,
    pub args: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiFunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiFileData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "fileUri")]
    pub file_uri: String,
}

pub(super) fn convert(messages: &[Message], urls: &AssetUrlMap) -> Vec<GeminiContent> {
    messages.iter().map(|m| convert_message(m, urls)).collect()
}

fn convert_message(message: &Message, urls: &AssetUrlMap) -> GeminiContent {
    GeminiContent {
        role: convert_role(message.role()),
        parts: message
            .parts()
            .iter()
            .map(|p| convert_part(p, urls))
            .collect(),
    }
}

fn convert_role(role: Role) -> String {
    match role {
        Role::Assistant => "model",
        Role::User | Role::System | Role::Tool => "user",
    }
    .to_string()
}

fn convert_part(part: &Part, urls: &AssetUrlMap) -> GeminiPart {
    match part.kind {
        PartKind::Text => GeminiPart::Text {
            text: part.text.clone().unwrap_or_default(),
        },
        PartKind::ToolCall => GeminiPart::FunctionCall {
            function_call: GeminiFunctionCall {
                name: part.meta_str("tool_name").unwrap_or("unknown").to_string(),
                args: part.meta.get("arguments").cloned().unwrap_or(json!({})),
            },
        },
        PartKind::ToolResult => {
            // Gemini correlates by function name; fall back to the call id
            // when the producing tool's name was not recorded.
            let name = part
                .meta_str("tool_name")
                .or(part.meta_str("tool_call_id"))
                .unwrap_or("unknown")
                .to_string();
            GeminiPart::FunctionResponse {
                function_response: GeminiFunctionResponse {
                    name,
                    response: part.meta.get("result").cloned().unwrap_or(Value::Null),
                },
            }
        }
        PartKind::Data => convert_data_part(part, urls),
    }
}

fn convert_data_part(part: &Part, urls: &AssetUrlMap) -> GeminiPart {
    if let Some(url) = resolve_asset(part, urls) {
        return GeminiPart::FileData {
            file_data: GeminiFileData {
                mime_type: part
                    .meta_str("data_type")
                    .unwrap_or("application/octet-stream")
                    .to_string(),
                file_uri: url,
            },
        };
    }
    GeminiPart::Text {
        text: render_value(part.meta.get("content").unwrap_or(&Value::Null)),
    }
}
