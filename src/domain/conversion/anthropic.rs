//! Anthropic-style transcript conversion.
//!
//! Every part maps to a typed content block. Tool invocations become
//! `tool_use` blocks and tool results `tool_result` blocks referencing
//! the originating `tool_use` id. Tool turns ride as user messages, per
//! the Anthropic transcript convention.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::message::{Message, Part, PartKind, Role};

use super::{render_value, resolve_asset, tool_call_id, AssetUrlMap};

#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: Vec<AnthropicBlock>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
    Image {
        source: AnthropicImageSource,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AnthropicImageSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub url: String,
}

pub(super) fn convert(messages: &[Message], urls: &AssetUrlMap) -> Vec<AnthropicMessage> {
    messages.iter().map(|m| convert_message(m, urls)).collect()
}

fn convert_message(message: &Message, urls: &AssetUrlMap) -> AnthropicMessage {
    AnthropicMessage {
        role: convert_role(message.role()),
        content: message
            .parts()
            .iter()
            .map(|p| convert_part(p, urls))
            .collect(),
    }
}

fn convert_role(role: Role) -> String {
    match role {
        Role::Assistant => "assistant",
        Role::System => "system",
        // Tool results ride in user turns.
        Role::User | Role::Tool => "user",
    }
    .to_string()
}

fn convert_part(part: &Part, urls: &AssetUrlMap) -> AnthropicBlock {
    match part.kind {
        PartKind::Text => AnthropicBlock::Text {
            text: part.text.clone().unwrap_or_default(),
        },
        PartKind::ToolCall => AnthropicBlock::ToolUse {
            id: tool_call_id(part),
            name: part.meta_str("tool_name").unwrap_or("unknown").to_string(),
            input: part.meta.get("arguments").cloned().unwrap_or(json!({})),
        },
        PartKind::ToolResult => AnthropicBlock::ToolResult {
            tool_use_id: part.meta_str("tool_call_id").unwrap_or_default().to_string(),
            content: render_value(part.meta.get("result").unwrap_or(&Value::Null)),
        },
        PartKind::Data => convert_data_part(part, urls),
    }
}

fn convert_data_part(part: &Part, urls: &AssetUrlMap) -> AnthropicBlock {
    let data_type = part.meta_str("data_type").unwrap_or("");
    if let Some(url) = resolve_asset(part, urls) {
        if data_type.starts_with("image/") {
            return AnthropicBlock::Image {
                source: AnthropicImageSource { kind: "url", url },
            };
        }
        return AnthropicBlock::Text { text: url };
    }
    AnthropicBlock::Text {
        text: render_value(part.meta.get("content").unwrap_or(&Value::Null)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use serde_json::json;

    fn msg(role: Role, parts: Vec<Part>) -> Message {
        Message::new(SessionId::new(), role, parts, None).unwrap()
    }

    #[test]
    fn parts_map_to_typed_blocks_in_order() {
        let call = {
            let mut p = Part::tool_call("search", json!({"q": "rust"}));
            p.meta.insert("tool_call_id".to_string(), json!("toolu_01"));
            p
        };
        let out = convert(
            &[msg(Role::Assistant, vec![Part::text("looking"), call])],
            &AssetUrlMap::new(),
        );

        assert_eq!(out[0].role, "assistant");
        assert_eq!(out[0].content.len(), 2);
        match &out[0].content[1] {
            AnthropicBlock::ToolUse { id, name, input } => {
                assert_eq!(id, "toolu_01");
                assert_eq!(name, "search");
                assert_eq!(input["q"], "rust");
            }
            other => panic!("expected tool_use block, got {:?}", other),
        }
    }

    #[test]
    fn tool_result_references_tool_use_id() {
        let out = convert(
            &[msg(Role::Tool, vec![Part::tool_result("toolu_01", json!("ok"))])],
            &AssetUrlMap::new(),
        );

        assert_eq!(out[0].role, "user");
        match &out[0].content[0] {
            AnthropicBlock::ToolResult {
                tool_use_id,
                content,
            } => {
                assert_eq!(tool_use_id, "toolu_01");
                assert_eq!(content, "ok");
            }
            other => panic!("expected tool_result block, got {:?}", other),
        }
    }

    #[test]
    fn block_serialization_uses_snake_case_tags() {
        let block = AnthropicBlock::ToolUse {
            id: "toolu_01".to_string(),
            name: "search".to_string(),
            input: json!({}),
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_use");
    }

    #[test]
    fn non_image_data_renders_as_text_url() {
        let mut part = Part::data("application/pdf", json!(null));
        part.meta.insert("asset_key".to_string(), json!("docs/a.pdf"));

        let out = convert(&[msg(Role::User, vec![part])], &AssetUrlMap::new());
        match &out[0].content[0] {
            AnthropicBlock::Text { text } => assert_eq!(text, "docs/a.pdf"),
            other => panic!("expected text block, got {:?}", other),
        }
    }
}
