//! Character-ratio token estimator.

use crate::domain::message::{Message, Part};
use crate::ports::TokenEstimator;

/// Default chars-per-token ratio for English-heavy chat text.
const CHARS_PER_TOKEN: usize = 4;

/// Estimates tokens from character counts over part text and meta.
///
/// An approximation for budget displays only; callers needing model-exact
/// counts supply their own [`TokenEstimator`].
#[derive(Debug, Clone, Default)]
pub struct HeuristicTokenEstimator;

impl TokenEstimator for HeuristicTokenEstimator {
    fn estimate(&self, message: &Message) -> u32 {
        let chars: usize = message.parts().iter().map(part_chars).sum();
        ((chars + CHARS_PER_TOKEN - 1) / CHARS_PER_TOKEN) as u32
    }
}

fn part_chars(part: &Part) -> usize {
    let text_len = part.text.as_deref().map(str::len).unwrap_or(0);
    let meta_len = if part.meta.is_empty() {
        0
    } else {
        serde_json::to_string(&part.meta).map(|s| s.len()).unwrap_or(0)
    };
    text_len + meta_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::message::Role;
    use serde_json::json;

    fn msg(parts: Vec<Part>) -> Message {
        Message::new(SessionId::new(), Role::User, parts, None).unwrap()
    }

    #[test]
    fn estimates_from_text_length() {
        let message = msg(vec![Part::text("abcdefgh")]);
        assert_eq!(HeuristicTokenEstimator.estimate(&message), 2);
    }

    #[test]
    fn rounds_up_partial_tokens() {
        let message = msg(vec![Part::text("abcde")]);
        assert_eq!(HeuristicTokenEstimator.estimate(&message), 2);
    }

    #[test]
    fn counts_meta_for_tool_parts() {
        let message = msg(vec![Part::tool_call("calculator", json!({"a": 1}))]);
        assert!(HeuristicTokenEstimator.estimate(&message) > 0);
    }
}
