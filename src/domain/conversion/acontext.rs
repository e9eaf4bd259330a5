//! Native format: pass-through projection.
//!
//! Messages are returned materially unchanged. This is the only variant
//! whose envelope additionally exposes the asset URL map itself; asset
//! keys inside parts stay opaque here.

use crate::domain::message::Message;

pub(super) fn convert(messages: &[Message]) -> Vec<Message> {
    messages.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::message::{Part, Role};

    #[test]
    fn returns_messages_unchanged() {
        let messages = vec![Message::new(
            SessionId::new(),
            Role::Assistant,
            vec![Part::text("unchanged")],
            None,
        )
        .unwrap()];

        let converted = convert(&messages);
        assert_eq!(converted, messages);
    }
}
