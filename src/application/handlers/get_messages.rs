//! GetMessagesHandler - assembles one page of session history in the
//! requested wire format.
//!
//! Pipeline: cursor page fetch (limit+1 over-fetch) -> edit-boundary token
//! accounting -> asset URL resolution -> format conversion -> user-meta
//! extraction -> response envelope. All steps are request-scoped; the only
//! await points are the two port calls.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::conversion::{ConvertedMessages, MessageFormat, PublicUrl};
use crate::domain::foundation::{DomainError, ErrorCode, MessageId, SessionId};
use crate::domain::message::{Message, MessageCursor};
use crate::ports::{AssetUrlResolver, MessageReader, TokenEstimator};

/// Query for one page of session messages.
#[derive(Debug, Clone)]
pub struct GetMessagesQuery {
    pub session_id: SessionId,
    /// Exclusive lower bound; `None` starts from the beginning.
    pub after: Option<MessageCursor>,
    pub limit: i64,
    pub format: MessageFormat,
    /// Message id where client-local edits begin. Reported back, never a
    /// destructive cutoff.
    pub edit_boundary_id: Option<MessageId>,
}

impl GetMessagesQuery {
    /// Query for the first page in the native format.
    pub fn first_page(session_id: SessionId, limit: i64) -> Self {
        Self {
            session_id,
            after: None,
            limit,
            format: MessageFormat::Acontext,
            edit_boundary_id: None,
        }
    }
}

/// One page of converted session history.
///
/// `ids` and `metas` are index-aligned 1:1 with the converted items and
/// with each other. Built per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePage {
    pub items: ConvertedMessages,
    pub ids: Vec<MessageId>,
    pub metas: Vec<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub this_time_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_at_message_id: Option<MessageId>,
    /// Asset URL substitutions used, exposed for the native format only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_urls: Option<HashMap<String, PublicUrl>>,
}

/// Handler for paginated message retrieval and conversion.
pub struct GetMessagesHandler {
    reader: Arc<dyn MessageReader>,
    asset_urls: Arc<dyn AssetUrlResolver>,
    estimator: Arc<dyn TokenEstimator>,
}

impl GetMessagesHandler {
    pub fn new(
        reader: Arc<dyn MessageReader>,
        asset_urls: Arc<dyn AssetUrlResolver>,
        estimator: Arc<dyn TokenEstimator>,
    ) -> Self {
        Self {
            reader,
            asset_urls,
            estimator,
        }
    }

    pub async fn handle(&self, query: GetMessagesQuery) -> Result<MessagePage, DomainError> {
        if query.limit <= 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidLimit,
                format!("limit must be a positive integer, got {}", query.limit),
            ));
        }

        let after = query.after.unwrap_or_default();

        // Over-fetch by one: the extra row only answers "is there more?".
        let mut messages = self
            .reader
            .list_after(
                &query.session_id,
                after.created_at(),
                after.id(),
                query.limit + 1,
            )
            .await?;

        let has_more = messages.len() as i64 > query.limit;
        if has_more {
            messages.truncate(query.limit as usize);
        }
        let next_cursor = if has_more {
            messages
                .last()
                .map(|m| MessageCursor::new(*m.created_at(), *m.id()).encode())
        } else {
            None
        };

        let (this_time_tokens, edit_at_message_id) =
            self.account_tokens(&messages, query.edit_boundary_id.as_ref());

        let urls = self.asset_urls.resolve(&messages).await?;

        let ids: Vec<MessageId> = messages.iter().map(|m| *m.id()).collect();
        let metas: Vec<Map<String, Value>> = messages.iter().map(Message::user_meta).collect();
        let items = query.format.convert(&messages, &urls);

        debug!(
            session_id = %query.session_id,
            format = %query.format,
            returned = messages.len(),
            has_more,
            "assembled message page"
        );

        let public_urls = match query.format {
            MessageFormat::Acontext if !urls.is_empty() => Some(urls),
            _ => None,
        };

        Ok(MessagePage {
            items,
            ids,
            metas,
            next_cursor,
            has_more,
            this_time_tokens,
            edit_at_message_id,
            public_urls,
        })
    }

    /// Sums the estimator over the messages that count toward the client's
    /// budget: everything at or after the edit boundary when the boundary
    /// is present in the page, everything otherwise.
    fn account_tokens(
        &self,
        messages: &[Message],
        edit_boundary_id: Option<&MessageId>,
    ) -> (u32, Option<MessageId>) {
        let boundary_index = edit_boundary_id
            .and_then(|boundary| messages.iter().position(|m| m.id() == boundary));

        let counted = match boundary_index {
            Some(index) => &messages[index..],
            None => messages,
        };

        let tokens = counted
            .iter()
            .map(|m| self.estimator.estimate(m))
            .sum::<u32>();

        (tokens, boundary_index.map(|i| *messages[i].id()))
    }
}
