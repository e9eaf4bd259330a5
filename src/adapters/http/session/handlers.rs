//! HTTP handlers for session message endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::handlers::{GetMessagesHandler, GetMessagesQuery};
use crate::domain::conversion::MessageFormat;
use crate::domain::foundation::{DomainError, ErrorCode, MessageId, SessionId};
use crate::domain::message::MessageCursor;

use super::dto::{ErrorResponse, GetMessagesParams, MessagesResponse};

#[derive(Clone)]
pub struct SessionHandlers {
    get_messages: Arc<GetMessagesHandler>,
}

impl SessionHandlers {
    pub fn new(get_messages: Arc<GetMessagesHandler>) -> Self {
        Self { get_messages }
    }
}

/// GET /api/sessions/:session_id/messages - paginated history in the
/// requested format.
///
/// Input validation (session id, cursor, format, limit) happens here and
/// in the query handler before any store access.
pub async fn get_messages(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    Query(params): Query<GetMessagesParams>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid session ID")),
            )
                .into_response()
        }
    };

    let after = match params.cursor.as_deref() {
        Some(raw) => match raw.parse::<MessageCursor>() {
            Ok(cursor) => Some(cursor),
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(e.message)),
                )
                    .into_response()
            }
        },
        None => None,
    };

    let format = match params.format.as_deref().unwrap_or("").parse::<MessageFormat>() {
        Ok(format) => format,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.message)),
            )
                .into_response()
        }
    };

    let edit_boundary_id = match params.edit_boundary_id.as_deref() {
        Some(raw) => match raw.parse::<MessageId>() {
            Ok(id) => Some(id),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request("Invalid edit boundary message ID")),
                )
                    .into_response()
            }
        },
        None => None,
    };

    let query = GetMessagesQuery {
        session_id,
        after,
        limit: params.limit,
        format,
        edit_boundary_id,
    };

    match handlers.get_messages.handle(query).await {
        Ok(page) => {
            let response: MessagesResponse = page.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_domain_error(e),
    }
}

fn handle_domain_error(error: DomainError) -> Response {
    if error.code.is_validation() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.message)),
        )
            .into_response();
    }
    match error.code {
        ErrorCode::SessionNotFound | ErrorCode::MessageNotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.message)),
        )
            .into_response(),
        _ => {
            error!(code = %error.code, "message retrieval failed: {}", error.message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(error.message)),
            )
                .into_response()
        }
    }
}
