//! Route definitions for session message endpoints.

use axum::{routing::get, Router};

use super::handlers::{self, SessionHandlers};

/// Builds the session message router.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route(
            "/api/sessions/:session_id/messages",
            get(handlers::get_messages),
        )
        .with_state(handlers)
}
