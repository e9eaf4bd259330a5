//! Session message endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, GetMessagesParams, MessagesResponse};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
