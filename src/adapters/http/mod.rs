//! HTTP adapters (axum).

pub mod session;
