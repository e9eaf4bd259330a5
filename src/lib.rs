//! Acontext - Conversation Session Backend
//!
//! Stores chat messages per session and serves paginated history in one of
//! several LLM provider wire formats (native acontext, OpenAI, Anthropic,
//! Gemini).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
