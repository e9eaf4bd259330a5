//! Application layer - query handlers orchestrating ports and domain services.

pub mod handlers;
