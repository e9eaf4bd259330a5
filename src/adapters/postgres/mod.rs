//! PostgreSQL adapters.

mod message_reader;

pub use message_reader::PostgresMessageReader;
