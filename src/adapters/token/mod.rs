//! Token estimation adapters.

mod heuristic;

pub use heuristic::HeuristicTokenEstimator;
