//! Token budgeting for LLM prompts.
//!
//! [`Estimator`] gives a cheap heuristic count (ASCII folding plus a
//! character-ratio rule). [`Codec`] wraps tiktoken for exact counts, and
//! [`chunk_text`] splits text to fit a budget with either of them.

pub mod chunk;
pub mod counter;
pub mod estimator;
pub mod fold;
pub mod models;
pub mod output;
pub mod tokens;

pub use chunk::{chunk_text, resolve_chunk_size, Chunk};
pub use counter::{select, CountMethod, SelectedCounter, TokenCounter};
pub use estimator::Estimator;
pub use models::ModelCapability;
pub use output::{OutputFormat, TokenReport};
pub use tokens::{count_tokens, Codec, Encoding, TokenizerError, WordCounter};

/// Heuristic estimate of the tokens in `text`.
pub fn estimate(text: &str) -> usize {
    Estimator::new().estimate(text)
}

/// Fold `text` into the ASCII range.
pub fn normalize(text: &str) -> String {
    Estimator::new().normalize(text)
}
