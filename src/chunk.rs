use crate::counter::TokenCounter;
use crate::models::{ModelCapability, DEFAULT_MAX_CONTEXT};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub tokens: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// Pick the chunk size: explicit size, then budget, then the model's context
/// window.
pub fn resolve_chunk_size(
    chunk_size: Option<usize>,
    budget: Option<usize>,
    capability: &ModelCapability,
) -> usize {
    let size = chunk_size.or(budget).unwrap_or(capability.max_context);
    if size == 0 {
        DEFAULT_MAX_CONTEXT
    } else {
        size
    }
}

/// Greedily pack whitespace separated words into chunks of at most
/// `max_tokens`, as counted by `counter`.
///
/// A word that alone exceeds the budget still gets a chunk of its own.
pub fn chunk_text<C>(text: &str, max_tokens: usize, counter: &C) -> Vec<Chunk>
where
    C: TokenCounter + ?Sized,
{
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut candidate = current.clone();
        if !candidate.is_empty() {
            candidate.push(' ');
        }
        candidate.push_str(word);

        if !current.is_empty() && counter.count_tokens(&candidate) > max_tokens {
            tracing::debug!(index = chunks.len(), "chunk full");
            push_chunk(&mut chunks, std::mem::take(&mut current), counter);
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        push_chunk(&mut chunks, current, counter);
    }

    chunks
}

fn push_chunk<C>(chunks: &mut Vec<Chunk>, text: String, counter: &C)
where
    C: TokenCounter + ?Sized,
{
    chunks.push(Chunk {
        index: chunks.len(),
        tokens: counter.count_tokens(&text),
        text,
    });
}
