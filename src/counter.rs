use crate::estimator::Estimator;
use crate::tokens::{Codec, WordCounter};
use serde::Serialize;

/// Anything that can put a token count on a piece of text.
///
/// Implemented by the heuristic [`Estimator`], the exact BPE [`Codec`] and the
/// [`WordCounter`] fallback, so chunking and reporting can take whichever is
/// available.
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> usize;

    /// Name reported alongside counts (model, encoding or method).
    fn label(&self) -> &str;
}

/// How a count was produced.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CountMethod {
    Exact,
    Heuristic,
    Fallback,
}

impl CountMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            CountMethod::Exact => "exact",
            CountMethod::Heuristic => "heuristic",
            CountMethod::Fallback => "fallback",
        }
    }
}

pub struct SelectedCounter {
    pub counter: Box<dyn TokenCounter + Send + Sync>,
    pub method: CountMethod,
}

/// Choose the counter for a request: the heuristic estimator when asked for,
/// otherwise the exact codec for `model`/`encoding`, or a word count when no
/// codec can be loaded.
pub fn select(model: &str, encoding: Option<&str>, heuristic: bool) -> SelectedCounter {
    if heuristic {
        return SelectedCounter {
            counter: Box::new(Estimator::new()),
            method: CountMethod::Heuristic,
        };
    }

    match Codec::resolve(model, encoding) {
        Ok(codec) => {
            tracing::debug!(model, label = codec.label(), "using exact tokenizer");
            SelectedCounter {
                counter: Box::new(codec),
                method: CountMethod::Exact,
            }
        }
        Err(e) => {
            tracing::warn!(model, ?encoding, error = %e, "exact tokenizer unavailable, counting words");
            SelectedCounter {
                counter: Box::new(WordCounter),
                method: CountMethod::Fallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_heuristic() {
        let selected = select("gpt-4", None, true);
        assert_eq!(selected.method, CountMethod::Heuristic);
        assert_eq!(selected.counter.label(), "simple");
        assert_eq!(selected.counter.count_tokens("hello world"), 7);
    }

    #[test]
    fn test_select_exact() {
        let selected = select("gpt-4", Some("cl100k_base"), false);
        assert_eq!(selected.method, CountMethod::Exact);
        assert_eq!(selected.counter.label(), "cl100k_base");
        assert_eq!(selected.counter.count_tokens("Hello world"), 2);
    }

    #[test]
    fn test_select_falls_back() {
        let selected = select("no-such-model", None, false);
        assert_eq!(selected.method, CountMethod::Fallback);
        assert_eq!(selected.counter.count_tokens("hello, world! how are you?"), 5);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(CountMethod::Exact.as_str(), "exact");
        assert_eq!(
            serde_json::to_string(&CountMethod::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
