use crate::counter::TokenCounter;
use crate::fold;
use num_integer::Integer;

/// Label reported by the heuristic estimator.
pub const DEFAULT_MODEL: &str = "simple";

/// Ordinary characters charged per token.
pub const CHARS_PER_TOKEN: usize = 2;

/// Heuristic token estimator.
///
/// Roughly two letters or digits cost one token, and every other character
/// (whitespace, punctuation, symbols) costs one token on its own. Text is
/// folded to ASCII before counting, so characters without an ASCII form cost
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    model: &'static str,
}

impl Estimator {
    pub fn new() -> Self {
        Estimator {
            model: DEFAULT_MODEL,
        }
    }

    pub fn model(&self) -> &str {
        self.model
    }

    pub fn estimate(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        count_normalized(&self.normalize(text))
    }

    /// Fold `text` into the ASCII range.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        fold::fold_text(text)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for Estimator {
    fn count_tokens(&self, text: &str) -> usize {
        self.estimate(text)
    }

    fn label(&self) -> &str {
        self.model
    }
}

/// Count tokens in text that has already been folded.
///
/// Consecutive letters and digits form a run charged `ceil(run / 2)`. Any
/// other character closes the current run and is charged one token itself.
pub fn count_normalized(normalized: &str) -> usize {
    let mut total = 0;
    let mut run = 0;

    for c in normalized.chars() {
        if is_special(c) {
            total += run_tokens(run);
            run = 0;
            total += 1;
            continue;
        }

        run += 1;
    }

    total + run_tokens(run)
}

#[inline]
fn run_tokens(run: usize) -> usize {
    if run == 0 {
        return 0;
    }

    Integer::div_ceil(&run, &CHARS_PER_TOKEN)
}

#[inline]
fn is_special(c: char) -> bool {
    !c.is_alphanumeric()
}
