use crate::counter::TokenCounter;
use crate::models;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tiktoken_rs::CoreBPE;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("no tokenizer available for model: {0}")]
    UnknownModel(String),

    #[error("failed to load encoding {name}: {reason}")]
    Load { name: String, reason: String },

    #[error("decoding failed: {0}")]
    Decode(String),

    #[error("invalid token ID: {0}")]
    InvalidTokenId(String),
}

/// BPE encodings shipped with tiktoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    O200kBase,
    Cl100kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
    Gpt2,
}

impl Encoding {
    pub const ALL: [Encoding; 6] = [
        Encoding::O200kBase,
        Encoding::Cl100kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
        Encoding::Gpt2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::O200kBase => "o200k_base",
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
            Encoding::Gpt2 => "gpt2",
        }
    }

    fn load(self) -> Result<CoreBPE, TokenizerError> {
        // gpt2 shares its ranks with r50k_base.
        let loaded = match self {
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::P50kEdit => tiktoken_rs::p50k_edit(),
            Encoding::R50kBase | Encoding::Gpt2 => tiktoken_rs::r50k_base(),
        };

        loaded.map_err(|e| TokenizerError::Load {
            name: self.as_str().to_string(),
            reason: e.to_string(),
        })
    }
}

impl FromStr for Encoding {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Encoding::ALL
            .into_iter()
            .find(|e| e.as_str() == name)
            .ok_or_else(|| TokenizerError::UnknownEncoding(s.to_string()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded BPE tokenizer.
pub struct Codec {
    label: String,
    bpe: CoreBPE,
}

impl Codec {
    pub fn for_encoding(encoding: Encoding) -> Result<Self, TokenizerError> {
        Ok(Codec {
            label: encoding.as_str().to_string(),
            bpe: encoding.load()?,
        })
    }

    /// Load the encoding tiktoken associates with `model`, falling back to the
    /// encoding listed in the capability table for models tiktoken does not
    /// know by that name.
    pub fn for_model(model: &str) -> Result<Self, TokenizerError> {
        if let Ok(bpe) = tiktoken_rs::get_bpe_from_model(model) {
            return Ok(Codec {
                label: model.to_string(),
                bpe,
            });
        }

        let capability =
            models::lookup(model).ok_or_else(|| TokenizerError::UnknownModel(model.to_string()))?;
        let encoding: Encoding = capability.encoding.parse()?;

        Ok(Codec {
            label: model.to_string(),
            bpe: encoding.load()?,
        })
    }

    /// An explicit encoding takes precedence over the model name.
    pub fn resolve(model: &str, encoding: Option<&str>) -> Result<Self, TokenizerError> {
        match encoding {
            Some(name) => Self::for_encoding(name.parse()?),
            None => Self::for_model(model),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Encode text without treating special token markers specially.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        if text.is_empty() {
            return Vec::new();
        }

        self.bpe.encode_ordinary(text)
    }

    pub fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        if ids.is_empty() {
            return Ok(String::new());
        }

        self.bpe
            .decode(ids.to_vec())
            .map_err(|e| TokenizerError::Decode(e.to_string()))
    }

    pub fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

impl TokenCounter for Codec {
    fn count_tokens(&self, text: &str) -> usize {
        self.count(text)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Counts whitespace separated words. Used when no exact codec is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> usize {
        fallback_count(text)
    }

    fn label(&self) -> &str {
        "words"
    }
}

#[inline]
pub fn fallback_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count tokens with the exact codec for `model` (or `encoding`), or fall back
/// to a word count if none can be loaded.
pub fn count_tokens(text: &str, model: &str, encoding: Option<&str>) -> usize {
    if text.is_empty() {
        return 0;
    }

    match Codec::resolve(model, encoding) {
        Ok(codec) => codec.count(text),
        Err(e) => {
            tracing::warn!(model, ?encoding, error = %e, "exact tokenizer unavailable, counting words");
            fallback_count(text)
        }
    }
}

/// Parse comma separated token ids such as `"15496, 1917"`.
pub fn parse_token_ids(input: &str) -> Result<Vec<u32>, TokenizerError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| TokenizerError::InvalidTokenId(s.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hello_world_count() {
        let text = "hello world";
        // cl100k_base encodes to 2 tokens. Allow ±1 tolerance.
        let tokens = count_tokens(text, "gpt-4", Some("cl100k_base"));
        assert!(
            (1..=3).contains(&tokens),
            "expected 1-3 tokens, got {}",
            tokens
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(count_tokens("", "gpt-4", None), 0);
        let codec = Codec::for_encoding(Encoding::Cl100kBase).unwrap();
        assert!(codec.encode("").is_empty());
        assert_eq!(codec.decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!("cl100k_base".parse::<Encoding>().unwrap(), Encoding::Cl100kBase);
        assert_eq!("O200K_BASE".parse::<Encoding>().unwrap(), Encoding::O200kBase);
        assert_eq!("gpt2".parse::<Encoding>().unwrap(), Encoding::Gpt2);
        assert!(matches!(
            "invalid-encoding".parse::<Encoding>(),
            Err(TokenizerError::UnknownEncoding(_))
        ));
        for enc in Encoding::ALL {
            assert_eq!(enc.to_string().parse::<Encoding>().unwrap(), enc);
        }
    }

    #[test]
    fn test_encode_decode() {
        let codec = Codec::for_encoding(Encoding::Cl100kBase).unwrap();
        let ids = codec.encode("Hello world");
        assert_eq!(ids.len(), 2);
        assert_eq!(codec.decode(&ids).unwrap(), "Hello world");
    }

    #[test]
    fn test_codec_for_models() {
        assert!(Codec::for_model("gpt-4").is_ok());
        assert!(Codec::for_model("gpt-3.5-turbo").is_ok());
        assert!(Codec::for_model("text-davinci-003").is_ok());
        assert!(matches!(
            Codec::for_model("invalid-model"),
            Err(TokenizerError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_encoding() {
        let codec = Codec::resolve("invalid-model", Some("p50k_base")).unwrap();
        assert_eq!(codec.label(), "p50k_base");
        assert!(Codec::resolve("gpt-4", Some("invalid-encoding")).is_err());
    }

    #[test]
    fn test_unknown_model_falls_back_to_words() {
        assert_eq!(count_tokens("hello world how are you", "invalid-model", None), 5);
    }

    #[test]
    fn test_fallback_count() {
        assert_eq!(fallback_count(""), 0);
        assert_eq!(fallback_count("hello"), 1);
        assert_eq!(fallback_count("hello world"), 2);
        assert_eq!(fallback_count("hello, world! how are you?"), 5);
        assert_eq!(fallback_count("hello 123 world 456"), 4);
        assert_eq!(fallback_count("hello @#$ world"), 3);
        assert_eq!(WordCounter.count_tokens("a  b\n\tc"), 3);
    }

    #[test]
    fn test_parse_token_ids() {
        assert_eq!(parse_token_ids("15496,1917").unwrap(), vec![15496, 1917]);
        assert_eq!(parse_token_ids(" 1 , ,2 ").unwrap(), vec![1, 2]);
        assert!(parse_token_ids("").unwrap().is_empty());
        assert!(matches!(
            parse_token_ids("12,abc"),
            Err(TokenizerError::InvalidTokenId(ref s)) if s == "abc"
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn token_bounds(s in "[a-zA-Z0-9 ]{0,200}") {
            let byte_len = s.len();
            let tokens = count_tokens(&s, "gpt-4", None);
            prop_assert!(tokens >= byte_len / 6, "too small: {} vs {}", tokens, byte_len);
            prop_assert!(tokens <= byte_len * 2 + 1, "too big: {} vs {}", tokens, byte_len);
        }
    }
}
