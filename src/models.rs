use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_CONTEXT: usize = 8192;
pub const DEFAULT_ENCODING: &str = "cl100k_base";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCapability {
    pub max_context: usize,
    pub vision: bool,
    pub encoding: &'static str,
}

#[derive(Serialize, Debug, Clone)]
pub struct ModelEntry {
    pub name: &'static str,
    #[serde(flatten)]
    pub capability: ModelCapability,
}

const fn cap(max_context: usize, vision: bool, encoding: &'static str) -> ModelCapability {
    ModelCapability {
        max_context,
        vision,
        encoding,
    }
}

lazy_static! {
    static ref CAPABILITIES: HashMap<&'static str, ModelCapability> = {
        let mut m = HashMap::new();
        m.insert("gpt-4", cap(8192, true, "cl100k_base"));
        m.insert("gpt-4-32k", cap(32768, true, "cl100k_base"));
        m.insert("gpt-4o", cap(128_000, true, "o200k_base"));
        m.insert("gpt-3.5-turbo", cap(4096, false, "cl100k_base"));
        m.insert("gpt-3.5-turbo-16k", cap(16384, false, "cl100k_base"));
        m.insert("gpt-2", cap(2048, false, "gpt2"));
        m.insert("text-davinci-003", cap(4097, false, "p50k_base"));
        m.insert("text-davinci-002", cap(4097, false, "p50k_base"));
        m.insert("code-davinci-002", cap(8001, false, "p50k_base"));
        m.insert("code-davinci-001", cap(8001, false, "p50k_base"));
        m.insert("text-curie-001", cap(2049, false, "r50k_base"));
        m.insert("text-babbage-001", cap(2049, false, "r50k_base"));
        m.insert("text-ada-001", cap(2049, false, "r50k_base"));
        m.insert("davinci", cap(2049, false, "r50k_base"));
        m.insert("curie", cap(2049, false, "r50k_base"));
        m.insert("babbage", cap(2049, false, "r50k_base"));
        m.insert("ada", cap(2049, false, "r50k_base"));
        m
    };
}

/// Capability of a known model, if listed.
pub fn lookup(model: &str) -> Option<ModelCapability> {
    CAPABILITIES.get(model).copied()
}

/// Capability of `model`, or the defaults for unknown models.
pub fn capability(model: &str) -> ModelCapability {
    lookup(model).unwrap_or(cap(DEFAULT_MAX_CONTEXT, false, DEFAULT_ENCODING))
}

pub fn all() -> Vec<ModelEntry> {
    let mut entries: Vec<ModelEntry> = CAPABILITIES
        .iter()
        .map(|(name, capability)| ModelEntry {
            name: *name,
            capability: *capability,
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(b.name));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Encoding;

    #[test]
    fn test_known_models() {
        assert_eq!(capability("gpt-4").max_context, 8192);
        assert!(capability("gpt-4o").vision);
        assert_eq!(capability("gpt-4o").encoding, "o200k_base");
        assert_eq!(capability("gpt-2").encoding, "gpt2");
        assert_eq!(capability("ada").max_context, 2049);
    }

    #[test]
    fn test_unknown_model_defaults() {
        assert!(lookup("llama-3").is_none());
        let c = capability("llama-3");
        assert_eq!(c.max_context, DEFAULT_MAX_CONTEXT);
        assert!(!c.vision);
        assert_eq!(c.encoding, DEFAULT_ENCODING);
    }

    #[test]
    fn test_every_encoding_parses() {
        for entry in all() {
            assert!(
                entry.capability.encoding.parse::<Encoding>().is_ok(),
                "{} has unknown encoding {}",
                entry.name,
                entry.capability.encoding
            );
        }
    }

    #[test]
    fn test_all_sorted() {
        let names: Vec<&str> = all().iter().map(|e| e.name).collect();
        assert_eq!(names.len(), 17);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
