pub mod json;
pub mod text;
pub mod xml;

use crate::chunk::Chunk;
use crate::counter::CountMethod;
use crate::models::ModelEntry;
use serde::Serialize;
use std::error::Error;
use std::str::FromStr;

pub use text::truncate_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Xml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(format!("Invalid format: {}. Use text, json, or xml", s)),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FileTokens {
    pub path: String,
    pub tokens: usize,
}

/// Result of any counting command.
#[derive(Serialize, Debug, Clone, Default)]
pub struct TokenReport {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CountMethod>,
    pub tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_budget: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileTokens>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chunks: Vec<Chunk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_ids: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
}

impl TokenReport {
    pub fn new(model: impl Into<String>, tokens: usize) -> Self {
        TokenReport {
            model: model.into(),
            tokens,
            ..TokenReport::default()
        }
    }

    /// Record `budget` and whether the token count fits in it.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = Some(budget);
        self.within_budget = Some(self.tokens <= budget);
        self
    }

    /// Tokens over budget, zero when within it or when no budget is set.
    pub fn overage(&self) -> usize {
        self.budget
            .map(|b| self.tokens.saturating_sub(b))
            .unwrap_or(0)
    }
}

pub fn render(report: &TokenReport, format: OutputFormat, color: bool) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(text::render(report, color)),
        OutputFormat::Json => Ok(json::render(report)?),
        OutputFormat::Xml => xml::render(report),
    }
}

pub fn render_models(models: &[ModelEntry], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(text::render_models(models)),
        OutputFormat::Json => Ok(json::render_models(models)?),
        OutputFormat::Xml => xml::render_models(models),
    }
}

pub fn emit(report: &TokenReport, format: OutputFormat, color: bool) -> Result<(), Box<dyn Error>> {
    println!("{}", render(report, format, color)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("XML".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_budget() {
        let within = TokenReport::new("gpt-4", 10).with_budget(10);
        assert_eq!(within.within_budget, Some(true));
        assert_eq!(within.overage(), 0);

        let over = TokenReport::new("gpt-4", 15).with_budget(10);
        assert_eq!(over.within_budget, Some(false));
        assert_eq!(over.overage(), 5);

        assert_eq!(TokenReport::new("gpt-4", 15).overage(), 0);
    }
}
