use super::TokenReport;
use crate::models::ModelEntry;

pub fn render(report: &TokenReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn render_models(models: &[ModelEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(models)
}

/// `{"error": "..."}` body printed when a command fails in JSON mode.
pub fn render_error(message: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({ "error": message }))
}
