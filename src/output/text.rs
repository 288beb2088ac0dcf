use super::TokenReport;
use crate::models::ModelEntry;
use colored::*;
use std::fmt::Write;

const ELLIPSIS: &str = "...";
const PREVIEW_LEN: usize = 60;

pub fn render(report: &TokenReport, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Model: {}", report.model);
    if let Some(ref encoding) = report.encoding {
        let _ = writeln!(out, "Encoding: {}", encoding);
    }
    if let Some(method) = report.method {
        let _ = writeln!(out, "Method: {}", method.as_str());
    }
    let _ = write!(out, "Tokens: {}", report.tokens);

    if let Some(ref ids) = report.token_ids {
        let joined: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let _ = write!(out, "\nToken IDs: {}", joined.join(","));
    }

    if let Some(ref decoded) = report.decoded_text {
        let _ = write!(out, "\nDecoded text: {}", decoded);
    }

    if let Some(ref original) = report.original_text {
        let _ = write!(out, "\nOriginal text: {}", original);
    }

    if let Some(ref normalized) = report.normalized_text {
        let _ = write!(out, "\nNormalized text: {}", normalized);
    }

    if let Some(budget) = report.budget {
        let _ = write!(out, "\nBudget: {} tokens", budget);
        let status = if report.within_budget.unwrap_or(false) {
            let s = "✓ Within budget".to_string();
            if color {
                s.green().to_string()
            } else {
                s
            }
        } else {
            let s = format!("✗ Exceeds budget by {} tokens", report.overage());
            if color {
                s.red().bold().to_string()
            } else {
                s
            }
        };
        let _ = write!(out, "\nStatus: {}", status);
    }

    if report.files.len() > 1 {
        let _ = write!(out, "\n\nFiles:");
        for file in &report.files {
            let _ = write!(out, "\n  {}: {} tokens", file.path, file.tokens);
        }
    }

    if report.chunks.len() > 1 {
        let _ = write!(out, "\n\nText split into {} chunks:", report.chunks.len());
        for chunk in &report.chunks {
            let preview = truncate_text(&chunk.text, PREVIEW_LEN);
            let preview = if color {
                preview.dimmed().to_string()
            } else {
                preview
            };
            let _ = write!(
                out,
                "\n  Chunk {}: {} tokens  {}",
                chunk.index + 1,
                chunk.tokens,
                preview
            );
        }
    }

    out
}

pub fn render_models(models: &[ModelEntry]) -> String {
    let mut out = String::from("Supported models:");
    for entry in models {
        let vision = if entry.capability.vision { "  vision" } else { "" };
        let _ = write!(
            out,
            "\n  {:<20} {:>7} tokens  {}{}",
            entry.name, entry.capability.max_context, entry.capability.encoding, vision
        );
    }
    out
}

/// Shorten `text` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    if max_len <= ELLIPSIS.len() {
        return ELLIPSIS.to_string();
    }

    let kept: String = text.chars().take(max_len - ELLIPSIS.len()).collect();
    format!("{}{}", kept, ELLIPSIS)
}
