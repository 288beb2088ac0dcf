use crate::cli::NormalizeArgs;
use crate::config::Settings;
use crate::input;
use ai_tokenizer::counter::CountMethod;
use ai_tokenizer::output::{self, TokenReport};
use ai_tokenizer::Estimator;

pub fn run(args: NormalizeArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let input = input::acquire(&args.input)?;
    let report = normalize_report(input.text);
    output::emit(&report, settings.format, settings.color)
}

fn normalize_report(text: String) -> TokenReport {
    let estimator = Estimator::new();
    let normalized = estimator.normalize(&text);
    let tokens = estimator.estimate(&normalized);

    TokenReport {
        method: Some(CountMethod::Heuristic),
        original_text: Some(text),
        normalized_text: Some(normalized),
        ..TokenReport::new(estimator.model(), tokens)
    }
}
