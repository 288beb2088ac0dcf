use crate::cli::ChunkArgs;
use crate::config::Settings;
use crate::input;
use ai_tokenizer::chunk::{chunk_text, resolve_chunk_size};
use ai_tokenizer::counter::{self, CountMethod};
use ai_tokenizer::models;
use ai_tokenizer::output::{self, TokenReport};

pub fn run(args: ChunkArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let budget = input::validate_budget(settings.budget(args.budget))?;
    let input = input::acquire(&args.input)?;

    let model = settings.model(args.model);
    let encoding = settings.encoding(args.encoding);
    let heuristic = settings.heuristic(args.heuristic);
    let capability = models::capability(&model);

    let chunk_size = resolve_chunk_size(
        args.chunk_size.or(settings.config.chunk_size),
        budget,
        &capability,
    );

    let selected = counter::select(&model, encoding.as_deref(), heuristic);
    let counter = selected.counter.as_ref();

    let chunks = chunk_text(&input.text, chunk_size, counter);
    tracing::debug!(chunk_size, chunks = chunks.len(), "chunked input");

    let label = match selected.method {
        CountMethod::Heuristic => counter.label().to_string(),
        CountMethod::Exact | CountMethod::Fallback => model,
    };

    let report = TokenReport {
        encoding,
        method: Some(selected.method),
        budget: Some(chunk_size),
        within_budget: Some(chunks.len() <= 1),
        chunks,
        ..TokenReport::new(label, counter.count_tokens(&input.text))
    };

    output::emit(&report, settings.format, settings.color)
}
