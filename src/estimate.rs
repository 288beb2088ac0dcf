use crate::cli::EstimateArgs;
use crate::config::Settings;
use crate::input::{self, FileText};
use ai_tokenizer::counter::{self, CountMethod};
use ai_tokenizer::models;
use ai_tokenizer::output::{self, FileTokens, TokenReport};
use ai_tokenizer::{Estimator, TokenCounter};
use rayon::prelude::*;

pub fn run(args: EstimateArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let budget = input::validate_budget(settings.budget(args.budget))?;
    let input = input::acquire(&args.input)?;

    let model = settings.model(args.model);
    let encoding = settings.encoding(args.encoding);
    let heuristic = settings.heuristic(args.heuristic);
    let capability = models::capability(&model);

    let selected = counter::select(&model, encoding.as_deref(), heuristic);
    let counter = selected.counter.as_ref();

    let files = if input.files.is_empty() {
        Vec::new()
    } else {
        count_files(&input.files, counter, args.jobs)?
    };

    let tokens = if files.is_empty() {
        counter.count_tokens(&input.text)
    } else {
        files.iter().map(|f| f.tokens).sum()
    };

    let label = match selected.method {
        CountMethod::Heuristic => counter.label().to_string(),
        CountMethod::Exact | CountMethod::Fallback => model,
    };

    let mut report = TokenReport {
        encoding,
        method: Some(selected.method),
        files,
        ..TokenReport::new(label, tokens)
    }
    .with_budget(budget.unwrap_or(capability.max_context));

    if args.show_normalized {
        report.normalized_text = Some(Estimator::new().normalize(&input.text));
        report.original_text = Some(input.text);
    }

    output::emit(&report, settings.format, settings.color)
}

fn count_files(
    files: &[FileText],
    counter: &(dyn TokenCounter + Send + Sync),
    jobs: usize,
) -> Result<Vec<FileTokens>, Box<dyn std::error::Error>> {
    let jobs = if jobs == 0 { num_cpus::get() } else { jobs };

    let count = |f: &FileText| FileTokens {
        path: f.path.clone(),
        tokens: counter.count_tokens(&f.content),
    };

    if jobs > 1 && files.len() > 1 {
        tracing::debug!(jobs, files = files.len(), "counting files in parallel");
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(|| files.par_iter().map(count).collect()))
    } else {
        Ok(files.iter().map(count).collect())
    }
}
