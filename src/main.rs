mod chunk_cmd;
mod cli;
mod codec_cmd;
mod config;
mod estimate;
mod input;
mod normalize_cmd;

use ai_tokenizer::models;
use ai_tokenizer::output::{self, json, OutputFormat};
use clap::Parser;
use cli::{Cli, Commands};
use config::Settings;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match Settings::resolve(config::load_config(), cli.format.as_deref(), cli.no_color) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Estimate(args) => estimate::run(args, &settings),
        Commands::Normalize(args) => normalize_cmd::run(args, &settings),
        Commands::Encode(args) => codec_cmd::encode(args, &settings),
        Commands::Decode(args) => codec_cmd::decode(args, &settings),
        Commands::Chunk(args) => chunk_cmd::run(args, &settings),
        Commands::Models => list_models(&settings),
    };

    if let Err(e) = result {
        match settings.format {
            OutputFormat::Json => match json::render_error(&e.to_string()) {
                Ok(body) => println!("{}", body),
                Err(_) => eprintln!("Error: {}", e),
            },
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    // --verbose adds a DEBUG directive on top of RUST_LOG, otherwise WARN.
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn list_models(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", output::render_models(&models::all(), settings.format)?);
    Ok(())
}
