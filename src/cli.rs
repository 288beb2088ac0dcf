use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ai-tokenizer")]
#[command(version, about = "Token budgeting and estimation for LLM prompts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Output format: text, json, xml (default: text)")]
    pub format: Option<String>,

    #[arg(long, global = true, help = "Disable colors")]
    pub no_color: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Estimate token count for text")]
    Estimate(EstimateArgs),

    #[command(about = "Fold text to ASCII and show the heuristic estimate")]
    Normalize(NormalizeArgs),

    #[command(about = "Encode text to token IDs")]
    Encode(EncodeArgs),

    #[command(about = "Decode comma separated token IDs to text")]
    Decode(DecodeArgs),

    #[command(about = "Split text into chunks that fit a token budget")]
    Chunk(ChunkArgs),

    #[command(about = "List known models and their context windows")]
    Models,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(short, long, help = "Text content to analyze")]
    pub text: Option<String>,

    #[arg(
        short,
        long = "file",
        value_name = "PATH",
        help = "Read text from files (repeatable, glob patterns allowed)"
    )]
    pub files: Vec<String>,
}

#[derive(Parser)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long, help = "Model name for capability lookup (default: gpt-4)")]
    pub model: Option<String>,

    #[arg(short, long, help = "Specific encoding (cl100k_base, o200k_base, p50k_base, ...)")]
    pub encoding: Option<String>,

    #[arg(short, long, help = "Token budget to check against")]
    pub budget: Option<usize>,

    #[arg(long, help = "Use the heuristic estimator instead of an exact tokenizer")]
    pub heuristic: bool,

    #[arg(long, help = "Include original and ASCII-normalized text")]
    pub show_normalized: bool,

    #[arg(
        short = 'j',
        long,
        default_value_t = 0,
        help = "Number of parallel jobs for multiple files (0 = auto)"
    )]
    pub jobs: usize,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long, help = "Model name (default: gpt-4)")]
    pub model: Option<String>,

    #[arg(short, long, help = "Specific encoding (overrides the model's)")]
    pub encoding: Option<String>,
}

#[derive(Parser)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long, help = "Model name (default: gpt-4)")]
    pub model: Option<String>,

    #[arg(short, long, help = "Specific encoding (overrides the model's)")]
    pub encoding: Option<String>,
}

#[derive(Parser)]
pub struct ChunkArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long, help = "Model name for capability lookup (default: gpt-4)")]
    pub model: Option<String>,

    #[arg(short, long, help = "Specific encoding (overrides the model's)")]
    pub encoding: Option<String>,

    #[arg(short, long, help = "Token budget per chunk")]
    pub budget: Option<usize>,

    #[arg(short = 's', long, help = "Custom chunk size (uses model max if not specified)")]
    pub chunk_size: Option<usize>,

    #[arg(long, help = "Use the heuristic estimator instead of an exact tokenizer")]
    pub heuristic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_estimate() {
        let cli = Cli::try_parse_from([
            "ai-tokenizer",
            "estimate",
            "--text",
            "hello",
            "--budget",
            "10",
            "--format",
            "json",
            "-f",
            "a.txt",
            "-f",
            "docs/*.md",
        ])
        .unwrap();
        assert_eq!(cli.format.as_deref(), Some("json"));
        match cli.command {
            Commands::Estimate(args) => {
                assert_eq!(args.input.text.as_deref(), Some("hello"));
                assert_eq!(args.input.files, vec!["a.txt", "docs/*.md"]);
                assert_eq!(args.budget, Some(10));
                assert!(!args.heuristic);
                assert_eq!(args.jobs, 0);
            }
            _ => panic!("expected estimate"),
        }
    }

    #[test]
    fn test_parse_chunk() {
        let cli = Cli::try_parse_from([
            "ai-tokenizer",
            "--no-color",
            "chunk",
            "-s",
            "500",
            "--heuristic",
            "-t",
            "doc",
        ])
        .unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::Chunk(args) => {
                assert_eq!(args.chunk_size, Some(500));
                assert!(args.heuristic);
            }
            _ => panic!("expected chunk"),
        }
    }
}
