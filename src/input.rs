use crate::cli::InputArgs;
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Files larger than this are skipped.
const MAX_FILE_BYTES: u64 = 2_000_000;
const SNIFF_BYTES: usize = 8192;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("text content is required for estimation")]
    TextRequired,

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("no readable text files matched: {0}")]
    NoFiles(String),

    #[error("budget must be a positive integer")]
    InvalidBudget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileText {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct Input {
    /// All input text; file contents are joined with newlines.
    pub text: String,
    /// Per-file contents when the input came from files.
    pub files: Vec<FileText>,
}

/// Take text from `--text`, then `--file`, then standard input.
pub fn acquire(args: &InputArgs) -> Result<Input, InputError> {
    let input = if let Some(ref text) = args.text {
        Input {
            text: text.clone(),
            files: Vec::new(),
        }
    } else if !args.files.is_empty() {
        let files = read_files(&args.files)?;
        let text = files
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Input { text, files }
    } else {
        Input {
            text: read_stdin()?,
            files: Vec::new(),
        }
    };

    if input.text.is_empty() && input.files.is_empty() {
        return Err(InputError::TextRequired);
    }

    Ok(input)
}

pub fn read_file(path: &Path) -> Result<String, InputError> {
    let bytes = fs::read(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn read_stdin() -> Result<String, InputError> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::TextRequired);
    }

    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .map_err(|source| InputError::Read {
            path: "<stdin>".to_string(),
            source,
        })?;
    Ok(text)
}

fn read_files(patterns: &[String]) -> Result<Vec<FileText>, InputError> {
    let paths = expand_patterns(patterns)?;
    let mut files = Vec::new();

    for path in paths {
        if !is_text_file(&path) {
            tracing::warn!(path = %path.display(), "skipping binary or oversized file");
            continue;
        }

        files.push(FileText {
            path: path.display().to_string(),
            content: read_file(&path)?,
        });
    }

    if files.is_empty() {
        return Err(InputError::NoFiles(patterns.join(", ")));
    }

    tracing::debug!(count = files.len(), "read input files");
    Ok(files)
}

/// Expand glob patterns. Plain paths are kept as given so a missing file
/// surfaces as a read error.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, InputError> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let matches = glob::glob(pattern).map_err(|e| InputError::Pattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        let mut matched: Vec<PathBuf> = matches
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

pub fn is_text_file(path: &Path) -> bool {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    use mime_guess::mime;

    let likely_binary = match mime.type_() {
        mime::IMAGE | mime::VIDEO | mime::AUDIO => true,
        // Unknown extensions map to octet-stream; look at the bytes instead.
        mime::APPLICATION if mime.subtype() == mime::OCTET_STREAM => has_nul_bytes(path),
        _ => false,
    };

    if likely_binary {
        return false;
    }

    if let Ok(metadata) = fs::metadata(path) {
        if metadata.len() > MAX_FILE_BYTES {
            return false;
        }
    }

    true
}

fn has_nul_bytes(path: &Path) -> bool {
    let mut head = [0_u8; SNIFF_BYTES];
    match fs::File::open(path).and_then(|mut f| f.read(&mut head)) {
        Ok(n) => head[..n].contains(&0),
        Err(_) => false,
    }
}

pub fn validate_budget(budget: Option<usize>) -> Result<Option<usize>, InputError> {
    match budget {
        Some(0) => Err(InputError::InvalidBudget),
        other => Ok(other),
    }
}
