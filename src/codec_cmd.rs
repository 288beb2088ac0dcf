use crate::cli::{DecodeArgs, EncodeArgs};
use crate::config::Settings;
use crate::input;
use ai_tokenizer::counter::CountMethod;
use ai_tokenizer::output::{self, TokenReport};
use ai_tokenizer::tokens::{self, Codec};

pub fn encode(args: EncodeArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let input = input::acquire(&args.input)?;
    let model = settings.model(args.model);
    let encoding = settings.encoding(args.encoding);

    let codec = Codec::resolve(&model, encoding.as_deref())
        .map_err(|e| format!("encoding failed: {}", e))?;
    let ids = codec.encode(&input.text);
    let count = ids.len();
    tracing::debug!(codec = codec.label(), tokens = count, "encoded");

    let report = TokenReport {
        encoding,
        method: Some(CountMethod::Exact),
        token_ids: Some(ids),
        ..TokenReport::new(model, count)
    };

    output::emit(&report, settings.format, settings.color)
}

pub fn decode(args: DecodeArgs, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let input = input::acquire(&args.input)?;
    let model = settings.model(args.model);
    let encoding = settings.encoding(args.encoding);

    let ids = tokens::parse_token_ids(&input.text)?;
    let codec = Codec::resolve(&model, encoding.as_deref())
        .map_err(|e| format!("decoding failed: {}", e))?;
    let decoded = codec
        .decode(&ids)
        .map_err(|e| format!("decoding failed: {}", e))?;

    let count = ids.len();

    let report = TokenReport {
        encoding,
        method: Some(CountMethod::Exact),
        token_ids: Some(ids),
        decoded_text: Some(decoded),
        ..TokenReport::new(model, count)
    };

    output::emit(&report, settings.format, settings.color)
}
