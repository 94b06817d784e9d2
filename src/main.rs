use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use lemmata::{LemmaError, LemmatizeOptions, ModelSize, ResourceConfig, lemmatize_text};

/// Lemmatize text with a lookup or dictionary pipeline.
#[derive(Parser, Debug)]
#[command(name = "lemmata", version, about)]
struct Cli {
    /// Text to lemmatize (read from stdin when omitted)
    text: Option<String>,

    /// Language tag such as "es", "en-US", "spanish", or "auto"
    #[arg(short, long, default_value = "es")]
    lang: String,

    /// Lemmatizer engine: "lookup" or "dictionary" (case-insensitive)
    #[arg(short, long, default_value = "lookup")]
    engine: String,

    /// Skip the basic cleaning pass (lowercasing, punctuation and digit removal)
    #[arg(long)]
    no_clean: bool,

    /// JSON file mapping surface forms to forced lemmas
    #[arg(short, long)]
    overrides: Option<PathBuf>,

    /// Lexicon size for the lookup engine
    #[arg(long, value_enum, default_value_t = ModelSize::Md)]
    size: ModelSize,

    /// Lemma model file for the dictionary engine
    #[arg(long)]
    lemma_model: Option<PathBuf>,

    /// Save the dictionary engine's model here after merging overrides
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// Directory holding lexicon files (overrides LEMMATA_MODEL_DIR)
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn read_input(text: Option<String>) -> io::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Writes the lemmas to `out`. Errors were already logged by the library, so a
/// failure only sets the exit code.
fn emit(result: Result<String, LemmaError>, out: &mut impl Write) -> io::Result<ExitCode> {
    match result {
        Ok(lemmas) => {
            writeln!(out, "{lemmas}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lemmata=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let text = match read_input(cli.text) {
        Ok(text) => text,
        Err(e) => {
            error!("failed to read stdin: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let resources = match cli.model_dir {
        Some(dir) => ResourceConfig::with_model_dir(dir),
        None => ResourceConfig::from_env(),
    };

    let mut opts = LemmatizeOptions::new()
        .language(cli.lang.as_str())
        .engine(cli.engine)
        .clean(!cli.no_clean)
        .model_size(cli.size)
        .resources(resources);
    if let Some(path) = cli.overrides {
        opts = opts.overrides(path);
    }
    if let Some(path) = cli.lemma_model {
        opts = opts.lemma_model(path);
    }
    if let Some(path) = cli.save_model {
        opts = opts.model_output(path);
    }

    info!(lang = %opts.language, engine = %opts.engine, "lemmatizing");

    let result = lemmatize_text(&text, &opts);
    Ok(emit(result, &mut io::stdout().lock())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["lemmata", "hola"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("hola"));
        assert_eq!(cli.lang, "es");
        assert_eq!(cli.engine, "lookup");
        assert!(!cli.no_clean);
        assert_eq!(cli.size, ModelSize::Md);
    }

    #[test]
    fn parses_engine_options() {
        let cli = Cli::try_parse_from([
            "lemmata",
            "--lang",
            "auto",
            "--engine",
            "Dictionary",
            "--no-clean",
            "--size",
            "lg",
            "--lemma-model",
            "model.json",
            "--save-model",
            "out.json",
        ])
        .unwrap();
        assert_eq!(cli.text, None);
        assert_eq!(cli.lang, "auto");
        assert_eq!(cli.engine, "Dictionary");
        assert!(cli.no_clean);
        assert_eq!(cli.size, ModelSize::Lg);
        assert_eq!(cli.lemma_model, Some(PathBuf::from("model.json")));
        assert_eq!(cli.save_model, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn rejects_unknown_size() {
        assert!(Cli::try_parse_from(["lemmata", "--size", "xl", "hola"]).is_err());
    }

    #[test]
    fn read_input_prefers_argument() {
        assert_eq!(read_input(Some("texto".into())).unwrap(), "texto");
    }

    #[test]
    fn emit_writes_lemmas_on_success() {
        let mut out = Vec::new();
        let code = emit(Ok("el gato".into()), &mut out).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(out, b"el gato\n");
    }

    #[test]
    fn emit_writes_nothing_for_reported_errors() {
        let mut out = Vec::new();
        let code = emit(Err(LemmaError::UnknownEngine("nltk".into())), &mut out).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
    }
}
