//! Lemmatize text with a detected or specified language through one of two
//! pluggable pipelines, optionally forcing lemmas with an override table.

pub mod clean;
pub mod error;
pub mod lang;
pub mod lemmatizer;
pub mod overrides;
pub mod pipeline;
pub mod resources;

pub use error::LemmaError;
pub use lang::{Detection, Lang, Language, detect, detect_language};
pub use lemmatizer::{
    DictionaryLemmatizer, Engine, EngineOptions, LemmaEngine, LemmaModel, Lemmatizer,
    LookupLemmatizer, OverrideStrategy,
};
pub use overrides::{OverrideSource, OverrideTable};
pub use resources::{ModelSize, ResourceConfig};

use std::path::PathBuf;

use tracing::{debug, warn};

/// Parameters for [`lemmatize_text`].
#[derive(Debug, Clone)]
pub struct LemmatizeOptions<'a> {
    /// Language tag or `auto` (default `es`).
    pub language: Lang,
    /// Engine name, case-insensitive (default `lookup`).
    pub engine: String,
    pub clean: bool,
    /// Reuse an already built adapter instead of constructing one per call.
    pub lemmatizer: Option<&'a Lemmatizer>,
    pub overrides: Option<OverrideSource>,
    pub engine_options: EngineOptions,
}

impl Default for LemmatizeOptions<'_> {
    fn default() -> Self {
        Self {
            language: Lang::default(),
            engine: Engine::Lookup.as_str().to_string(),
            clean: true,
            lemmatizer: None,
            overrides: None,
            engine_options: EngineOptions::default(),
        }
    }
}

impl<'a> LemmatizeOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<Lang>) -> Self {
        self.language = language.into();
        self
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn lemmatizer(mut self, lemmatizer: &'a Lemmatizer) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    pub fn overrides(mut self, overrides: impl Into<OverrideSource>) -> Self {
        self.overrides = Some(overrides.into());
        self
    }

    pub fn model_size(mut self, size: ModelSize) -> Self {
        self.engine_options.model_size = size;
        self
    }

    pub fn lemma_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.engine_options.lemma_model = Some(path.into());
        self
    }

    pub fn model_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.engine_options.model_output = Some(path.into());
        self
    }

    pub fn resources(mut self, resources: ResourceConfig) -> Self {
        self.engine_options.resources = resources;
        self
    }
}

/// Lemmatizes `text` and returns the lemmas joined by single spaces.
///
/// Without a prebuilt adapter in `opts`, the language is resolved (`auto` by
/// detection, which needs a sentence or more to be reliable) and a new adapter
/// is built for the selected engine. Unknown engines and languages
/// without a usable pipeline are reported and returned as errors.
pub fn lemmatize_text(text: &str, opts: &LemmatizeOptions<'_>) -> Result<String, LemmaError> {
    let built;
    let lemmatizer = match opts.lemmatizer {
        Some(lemmatizer) => lemmatizer,
        None => {
            let engine: Engine = opts
                .engine
                .parse()
                .inspect_err(|e| warn!(error = %e, "lemmatizer not built"))?;
            let resolved = opts.language.resolve(text);
            debug!(requested = %opts.language, resolved = ?resolved, "language resolved");
            let tag = resolved.map_or_else(|| opts.language.to_string(), |l| l.code().to_string());
            built = Lemmatizer::new(
                engine,
                &tag,
                opts.overrides.as_ref(),
                &opts.engine_options,
            );
            &built
        }
    };

    if !lemmatizer.is_ready() {
        let err = LemmaError::InvalidLanguage(lemmatizer.requested_language().to_string());
        warn!(error = %err, "lemmatization skipped");
        return Err(err);
    }
    lemmatizer.lemmatize(text, opts.clean)
}
