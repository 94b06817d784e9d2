//! Lemmatizer adapters: one capability set, two engines.

mod dictionary;
mod lookup;

pub use dictionary::{DictionaryLemmatizer, LemmaModel};
pub use lookup::LookupLemmatizer;

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::clean::basic_clean;
use crate::error::LemmaError;
use crate::lang::Language;
use crate::overrides::{OverrideSource, OverrideTable};
use crate::pipeline::Doc;
use crate::resources::{ModelSize, ResourceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Component pipeline over a lookup lexicon.
    Lookup,
    /// Sentence-level analysis over a serializable lemma model.
    Dictionary,
}

impl Engine {
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Lookup => "lookup",
            Engine::Dictionary => "dictionary",
        }
    }

    pub fn override_strategy(self) -> OverrideStrategy {
        match self {
            Engine::Lookup => OverrideStrategy::PreHook,
            Engine::Dictionary => OverrideStrategy::ModelMerge,
        }
    }
}

impl FromStr for Engine {
    type Err = LemmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lookup" => Ok(Engine::Lookup),
            "dictionary" => Ok(Engine::Dictionary),
            _ => Err(LemmaError::UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an override table reaches the lemmas an engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideStrategy {
    /// A component inserted ahead of the lemmatizer sets the lemma for exact
    /// surface matches; later stages keep lemmas that are already set.
    PreHook,
    /// Overrides are merged into the lemma model's dictionary and take part
    /// in its normal lookup, including the lowercase fallback.
    ModelMerge,
}

/// Resource parameters for building an engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Lexicon variant for the lookup engine.
    pub model_size: ModelSize,
    /// Lemma model file for the dictionary engine.
    pub lemma_model: Option<PathBuf>,
    /// Where the dictionary engine saves its model after merging overrides.
    pub model_output: Option<PathBuf>,
    pub resources: ResourceConfig,
}

pub trait LemmaEngine {
    /// Language the pipeline was built for; `None` when no pipeline exists.
    fn language(&self) -> Option<Language>;

    /// Tag as the caller supplied it.
    fn requested_language(&self) -> &str;

    fn is_ready(&self) -> bool {
        self.language().is_some()
    }

    fn override_strategy(&self) -> OverrideStrategy;

    fn apply_overrides(&mut self, table: &OverrideTable);

    /// Tokenizes and lemmatizes `text`, keeping every token.
    fn analyze(&self, text: &str, clean: bool) -> Result<Doc, LemmaError>;

    /// Lemmas of every token in order, joined by a single space.
    fn lemmatize(&self, text: &str, clean: bool) -> Result<String, LemmaError> {
        Ok(self.analyze(text, clean)?.joined_lemmas())
    }
}

pub(crate) fn prepare(text: &str, clean: bool) -> Cow<'_, str> {
    if clean {
        Cow::Owned(basic_clean(text))
    } else {
        Cow::Borrowed(text)
    }
}

/// A constructed adapter for one of the engines.
#[derive(Debug)]
pub enum Lemmatizer {
    Lookup(LookupLemmatizer),
    Dictionary(DictionaryLemmatizer),
}

impl Lemmatizer {
    pub fn new(
        engine: Engine,
        language: &str,
        overrides: Option<&OverrideSource>,
        opts: &EngineOptions,
    ) -> Self {
        match engine {
            Engine::Lookup => Lemmatizer::Lookup(LookupLemmatizer::new(
                language,
                overrides,
                opts.model_size,
                &opts.resources,
            )),
            Engine::Dictionary => Lemmatizer::Dictionary(DictionaryLemmatizer::new(
                language,
                opts.lemma_model.as_deref(),
                overrides,
                opts.model_output.as_deref(),
                &opts.resources,
            )),
        }
    }

    pub fn engine(&self) -> Engine {
        match self {
            Lemmatizer::Lookup(_) => Engine::Lookup,
            Lemmatizer::Dictionary(_) => Engine::Dictionary,
        }
    }

    fn inner(&self) -> &dyn LemmaEngine {
        match self {
            Lemmatizer::Lookup(l) => l,
            Lemmatizer::Dictionary(d) => d,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn LemmaEngine {
        match self {
            Lemmatizer::Lookup(l) => l,
            Lemmatizer::Dictionary(d) => d,
        }
    }
}

impl LemmaEngine for Lemmatizer {
    fn language(&self) -> Option<Language> {
        self.inner().language()
    }

    fn requested_language(&self) -> &str {
        self.inner().requested_language()
    }

    fn override_strategy(&self) -> OverrideStrategy {
        self.inner().override_strategy()
    }

    fn apply_overrides(&mut self, table: &OverrideTable) {
        self.inner_mut().apply_overrides(table)
    }

    fn analyze(&self, text: &str, clean: bool) -> Result<Doc, LemmaError> {
        self.inner().analyze(text, clean)
    }
}
