use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{LemmaEngine, OverrideStrategy, prepare};
use crate::error::LemmaError;
use crate::lang::Language;
use crate::overrides::{OverrideSource, OverrideTable};
use crate::pipeline::{Doc, tokenize};
use crate::resources::{Lexicon, ResourceConfig, ResourceError, load_lemma_lexicon};

/// Lemma model: a lexicon tagged with its language. Serialized as the lexicon
/// JSON with an extra `"language"` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(flatten)]
    pub lexicon: Lexicon,
}

impl LemmaModel {
    pub fn new(language: Language, lexicon: Lexicon) -> Self {
        Self {
            language: Some(language),
            lexicon,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let text = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut model: Self = serde_json::from_str(&text).map_err(|source| ResourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.lexicon.sort_rules();
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<(), ResourceError> {
        let io_err = |source: std::io::Error| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| ResourceError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)
    }

    /// Merges `table` into the word dictionary. Returns how many entries changed.
    pub fn merge(&mut self, table: &OverrideTable) -> usize {
        let mut changed = 0;
        for (form, lemma) in table.iter() {
            if self.lexicon.words.get(form).map(String::as_str) != Some(lemma) {
                self.lexicon.insert_word(form, lemma);
                changed += 1;
            }
        }
        changed
    }

    pub fn lemma(&self, word: &str) -> String {
        self.lexicon.lemma(word)
    }
}

/// Lemmatizer that looks every word up in a mergeable lemma model.
#[derive(Debug)]
pub struct DictionaryLemmatizer {
    requested: String,
    model: Option<LemmaModel>,
    model_output: Option<PathBuf>,
}

impl DictionaryLemmatizer {
    pub fn new(
        language: &str,
        lemma_model: Option<&Path>,
        overrides: Option<&OverrideSource>,
        model_output: Option<&Path>,
        resources: &ResourceConfig,
    ) -> Self {
        let model = Language::from_tag(language)
            .and_then(|lang| load_model(lang, lemma_model, resources));

        let mut lemmatizer = Self {
            requested: language.to_string(),
            model,
            model_output: model_output.map(Path::to_path_buf),
        };
        if let Some(table) = overrides.and_then(OverrideSource::resolve) {
            lemmatizer.apply_overrides(&table);
        }
        lemmatizer
    }

    pub fn model(&self) -> Option<&LemmaModel> {
        self.model.as_ref()
    }
}

fn load_model(
    lang: Language,
    lemma_model: Option<&Path>,
    resources: &ResourceConfig,
) -> Option<LemmaModel> {
    if let Some(path) = lemma_model {
        let mut model = LemmaModel::load(path)
            .inspect_err(|e| warn!(error = %e, "could not load lemma model"))
            .ok()?;
        match model.language {
            Some(found) if found != lang => {
                warn!(expected = %lang, %found, path = %path.display(), "lemma model language mismatch");
            }
            None => model.language = Some(lang),
            _ => {}
        }
        debug!(path = %path.display(), "lemma model loaded");
        return Some(model);
    }
    let lexicon = load_lemma_lexicon(lang, resources);
    if lexicon.is_none() {
        warn!(%lang, "no lemma model available");
    }
    lexicon.map(|lexicon| LemmaModel::new(lang, lexicon))
}

impl LemmaEngine for DictionaryLemmatizer {
    fn language(&self) -> Option<Language> {
        self.model.as_ref().and_then(|m| m.language)
    }

    fn requested_language(&self) -> &str {
        &self.requested
    }

    fn override_strategy(&self) -> OverrideStrategy {
        OverrideStrategy::ModelMerge
    }

    fn apply_overrides(&mut self, table: &OverrideTable) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        let changed = model.merge(table);
        debug!(entries = table.len(), changed, "lemma overrides merged into model");

        if let Some(path) = &self.model_output {
            match model.save(path) {
                Ok(()) => info!(path = %path.display(), "modified lemma model saved"),
                Err(e) => warn!(error = %e, "could not save modified lemma model"),
            }
        }
    }

    fn analyze(&self, text: &str, clean: bool) -> Result<Doc, LemmaError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| LemmaError::InvalidLanguage(self.requested.clone()))?;
        let mut doc = tokenize(&prepare(text, clean));
        for token in &mut doc.tokens {
            token.lemma = Some(model.lemma(&token.text));
        }
        Ok(doc)
    }
}
