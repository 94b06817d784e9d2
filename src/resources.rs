//! Lexicon resources backing both pipelines.
//!
//! A lexicon is a JSON object `{"words": {form: lemma}, "rules": [[suffix, replacement], ...]}`.
//! Built-in lexicons ship for Spanish and English; any language can be
//! supplied from a resource directory (`LEMMATA_MODEL_DIR`).

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::lang::Language;

const BUILTIN_ES: &str = include_str!("../data/es.json");
const BUILTIN_EN: &str = include_str!("../data/en.json");

/// Minimum stem length left after stripping a suffix rule.
const MIN_STEM_CHARS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("could not access lemma resource {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid lemma resource {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not serialize lemma model for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ModelSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelSize::Sm => "sm",
            ModelSize::Md => "md",
            ModelSize::Lg => "lg",
        }
    }
}

/// Where on-disk lexicons are looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceConfig {
    pub model_dir: Option<PathBuf>,
}

impl ResourceConfig {
    pub fn from_env() -> Self {
        let model_dir = env::var("LEMMATA_MODEL_DIR")
            .ok()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);
        Self { model_dir }
    }

    pub fn with_model_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: Some(dir.into()),
        }
    }

    fn file(&self, name: &str) -> Option<PathBuf> {
        self.model_dir.as_ref().map(|dir| dir.join(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
}

impl From<(String, String)> for SuffixRule {
    fn from((suffix, replacement): (String, String)) -> Self {
        Self {
            suffix,
            replacement,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub words: BTreeMap<String, String>,
    #[serde(default, with = "rule_pairs")]
    pub rules: Vec<SuffixRule>,
}

mod rule_pairs {
    use super::SuffixRule;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(rules: &[SuffixRule], s: S) -> Result<S::Ok, S::Error> {
        rules
            .iter()
            .map(|r| (r.suffix.as_str(), r.replacement.as_str()))
            .collect::<Vec<_>>()
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<SuffixRule>, D::Error> {
        let pairs = Vec::<(String, String)>::deserialize(d)?;
        Ok(pairs.into_iter().map(SuffixRule::from).collect())
    }
}

impl Lexicon {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut lexicon: Self = serde_json::from_str(text)?;
        lexicon.sort_rules();
        Ok(lexicon)
    }

    pub fn load(path: &Path) -> Result<Self, ResourceError> {
        let text = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ResourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn builtin(language: Language) -> Option<Self> {
        let text = match language {
            Language::Es => BUILTIN_ES,
            Language::En => BUILTIN_EN,
            _ => return None,
        };
        Self::from_json(text)
            .inspect_err(|e| warn!(%language, error = %e, "built-in lexicon is invalid"))
            .ok()
    }

    /// Longest suffix first, so the most specific rule wins.
    pub(crate) fn sort_rules(&mut self) {
        self.rules
            .sort_by(|a, b| b.suffix.chars().count().cmp(&a.suffix.chars().count()));
    }

    pub fn insert_word(&mut self, form: impl Into<String>, lemma: impl Into<String>) {
        self.words.insert(form.into(), lemma.into());
    }

    /// Lemma for `form`: exact entry, lowercase entry, longest suffix rule,
    /// then the lowercase form itself. Forms without letters or digits are
    /// returned unchanged.
    pub fn lemma(&self, form: &str) -> String {
        if !form.chars().any(char::is_alphanumeric) {
            return form.to_string();
        }
        if let Some(lemma) = self.words.get(form) {
            return lemma.clone();
        }
        let lower = form.to_lowercase();
        if let Some(lemma) = self.words.get(&lower) {
            return lemma.clone();
        }
        self.apply_rules(&lower).unwrap_or(lower)
    }

    fn apply_rules(&self, lower: &str) -> Option<String> {
        if !lower.chars().all(char::is_alphabetic) {
            return None;
        }
        let len = lower.chars().count();
        self.rules.iter().find_map(|rule| {
            let stem = lower.strip_suffix(rule.suffix.as_str())?;
            if len - rule.suffix.chars().count() < MIN_STEM_CHARS {
                return None;
            }
            Some(format!("{stem}{}", rule.replacement))
        })
    }
}

/// Lexicon for the lookup pipeline: `<dir>/<code>_<size>.json`, else built-in.
pub fn load_lookup_lexicon(
    language: Language,
    size: ModelSize,
    config: &ResourceConfig,
) -> Option<Lexicon> {
    let name = format!("{}_{}.json", language.code(), size.as_str());
    load_from_dir(config, &name).or_else(|| Lexicon::builtin(language))
}

/// Lexicon for the dictionary pipeline: `<dir>/<code>_lemma.json`, else built-in.
pub fn load_lemma_lexicon(language: Language, config: &ResourceConfig) -> Option<Lexicon> {
    let name = format!("{}_lemma.json", language.code());
    load_from_dir(config, &name).or_else(|| Lexicon::builtin(language))
}

fn load_from_dir(config: &ResourceConfig, name: &str) -> Option<Lexicon> {
    let path = config.file(name)?;
    if !path.exists() {
        debug!(path = %path.display(), "no lexicon in model directory");
        return None;
    }
    Lexicon::load(&path)
        .inspect_err(|e| warn!(error = %e, "ignoring lexicon"))
        .ok()
}
