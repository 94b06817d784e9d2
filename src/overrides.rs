//! Caller-supplied lemma overrides: surface form to forced lemma.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("could not read lemma overrides from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("lemma overrides in {path} are not a JSON object of strings: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Mapping from surface form to the lemma that must be emitted for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(BTreeMap<String, String>);

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON object of `"form": "lemma"` pairs.
    pub fn load(path: &Path) -> Result<Self, OverrideError> {
        let text = fs::read_to_string(path).map_err(|source| OverrideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table: Self = serde_json::from_str(&text).map_err(|source| OverrideError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), entries = table.len(), "loaded lemma overrides");
        Ok(table)
    }

    pub fn insert(&mut self, form: impl Into<String>, lemma: impl Into<String>) {
        self.0.insert(form.into(), lemma.into());
    }

    pub fn get(&self, form: &str) -> Option<&str> {
        self.0.get(form).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Where overrides come from: an in-memory table or a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideSource {
    Table(OverrideTable),
    Path(PathBuf),
}

impl OverrideSource {
    /// Resolves the source into a table. A file that cannot be read or parsed
    /// is reported and yields `None`; it never aborts adapter construction.
    pub fn resolve(&self) -> Option<OverrideTable> {
        match self {
            OverrideSource::Table(table) => Some(table.clone()),
            OverrideSource::Path(path) => OverrideTable::load(path)
                .inspect_err(|e| warn!(error = %e, "skipping lemma overrides"))
                .ok(),
        }
    }
}

impl From<OverrideTable> for OverrideSource {
    fn from(table: OverrideTable) -> Self {
        OverrideSource::Table(table)
    }
}

impl From<PathBuf> for OverrideSource {
    fn from(path: PathBuf) -> Self {
        OverrideSource::Path(path)
    }
}

impl From<&Path> for OverrideSource {
    fn from(path: &Path) -> Self {
        OverrideSource::Path(path.to_path_buf())
    }
}
