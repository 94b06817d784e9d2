use tracing::{debug, warn};

use super::{LemmaEngine, OverrideStrategy, prepare};
use crate::error::LemmaError;
use crate::lang::Language;
use crate::overrides::{OverrideSource, OverrideTable};
use crate::pipeline::{Component, Doc, Pipeline};
use crate::resources::{Lexicon, ModelSize, ResourceConfig, load_lookup_lexicon};

pub const LEMMATIZER: &str = "lemmatizer";
pub const OVERRIDE_HOOK: &str = "lemma_overrides";

struct LookupComponent {
    lexicon: Lexicon,
}

impl Component for LookupComponent {
    fn name(&self) -> &str {
        LEMMATIZER
    }

    fn process(&self, doc: &mut Doc) {
        for token in doc.tokens.iter_mut().filter(|t| t.lemma.is_none()) {
            token.lemma = Some(self.lexicon.lemma(&token.text));
        }
    }
}

struct OverrideHook {
    table: OverrideTable,
}

impl Component for OverrideHook {
    fn name(&self) -> &str {
        OVERRIDE_HOOK
    }

    fn process(&self, doc: &mut Doc) {
        for token in &mut doc.tokens {
            if let Some(lemma) = self.table.get(&token.text) {
                token.lemma = Some(lemma.to_string());
            }
        }
    }
}

/// Lemmatizer running a component pipeline over a lookup lexicon.
#[derive(Debug)]
pub struct LookupLemmatizer {
    requested: String,
    pipeline: Option<Pipeline>,
}

impl LookupLemmatizer {
    pub fn new(
        language: &str,
        overrides: Option<&OverrideSource>,
        size: ModelSize,
        resources: &ResourceConfig,
    ) -> Self {
        let pipeline = Language::from_tag(language).and_then(|lang| {
            let lexicon = load_lookup_lexicon(lang, size, resources);
            if lexicon.is_none() {
                warn!(%lang, size = size.as_str(), "no lookup lexicon available");
            }
            lexicon.map(|lexicon| {
                let mut pipeline = Pipeline::new(lang);
                pipeline.add_last(Box::new(LookupComponent { lexicon }));
                pipeline
            })
        });

        let mut lemmatizer = Self {
            requested: language.to_string(),
            pipeline,
        };
        if let Some(table) = overrides.and_then(OverrideSource::resolve) {
            lemmatizer.apply_overrides(&table);
        }
        lemmatizer
    }

    pub fn pipeline(&self) -> Option<&Pipeline> {
        self.pipeline.as_ref()
    }
}

impl LemmaEngine for LookupLemmatizer {
    fn language(&self) -> Option<Language> {
        self.pipeline.as_ref().map(Pipeline::language)
    }

    fn requested_language(&self) -> &str {
        &self.requested
    }

    fn override_strategy(&self) -> OverrideStrategy {
        OverrideStrategy::PreHook
    }

    fn apply_overrides(&mut self, table: &OverrideTable) {
        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };
        pipeline.add_first(Box::new(OverrideHook {
            table: table.clone(),
        }));
        debug!(entries = table.len(), "lemma override hook installed");
    }

    fn analyze(&self, text: &str, clean: bool) -> Result<Doc, LemmaError> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| LemmaError::InvalidLanguage(self.requested.clone()))?;
        Ok(pipeline.run(&prepare(text, clean)))
    }
}
