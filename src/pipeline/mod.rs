//! Tokenize-then-annotate pipeline shared by both lemmatizer engines.

mod tokenizer;

pub use tokenizer::tokenize;

use std::fmt;

use tracing::debug;

use crate::lang::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: Option<String>,
    pub sentence: usize,
}

impl Token {
    pub fn new(text: &str, sentence: usize) -> Self {
        Self {
            text: text.to_string(),
            lemma: None,
            sentence,
        }
    }

    /// Assigned lemma, or the surface text when no stage set one.
    pub fn lemma_or_text(&self) -> &str {
        self.lemma.as_deref().unwrap_or(&self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doc {
    pub tokens: Vec<Token>,
    pub sentences: usize,
}

impl Doc {
    pub fn sentence(&self, index: usize) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.sentence == index)
    }

    /// All lemmas in token order, separated by a single space.
    pub fn joined_lemmas(&self) -> String {
        self.tokens
            .iter()
            .map(Token::lemma_or_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A stage that annotates a tokenized document in place.
pub trait Component: Send + Sync {
    fn name(&self) -> &str;
    fn process(&self, doc: &mut Doc);
}

/// A tokenizer followed by an ordered list of components.
pub struct Pipeline {
    language: Language,
    components: Vec<Box<dyn Component>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("language", &self.language)
            .field("components", &self.component_names())
            .finish()
    }
}

impl Pipeline {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            components: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.iter().any(|c| c.name() == name)
    }

    /// Appends a component. A component with the same name is replaced in place.
    pub fn add_last(&mut self, component: Box<dyn Component>) {
        if let Some(slot) = self.slot(component.name()) {
            self.components[slot] = component;
        } else {
            self.components.push(component);
        }
    }

    /// Inserts a component ahead of all others, replacing any existing one
    /// with the same name.
    pub fn add_first(&mut self, component: Box<dyn Component>) {
        self.remove(component.name());
        debug!(component = component.name(), "component inserted first");
        self.components.insert(0, component);
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.slot(name).map(|slot| self.components.remove(slot))
    }

    fn slot(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name() == name)
    }

    pub fn run(&self, text: &str) -> Doc {
        let mut doc = tokenize(text);
        for component in &self.components {
            component.process(&mut doc);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant {
        name: &'static str,
        lemma: &'static str,
    }

    impl Component for Constant {
        fn name(&self) -> &str {
            self.name
        }

        fn process(&self, doc: &mut Doc) {
            for token in doc.tokens.iter_mut().filter(|t| t.lemma.is_none()) {
                token.lemma = Some(self.lemma.to_string());
            }
        }
    }

    fn constant(name: &'static str, lemma: &'static str) -> Box<dyn Component> {
        Box::new(Constant { name, lemma })
    }

    #[test]
    fn runs_components_in_order() {
        let mut pipeline = Pipeline::new(Language::Es);
        pipeline.add_last(constant("second", "b"));
        pipeline.add_first(constant("first", "a"));

        assert_eq!(pipeline.component_names(), ["first", "second"]);
        assert_eq!(pipeline.run("uno dos").joined_lemmas(), "a a");
    }

    #[test]
    fn add_first_replaces_same_name() {
        let mut pipeline = Pipeline::new(Language::Es);
        pipeline.add_last(constant("lemmatizer", "x"));
        pipeline.add_first(constant("hook", "a"));
        pipeline.add_first(constant("hook", "b"));

        assert_eq!(pipeline.component_names(), ["hook", "lemmatizer"]);
        assert_eq!(pipeline.run("uno").joined_lemmas(), "b");
    }

    #[test]
    fn add_last_replaces_in_place() {
        let mut pipeline = Pipeline::new(Language::En);
        pipeline.add_last(constant("a", "1"));
        pipeline.add_last(constant("b", "2"));
        pipeline.add_last(constant("a", "3"));

        assert_eq!(pipeline.component_names(), ["a", "b"]);
        assert_eq!(pipeline.run("word").joined_lemmas(), "3");
    }

    #[test]
    fn remove_returns_component() {
        let mut pipeline = Pipeline::new(Language::En);
        pipeline.add_last(constant("a", "1"));
        assert!(pipeline.remove("a").is_some());
        assert!(pipeline.remove("a").is_none());
        assert!(!pipeline.has_component("a"));
    }

    #[test]
    fn empty_pipeline_echoes_text() {
        let pipeline = Pipeline::new(Language::En);
        assert_eq!(pipeline.run("Hello, world").joined_lemmas(), "Hello , world");
    }

    #[test]
    fn debug_lists_component_names() {
        let mut pipeline = Pipeline::new(Language::En);
        pipeline.add_last(constant("lemmatizer", "x"));
        assert!(format!("{pipeline:?}").contains("lemmatizer"));
    }
}
