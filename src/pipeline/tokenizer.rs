use unicode_segmentation::UnicodeSegmentation;

use super::{Doc, Token};

/// Splits text into sentences, then into word-boundary segments.
/// Whitespace-only segments are dropped.
pub fn tokenize(text: &str) -> Doc {
    let mut tokens = Vec::new();
    let mut sentences = 0;

    for sentence in text.unicode_sentences() {
        let before = tokens.len();
        tokens.extend(
            sentence
                .split_word_bounds()
                .filter(|seg| !seg.trim().is_empty())
                .map(|seg| Token::new(seg, sentences)),
        );
        if tokens.len() > before {
            sentences += 1;
        }
    }

    Doc { tokens, sentences }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &Doc) -> Vec<&str> {
        doc.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        let doc = tokenize("Hola, mundo!");
        assert_eq!(texts(&doc), ["Hola", ",", "mundo", "!"]);
    }

    #[test]
    fn keeps_contractions_together() {
        let doc = tokenize("don't stop");
        assert_eq!(texts(&doc), ["don't", "stop"]);
    }

    #[test]
    fn assigns_sentence_indices() {
        let doc = tokenize("El gato duerme. El perro corre.");
        assert_eq!(doc.sentences, 2);
        assert_eq!(doc.tokens.first().map(|t| t.sentence), Some(0));
        assert_eq!(doc.tokens.last().map(|t| t.sentence), Some(1));
        assert_eq!(doc.sentence(1).count(), 4);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        let doc = tokenize("   ");
        assert!(doc.tokens.is_empty());
        assert_eq!(doc.sentences, 0);
    }

    #[test]
    fn lowercase_cleaned_text_is_one_token_per_word() {
        let doc = tokenize("los niños corren en el parque");
        assert_eq!(doc.tokens.len(), 6);
    }
}
