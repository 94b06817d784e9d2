//! Basic text cleaning applied before lemmatization.

use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub lowercase: bool,
    pub remove_numbers: bool,
    pub remove_punctuation: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_numbers: true,
            remove_punctuation: true,
        }
    }
}

/// Cleans `text` with the default options.
pub fn basic_clean(text: &str) -> String {
    clean_with(text, CleanOptions::default())
}

pub fn clean_with(text: &str, opts: CleanOptions) -> String {
    let normalized: String = text.nfc().collect();
    let cased = if opts.lowercase {
        normalized.to_lowercase()
    } else {
        normalized
    };

    let mut out = String::with_capacity(cased.len());
    for c in cased.chars() {
        if c.is_numeric() && opts.remove_numbers {
            out.push(' ');
        } else if !c.is_alphanumeric() && !c.is_whitespace() && opts.remove_punctuation {
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(basic_clean("¡Hola, Mundo!"), "hola mundo");
    }

    #[test]
    fn removes_numbers_by_default() {
        assert_eq!(basic_clean("tengo 3 gatos y 12 perros"), "tengo gatos y perros");
    }

    #[test]
    fn keeps_numbers_when_asked() {
        let opts = CleanOptions {
            remove_numbers: false,
            ..CleanOptions::default()
        };
        assert_eq!(clean_with("tengo 3 gatos", opts), "tengo 3 gatos");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(basic_clean("  muchos \t espacios\n\naquí  "), "muchos espacios aquí");
    }

    #[test]
    fn composes_decomposed_accents() {
        let decomposed = "cancio\u{301}n";
        assert_eq!(basic_clean(decomposed), "canción");
    }

    #[test]
    fn splits_on_apostrophes_and_hyphens() {
        assert_eq!(basic_clean("don't well-known"), "don t well known");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(basic_clean(""), "");
        assert_eq!(basic_clean("?!.,"), "");
    }
}
