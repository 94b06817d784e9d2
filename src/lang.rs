use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use whatlang::Detector;

/// Languages with a known lemmatization pipeline layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
    Fr,
    De,
    It,
    Pt,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Es,
        Language::En,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::Es => &["es", "spa", "spanish", "español", "espanol", "castellano"],
            Language::En => &["en", "eng", "english", "inglés", "ingles"],
            Language::Fr => &["fr", "fra", "fre", "french", "français", "francais"],
            Language::De => &["de", "deu", "ger", "german", "deutsch", "alemán"],
            Language::It => &["it", "ita", "italian", "italiano"],
            Language::Pt => &["pt", "por", "portuguese", "português", "portugues"],
        }
    }

    /// Normalizes a user-supplied tag (`"ES"`, `"es_CO"`, `"spanish"`, ...).
    /// Returns `None` for anything that does not name a supported language.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        let base = tag.split(['-', '_']).next().unwrap_or_default();
        if base.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|lang| lang.aliases().contains(&base))
    }

    fn to_whatlang(self) -> whatlang::Lang {
        match self {
            Language::Es => whatlang::Lang::Spa,
            Language::En => whatlang::Lang::Eng,
            Language::Fr => whatlang::Lang::Fra,
            Language::De => whatlang::Lang::Deu,
            Language::It => whatlang::Lang::Ita,
            Language::Pt => whatlang::Lang::Por,
        }
    }

    fn from_whatlang(lang: whatlang::Lang) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.to_whatlang() == lang)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of language detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub language: Language,
    pub confidence: f64,
    /// Whether the detector is confident enough to trust the guess. Short
    /// inputs (a greeting, a couple of words) rarely are.
    pub reliable: bool,
}

/// Detects the language of `text`, restricted to the supported languages.
pub fn detect(text: &str) -> Option<Detection> {
    let allowlist = Language::ALL.iter().map(|l| l.to_whatlang()).collect();
    let info = Detector::with_allowlist(allowlist).detect(text)?;
    let detection = Detection {
        language: Language::from_whatlang(info.lang())?,
        confidence: info.confidence(),
        reliable: info.is_reliable(),
    };
    debug!(
        lang = detection.language.code(),
        confidence = detection.confidence,
        reliable = detection.reliable,
        "language detected"
    );
    Some(detection)
}

/// Detects the language of `text`.
///
/// `auto` works best on a sentence or more; a guess the detector is unsure of
/// is still returned but logged as a warning.
pub fn detect_language(text: &str) -> Option<Language> {
    let detection = detect(text)?;
    if !detection.reliable {
        warn!(
            lang = detection.language.code(),
            confidence = detection.confidence,
            "unreliable language detection, pass an explicit language for short text"
        );
    }
    Some(detection.language)
}

/// A requested language: an explicit tag or `auto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lang {
    Auto,
    Tag(String),
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Tag("es".to_string())
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("auto") {
            Lang::Auto
        } else {
            Lang::Tag(s.trim().to_string())
        }
    }
}

impl FromStr for Lang {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Lang::from(s))
    }
}

impl From<Language> for Lang {
    fn from(language: Language) -> Self {
        Lang::Tag(language.code().to_string())
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::Auto => f.write_str("auto"),
            Lang::Tag(tag) => f.write_str(tag),
        }
    }
}

impl Lang {
    /// Resolves `auto` by detecting the language of `text`; explicit tags are
    /// validated with [`Language::from_tag`].
    pub fn resolve(&self, text: &str) -> Option<Language> {
        match self {
            Lang::Auto => detect_language(text),
            Lang::Tag(tag) => Language::from_tag(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tag_accepts_codes_and_names() {
        assert_eq!(Language::from_tag("es"), Some(Language::Es));
        assert_eq!(Language::from_tag("ES"), Some(Language::Es));
        assert_eq!(Language::from_tag("spanish"), Some(Language::Es));
        assert_eq!(Language::from_tag("Español"), Some(Language::Es));
        assert_eq!(Language::from_tag("eng"), Some(Language::En));
        assert_eq!(Language::from_tag("deutsch"), Some(Language::De));
    }

    #[test]
    fn from_tag_strips_region() {
        assert_eq!(Language::from_tag("es-CO"), Some(Language::Es));
        assert_eq!(Language::from_tag("pt_BR"), Some(Language::Pt));
        assert_eq!(Language::from_tag(" en-US "), Some(Language::En));
    }

    #[test]
    fn from_tag_rejects_unknown() {
        assert_eq!(Language::from_tag("xx"), None);
        assert_eq!(Language::from_tag(""), None);
        assert_eq!(Language::from_tag("-"), None);
        assert_eq!(Language::from_tag("auto"), None);
    }

    #[test]
    fn lang_parses_auto_case_insensitively() {
        assert_eq!("auto".parse::<Lang>().unwrap(), Lang::Auto);
        assert_eq!("AUTO".parse::<Lang>().unwrap(), Lang::Auto);
        assert_eq!("es".parse::<Lang>().unwrap(), Lang::Tag("es".into()));
    }

    #[test]
    fn default_lang_is_spanish() {
        assert_eq!(Lang::default().resolve(""), Some(Language::Es));
    }

    #[test]
    fn detects_spanish() {
        let text = "El perro corre por el parque mientras los niños juegan con la pelota \
                    durante toda la tarde y sus padres conversan en la terraza del café";
        assert_eq!(detect_language(text), Some(Language::Es));
    }

    #[test]
    fn detects_english() {
        let text = "The children were playing in the garden while their parents were \
                    talking about the weather and the news of the week";
        assert_eq!(detect_language(text), Some(Language::En));
    }

    #[test]
    fn detect_empty_is_none() {
        assert_eq!(detect_language(""), None);
    }

    #[test]
    fn explicit_tag_skips_detection() {
        let lang = Lang::Tag("en".into());
        assert_eq!(lang.resolve("texto claramente en español"), Some(Language::En));
    }

    #[test]
    fn long_text_detection_is_reliable() {
        let text = "The children were playing in the garden while their parents were \
                    talking about the weather and the news of the week";
        let detection = detect(text).unwrap();
        assert_eq!(detection.language, Language::En);
        assert!(detection.reliable, "confidence {}", detection.confidence);
    }

    #[test]
    fn greeting_detection_is_unreliable() {
        let detection = detect("Buenos días").unwrap();
        assert!(!detection.reliable, "{detection:?}");
        assert_eq!(detect_language("Buenos días"), Some(detection.language));
    }

    #[test]
    fn auto_resolves_through_detection() {
        let text = "El perro corre por el parque mientras los niños juegan con la pelota \
                    durante toda la tarde y sus padres conversan en la terraza del café";
        assert_eq!(Lang::Auto.resolve(text), Some(Language::Es));
        assert_eq!(Lang::Auto.resolve(""), None);
    }
}
