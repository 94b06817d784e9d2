/// Recoverable conditions reported by the lemmatizer call surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LemmaError {
    #[error("Invalid language '{0}': no lemmatization model is available for it")]
    InvalidLanguage(String),

    #[error("Invalid lemmatizer engine '{0}'. Choose 'lookup' or 'dictionary'.")]
    UnknownEngine(String),
}
