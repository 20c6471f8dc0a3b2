use thiserror::Error;

/// Errors returned by [`EmotionAnalyzer::analyze`](super::EmotionAnalyzer::analyze).
///
/// The three variants map to distinct HTTP statuses at the service layer, so
/// call sites can tell client mistakes from server-side failures.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The model failed to load at startup, or was never loaded.
    #[error("Model is not loaded")]
    NotReady,

    /// The input text was empty after trimming whitespace.
    #[error("Text cannot be empty")]
    EmptyInput,

    /// Tokenization or the forward pass failed.
    #[error("Error analyzing emotion: {0}")]
    Inference(String),
}
