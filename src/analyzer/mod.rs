//! The inference wrapper: one loaded model, one text-in, distribution-out
//! operation.

#[allow(clippy::module_inception)]
mod analyzer;
mod error;

pub use analyzer::{AnalysisResult, EmotionAnalyzer, MAX_SEQUENCE_LENGTH};
pub use error::AnalyzeError;
