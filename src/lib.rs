//! An emotion analysis HTTP service backed by a pretrained ONNX text
//! classifier.
//!
//! The crate is two thin layers over external inference machinery: an
//! [`analyzer`] that loads one tokenizer + classifier pair and turns text
//! into a probability distribution over 28 emotion labels, and a [`server`]
//! that exposes it over three routes (`GET /`, `GET /emotions`,
//! `POST /analyze`).
//!
//! # Basic Usage
//!
//! ```no_run
//! use std::path::Path;
//! use limbic::EmotionAnalyzer;
//!
//! let analyzer = EmotionAnalyzer::initialize(Path::new("emotion_model_final"));
//! if analyzer.is_ready() {
//!     let result = analyzer.analyze("I can't believe how well this worked!").unwrap();
//!     println!("{}: {:.2}", result.emotion, result.confidence);
//! }
//! ```
//!
//! # Thread Safety
//!
//! The analyzer is read-only after construction and all methods take
//! `&self`, so a single instance is shared across request handlers behind an
//! `Arc` without locking.

pub mod analyzer;
pub mod config;
pub mod labels;
mod runtime;
pub mod server;

pub use analyzer::{AnalysisResult, AnalyzeError, EmotionAnalyzer, MAX_SEQUENCE_LENGTH};
pub use labels::{emotion_label, EMOTION_LABELS, NUM_EMOTIONS};
