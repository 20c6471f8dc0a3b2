use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use log::{error, info};
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use tokenizers::{Tokenizer, TruncationParams};

use super::error::AnalyzeError;
use crate::labels::{EMOTION_LABELS, NUM_EMOTIONS};
use crate::runtime::create_session_builder;

/// Inputs longer than this are silently truncated by the tokenizer.
pub const MAX_SEQUENCE_LENGTH: usize = 512;

/// The outcome of analyzing one piece of text: the winning emotion plus the
/// full probability distribution over the label set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// The analyzed text, after whitespace trimming.
    pub text: String,
    /// Name of the highest-probability emotion.
    pub emotion: String,
    /// Probability per emotion label; values sum to 1.
    pub scores: HashMap<String, f32>,
    /// Probability assigned to the predicted emotion.
    pub confidence: f32,
}

/// A loaded tokenizer + classification session pair.
struct LoadedModel {
    tokenizer: Tokenizer,
    session: Session,
}

/// Wraps one pretrained emotion classifier behind a text-in,
/// distribution-out contract.
///
/// The analyzer has exactly two states. It starts not-ready and becomes
/// ready only when [`EmotionAnalyzer::initialize`] manages to load both the
/// tokenizer and the model; there is no reload and no way back. A not-ready
/// analyzer still answers [`analyze`](Self::analyze), with
/// [`AnalyzeError::NotReady`].
///
/// All methods take `&self`, so the analyzer can be shared across request
/// handlers behind an `Arc` without locking.
pub struct EmotionAnalyzer {
    loaded: Option<LoadedModel>,
}

impl EmotionAnalyzer {
    /// Loads the tokenizer and model from `model_dir`.
    ///
    /// Loading failures are logged and swallowed: the returned analyzer is
    /// simply not ready, so the service can still start and report health.
    /// Called once at startup; never retried.
    pub fn initialize(model_dir: &Path) -> Self {
        match LoadedModel::load(model_dir) {
            Ok(model) => {
                info!("Model loaded successfully from {}", model_dir.display());
                Self {
                    loaded: Some(model),
                }
            }
            Err(e) => {
                error!("Error loading model: {e:#}");
                Self { loaded: None }
            }
        }
    }

    /// Returns an analyzer with no model bound. Useful as a stand-in where
    /// readiness handling is under test and no artifacts exist.
    pub fn unloaded() -> Self {
        Self { loaded: None }
    }

    /// Whether both tokenizer and model are bound.
    pub fn is_ready(&self) -> bool {
        self.loaded.is_some()
    }

    /// Classifies `text` and returns the full emotion distribution.
    ///
    /// Leading and trailing whitespace is stripped first. Empty input is
    /// rejected before the readiness check, so it reports
    /// [`AnalyzeError::EmptyInput`] regardless of model state.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzeError::EmptyInput);
        }
        let model = self.loaded.as_ref().ok_or(AnalyzeError::NotReady)?;

        let probabilities = model.run(text)?;
        let predicted = argmax(&probabilities);

        let scores: HashMap<String, f32> = EMOTION_LABELS
            .iter()
            .zip(&probabilities)
            .map(|(label, p)| (label.to_string(), *p))
            .collect();

        Ok(AnalysisResult {
            text: text.to_string(),
            emotion: EMOTION_LABELS[predicted].to_string(),
            confidence: probabilities[predicted],
            scores,
        })
    }
}

impl LoadedModel {
    fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let tokenizer_path = model_dir.join("tokenizer.json");
        let model_path = model_dir.join("model.onnx");

        if !tokenizer_path.exists() {
            bail!("tokenizer file not found: {}", tokenizer_path.display());
        }
        if !model_path.exists() {
            bail!("model file not found: {}", model_path.display());
        }

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("failed to load tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("failed to configure truncation: {e}"))?;

        let session = create_session_builder()
            .context("failed to create session builder")?
            .commit_from_file(&model_path)
            .context("failed to load ONNX model")?;

        Self::validate_session(&session)?;
        Ok(Self { tokenizer, session })
    }

    /// Checks the model has the input/output arity of a sequence classifier.
    fn validate_session(session: &Session) -> anyhow::Result<()> {
        if session.inputs.len() < 2 {
            bail!(
                "model must have at least 2 inputs (input_ids and attention_mask), found {}",
                session.inputs.len()
            );
        }
        if session.outputs.is_empty() {
            bail!("model must have at least 1 output for logits");
        }
        Ok(())
    }

    /// Tokenizes `text`, runs the forward pass, and returns the softmaxed
    /// probability distribution over the label set.
    fn run(&self, text: &str) -> Result<Vec<f32>, AnalyzeError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| AnalyzeError::Inference(format!("tokenization failed: {e}")))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        if ids.is_empty() {
            return Err(AnalyzeError::Inference(
                "tokenizer produced no tokens".into(),
            ));
        }

        let input_array = Array2::from_shape_vec((1, ids.len()), ids)
            .map_err(|e| AnalyzeError::Inference(format!("failed to create input array: {e}")))?;
        let input_dyn = input_array.into_dyn();
        let input_ids = input_dyn.as_standard_layout();

        let mask_array = Array2::from_shape_vec((1, mask.len()), mask)
            .map_err(|e| AnalyzeError::Inference(format!("failed to create mask array: {e}")))?;
        let mask_dyn = mask_array.into_dyn();
        let attention_mask = mask_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            "input_ids",
            Tensor::from_array(&input_ids).map_err(|e| {
                AnalyzeError::Inference(format!("failed to create input tensor: {e}"))
            })?,
        );
        input_tensors.insert(
            "attention_mask",
            Tensor::from_array(&attention_mask).map_err(|e| {
                AnalyzeError::Inference(format!("failed to create mask tensor: {e}"))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| AnalyzeError::Inference(format!("failed to run model: {e}")))?;
        let logits = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            AnalyzeError::Inference(format!("failed to extract output tensor: {e}"))
        })?;

        if logits.ndim() != 2 || logits.shape()[1] != NUM_EMOTIONS {
            return Err(AnalyzeError::Inference(format!(
                "unexpected logits shape {:?}, expected [1, {}]",
                logits.shape(),
                NUM_EMOTIONS
            )));
        }

        let row: Vec<f32> = logits.slice(ndarray::s![0, ..]).iter().copied().collect();
        Ok(softmax(&row))
    }
}

/// Numerically stable softmax over one logits row.
pub(crate) fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Index of the maximum value; ties break toward the lowest index.
pub(crate) fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
