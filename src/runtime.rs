use std::sync::OnceLock;

use anyhow::anyhow;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;

/// Initializes the process-wide ONNX Runtime environment on first use.
///
/// A failed initialization is remembered and reported as an error on every
/// subsequent call; it never panics, so the analyzer's load path can swallow
/// it and leave the service not-ready.
fn ensure_initialized() -> anyhow::Result<()> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();
    INIT.get_or_init(|| {
        ort::init()
            .with_name("limbic")
            .commit()
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
    .as_ref()
    .map_err(|e| anyhow!("failed to initialize ONNX Runtime: {e}"))?;
    Ok(())
}

/// Builds a session builder for the classification model.
///
/// Threading is left to ONNX Runtime's defaults, and execution-provider
/// selection to its fallback order: an accelerator when one is registered
/// and available, else CPU.
pub(crate) fn create_session_builder() -> anyhow::Result<SessionBuilder> {
    ensure_initialized()?;
    let builder =
        Session::builder()?.with_optimization_level(GraphOptimizationLevel::Level3)?;
    Ok(builder)
}
