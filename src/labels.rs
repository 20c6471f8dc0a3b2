//! The fixed set of emotion labels the model predicts.
//!
//! The order of `EMOTION_LABELS` mirrors the index ordering the classifier
//! was exported with. Reordering entries silently corrupts results, so the
//! table is append-never, reorder-never.

/// The 27 GoEmotions labels plus `neutral`, in model output order.
pub const EMOTION_LABELS: [&str; 28] = [
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// Number of emotion classes in the label set.
pub const NUM_EMOTIONS: usize = EMOTION_LABELS.len();

/// Returns the label name for a model output index, if in range.
pub fn emotion_label(index: usize) -> Option<&'static str> {
    EMOTION_LABELS.get(index).copied()
}
