use crate::domain::model::Label;

pub const DEFAULT_MIN_CONFIDENCE: f32 = 65.0;
pub const DEFAULT_MAX_LABELS: usize = 30;

/// Keeps labels at or above `min_confidence`, in the order the service
/// returned them, and stops after `max_labels`.
pub fn filter_labels(labels: Vec<Label>, min_confidence: f32, max_labels: usize) -> Vec<Label> {
    labels
        .into_iter()
        .filter(|label| label.confidence >= min_confidence)
        .take(max_labels)
        .collect()
}

pub fn label_names(labels: &[Label]) -> Vec<String> {
    labels.iter().map(|label| label.name.clone()).collect()
}
