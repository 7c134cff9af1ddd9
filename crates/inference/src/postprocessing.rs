use crate::errors::ProcessingError;
use std::collections::BTreeMap;

/// Severity grades in model output order.
pub const CLASS_LABELS: [&str; 3] = ["Grade 0 (Normal)", "Grade 3 (Moderate)", "Grade 4 (Severe)"];

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub class_index: usize,
    pub label: &'static str,
    pub confidence: f32,
    /// Score of every label, not only the winner. The labels sort
    /// lexicographically in index order, so iteration follows class index.
    pub probabilities: BTreeMap<&'static str, f32>,
}

/// Index of the highest score. The first index wins exact ties.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;
    let mut best = (0, *first);
    for (i, &score) in rest.iter().enumerate() {
        if score > best.1 {
            best = (i + 1, score);
        }
    }
    Some(best.0)
}

/// Map a raw score vector onto the fixed label set.
///
/// Scores are reported as the model produced them, without re-normalization.
pub fn classify(scores: &[f32]) -> Result<Classification, ProcessingError> {
    if scores.len() != CLASS_LABELS.len() {
        return Err(ProcessingError::ClassCount {
            expected: CLASS_LABELS.len(),
            actual: scores.len(),
        });
    }

    let class_index = argmax(scores).ok_or(ProcessingError::ClassCount {
        expected: CLASS_LABELS.len(),
        actual: 0,
    })?;

    let probabilities = CLASS_LABELS
        .iter()
        .zip(scores)
        .map(|(&label, &score)| (label, score))
        .collect();

    Ok(Classification {
        class_index,
        label: CLASS_LABELS[class_index],
        confidence: scores[class_index],
        probabilities,
    })
}
