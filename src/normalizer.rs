//! Turns unordered classifier output into the fixed Positive/Neutral/Negative display.
//!
//! Entries are matched by label value. The position of an entry in the model's
//! output carries no meaning, so nothing here indexes into it.

use crate::domain::{
    ClassificationOutput, FormattedResult, SentimentLabel, SentimentScores, Verdict,
};
use crate::error::NormalizeError;
use std::collections::HashMap;

/// Normalize a complete classifier output into display lines.
///
/// # Errors
/// Returns [`NormalizeError::MissingLabel`] naming the first absent label,
/// [`NormalizeError::DuplicateLabel`] if a label is reported twice, or
/// [`NormalizeError::InvalidConfidence`] for a score outside `[0, 1]`.
pub fn normalize(output: &ClassificationOutput) -> Result<FormattedResult, NormalizeError> {
    let scores = extract_scores(output)?;
    Ok(FormattedResult::from_scores(&scores))
}

/// Build the label-keyed scores, ignoring labels outside the vocabulary.
pub fn extract_scores(output: &ClassificationOutput) -> Result<SentimentScores, NormalizeError> {
    let mut by_label: HashMap<SentimentLabel, f64> = HashMap::with_capacity(3);

    for result in output.iter() {
        let Some(label) = SentimentLabel::from_model_label(&result.label) else {
            continue;
        };
        if !(0.0..=1.0).contains(&result.confidence) {
            return Err(NormalizeError::InvalidConfidence {
                label,
                value: result.confidence,
            });
        }
        if by_label.insert(label, result.confidence).is_some() {
            return Err(NormalizeError::DuplicateLabel(label));
        }
    }

    let score = |label: SentimentLabel| {
        by_label
            .get(&label)
            .copied()
            .ok_or(NormalizeError::MissingLabel(label))
    };

    Ok(SentimentScores {
        positive: score(SentimentLabel::Positive)?,
        neutral: score(SentimentLabel::Neutral)?,
        negative: score(SentimentLabel::Negative)?,
    })
}

/// Decide what the result page shows for a classifier output.
///
/// An empty output short-circuits to [`Verdict::NoInput`] without normalizing.
pub fn verdict_for(output: &ClassificationOutput) -> Result<Verdict, NormalizeError> {
    if output.is_empty() {
        return Ok(Verdict::NoInput);
    }
    normalize(output).map(Verdict::Scores)
}
