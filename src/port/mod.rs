use crate::domain::ClassificationOutput;
use crate::error::InferenceError;
use std::future::Future;
use std::pin::Pin;

/// Whether the model should report every label or only the top one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScoreMode {
    #[default]
    AllLabels,
    /// Only the highest-scoring label. The form handler never asks for this;
    /// a single score cannot be normalized into the three display lines.
    TopLabel,
}

/// Sentiment inference capability (remote endpoint, mock, ...).
///
/// This trait is dyn-compatible by using boxed futures instead of `impl Future`.
pub trait SentimentClassifier: Send + Sync {
    fn classify<'a>(
        &'a self,
        text: &'a str,
        mode: ScoreMode,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationOutput, InferenceError>> + Send + 'a>>;
}
