//! Shared test support utilities
//!
//! Provides a scripted `MockClassifier` implementing `SentimentClassifier`
//! for use in unit and integration tests.

use crate::domain::{ClassificationOutput, ClassificationResult};
use crate::error::InferenceError;
use crate::port::{ScoreMode, SentimentClassifier};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Classifier that answers every request with the same scripted output.
///
/// Counts calls and remembers the last input so tests can check what the
/// handler forwarded.
pub struct MockClassifier {
    output: ClassificationOutput,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
    should_fail: AtomicBool,
}

impl MockClassifier {
    pub fn new(output: ClassificationOutput) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn with_scores(pairs: &[(&str, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(label, score)| ClassificationResult::new(*label, *score))
                .collect(),
        )
    }

    pub fn failing() -> Self {
        let mock = Self::new(ClassificationOutput::default());
        mock.set_should_fail(true);
        mock
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SentimentClassifier for MockClassifier {
    fn classify<'a>(
        &'a self,
        text: &'a str,
        _mode: ScoreMode,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationOutput, InferenceError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut guard) = self.last_input.lock() {
                *guard = Some(text.to_string());
            }
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(InferenceError::Unavailable);
            }
            Ok(self.output.clone())
        })
    }
}
