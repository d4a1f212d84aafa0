use crate::adapter::InferenceClient;
use crate::config::Settings;
use crate::error::AppError;
use crate::port::SentimentClassifier;
use crate::render::Pages;
use std::sync::Arc;

/// Shared application state: the classifier loaded once at startup, plus the page templates.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn SentimentClassifier>,
    pub pages: Arc<Pages>,
}

impl AppState {
    /// Create state around an already-built classifier.
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Result<Self, AppError> {
        Ok(Self {
            classifier,
            pages: Arc::new(Pages::new()?),
        })
    }

    /// Build the remote inference client from configuration settings.
    pub fn client_from_settings(settings: &Settings) -> Result<InferenceClient, AppError> {
        InferenceClient::new(settings.inference_config()).map_err(|e| AppError::Client(e.to_string()))
    }
}
