use crate::domain::SentimentLabel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build inference client: {0}")]
    Client(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Raised when raw classifier output cannot be turned into the three display scores.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("classifier output is missing label {0}")]
    MissingLabel(SentimentLabel),

    #[error("classifier output contains label {0} more than once")]
    DuplicateLabel(SentimentLabel),

    #[error("confidence {value} for label {label} is outside [0, 1]")]
    InvalidConfidence { label: SentimentLabel, value: f64 },
}

/// Failures talking to the inference endpoint.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("invalid inference base URL: {0}")]
    InvalidUrl(String),

    #[error("inference request failed: {0}")]
    Http(String),

    #[error("inference endpoint rejected credentials")]
    Unauthorized,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("model is loading, retry later")]
    Unavailable,

    #[error("inference endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode inference response: {0}")]
    Decode(String),
}

/// Why a submitted email could not be scored.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
