use crate::app::state::AppState;
use crate::domain::Verdict;
use crate::error::AnalyzeError;
use crate::normalizer::verdict_for;
use crate::port::{ScoreMode, SentimentClassifier};
use crate::render::escape_html;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
pub struct EmailForm {
    #[serde(default)]
    pub emailtext: Option<String>,
}

/// Score one submitted email.
///
/// Missing or blank text never reaches the classifier, and an empty classifier
/// output never reaches the normalizer. Both become [`Verdict::NoInput`].
pub async fn analyze(
    classifier: &dyn SentimentClassifier,
    text: Option<&str>,
) -> Result<Verdict, AnalyzeError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        info!("No email text submitted");
        return Ok(Verdict::NoInput);
    };

    let escaped = escape_html(text);
    let output = classifier.classify(&escaped, ScoreMode::AllLabels).await?;

    if output.is_empty() {
        info!("Classifier returned no scores");
    }
    Ok(verdict_for(&output)?)
}

/// Handler for POST / (form submission -> result page)
pub async fn analyze_handler(
    State(state): State<AppState>,
    Form(form): Form<EmailForm>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    info!(
        "Received email with length: {}",
        form.emailtext.as_deref().map_or(0, str::len)
    );

    let verdict = match analyze(state.classifier.as_ref(), form.emailtext.as_deref()).await {
        Ok(verdict) => verdict,
        Err(AnalyzeError::Inference(e)) => {
            error!("Sentiment inference failed: {e}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sentiment analysis failed",
            ));
        }
        Err(AnalyzeError::Normalize(e)) => {
            error!("Unexpected classifier output: {e}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected classifier output",
            ));
        }
    };

    let lines = verdict.into_lines();
    state.pages.results(&lines).map(Html).map_err(|e| {
        error!("Failed to render results page: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
    })
}
