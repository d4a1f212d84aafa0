//! Client for a Hugging Face style text-classification inference endpoint.
//!
//! `POST {base}/models/{model}` with `{"inputs": ..., "parameters": {...}}`. `top_k` is
//! omitted when every label score is wanted and set to 1 for the top label only.
//! The endpoint answers either `[[{label, score}, ...]]` or `[{label, score}, ...]`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{ClassificationOutput, ClassificationResult};
use crate::error::InferenceError;
use crate::port::{ScoreMode, SentimentClassifier};

/// Inference client settings.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub connect_timeout: Duration,
    pub total_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: ClassifyParameters,
}

#[derive(Debug, Serialize)]
struct ClassifyParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<RawScore>>),
    Flat(Vec<RawScore>),
}

impl ClassifyResponse {
    /// Scores for the single input that was sent.
    fn into_output(self) -> ClassificationOutput {
        let scores = match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .map(|raw| ClassificationResult::new(raw.label, raw.score))
            .collect()
    }
}

/// No cap for `AllLabels`: a model with extra labels must not push a sentiment out of the list.
fn top_k(mode: ScoreMode) -> Option<usize> {
    match mode {
        ScoreMode::AllLabels => None,
        ScoreMode::TopLabel => Some(1),
    }
}

/// Remote sentiment classifier.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: Client,
    model_url: Url,
    model: String,
    api_token: Option<String>,
}

impl InferenceClient {
    /// Build a client for the configured endpoint and model.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.total_timeout)
            .build()
            .map_err(|e| InferenceError::Http(format!("failed to build HTTP client: {e}")))?;

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let model_url = Url::parse(&base)
            .and_then(|url| url.join(&format!("models/{}", config.model)))
            .map_err(|e| InferenceError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        Ok(Self {
            http,
            model_url,
            model: config.model,
            api_token: config.api_token,
        })
    }

    pub fn model_url(&self) -> &Url {
        &self.model_url
    }

    /// Ask the endpoint for sentiment scores of `text`.
    pub async fn classify_text(
        &self,
        text: &str,
        mode: ScoreMode,
    ) -> Result<ClassificationOutput, InferenceError> {
        debug!(
            model = %self.model,
            input_len = text.len(),
            ?mode,
            "requesting sentiment scores"
        );

        let body = ClassifyRequest {
            inputs: text,
            parameters: ClassifyParameters { top_k: top_k(mode) },
        };

        let mut request = self.http.post(self.model_url.clone()).json(&body);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(self.status_error(status, message));
        }

        let payload = response
            .text()
            .await
            .map_err(|e| InferenceError::Http(e.to_string()))?;
        let parsed: ClassifyResponse =
            serde_json::from_str(&payload).map_err(|e| InferenceError::Decode(e.to_string()))?;

        let output = parsed.into_output();
        debug!(entries = output.len(), "received sentiment scores");
        Ok(output)
    }

    /// Check that the model endpoint is reachable.
    pub async fn health_check(&self) -> Result<(), InferenceError> {
        let mut request = self.http.get(self.model_url.clone());
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InferenceError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(self.status_error(status, message))
        }
    }

    fn status_error(&self, status: StatusCode, message: String) -> InferenceError {
        warn!(status = status.as_u16(), model = %self.model, "inference endpoint returned error status");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InferenceError::Unauthorized,
            StatusCode::NOT_FOUND => InferenceError::ModelNotFound(self.model.clone()),
            StatusCode::SERVICE_UNAVAILABLE => InferenceError::Unavailable,
            other => InferenceError::Api {
                status: other.as_u16(),
                message,
            },
        }
    }
}

impl SentimentClassifier for InferenceClient {
    fn classify<'a>(
        &'a self,
        text: &'a str,
        mode: ScoreMode,
    ) -> Pin<Box<dyn Future<Output = Result<ClassificationOutput, InferenceError>> + Send + 'a>>
    {
        Box::pin(self.classify_text(text, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "finiteautomata/bertweet-base-sentiment-analysis";
    const MODEL_PATH: &str = "/models/finiteautomata/bertweet-base-sentiment-analysis";

    fn test_config(base_url: String, api_token: Option<&str>) -> InferenceConfig {
        InferenceConfig {
            base_url,
            model: MODEL.to_string(),
            api_token: api_token.map(str::to_string),
            connect_timeout: Duration::from_secs(3),
            total_timeout: Duration::from_secs(10),
        }
    }

    #[tokio::test]
    async fn classify_decodes_nested_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("authorization", "Bearer hf-token"))
            .and(body_json(serde_json::json!({
                "inputs": "great news",
                "parameters": {}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
                { "label": "POS", "score": 0.91 },
                { "label": "NEU", "score": 0.07 },
                { "label": "NEG", "score": 0.02 }
            ]])))
            .mount(&server)
            .await;

        let client = InferenceClient::new(test_config(server.uri(), Some("hf-token")))
            .expect("client should build");
        let output = client
            .classify_text("great news", ScoreMode::AllLabels)
            .await
            .expect("classify should succeed");

        assert_eq!(output.len(), 3);
        let first = output.iter().next().unwrap();
        assert_eq!(first.label, "POS");
        assert!((first.confidence - 0.91).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn classify_decodes_flat_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "label": "NEG", "score": 0.6 },
                { "label": "NEU", "score": 0.3 },
                { "label": "POS", "score": 0.1 }
            ])))
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        let output = client
            .classify_text("meh", ScoreMode::AllLabels)
            .await
            .expect("classify should succeed");

        let labels: Vec<&str> = output.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["NEG", "NEU", "POS"]);
    }

    #[tokio::test]
    async fn all_labels_mode_keeps_sentiments_behind_extra_labels() {
        let server = MockServer::start().await;

        // A model with a fourth label ranks it first; an uncapped request still gets NEG.
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(body_json(serde_json::json!({
                "inputs": "hi",
                "parameters": {}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
                { "label": "OTHER", "score": 0.5 },
                { "label": "POS", "score": 0.3 },
                { "label": "NEU", "score": 0.15 },
                { "label": "NEG", "score": 0.05 }
            ]])))
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        let output = client
            .classify_text("hi", ScoreMode::AllLabels)
            .await
            .expect("classify should succeed");

        assert_eq!(output.len(), 4);
        let formatted = crate::normalizer::normalize(&output).expect("all sentiments present");
        assert_eq!(
            formatted.into_lines(),
            vec!["Positive: 0.3", "Neutral: 0.15", "Negative: 0.05"]
        );
    }

    #[tokio::test]
    async fn top_label_mode_requests_single_score() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(body_json(serde_json::json!({
                "inputs": "ok",
                "parameters": { "top_k": 1 }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([[{ "label": "NEU", "score": 0.8 }]])),
            )
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        let output = client
            .classify_text("ok", ScoreMode::TopLabel)
            .await
            .expect("classify should succeed");

        assert_eq!(output.len(), 1);
    }

    #[tokio::test]
    async fn empty_response_yields_empty_output() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[]])))
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        let output = client
            .classify_text("", ScoreMode::AllLabels)
            .await
            .expect("classify should succeed");

        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn loading_model_maps_to_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("loading"))
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        let err = client
            .classify_text("hi", ScoreMode::AllLabels)
            .await
            .expect_err("should fail");

        assert!(matches!(err, InferenceError::Unavailable));
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/missing/model"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("authorization", "Bearer bad"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("authorization", "Bearer boom"))
            .respond_with(ResponseTemplate::new(500).set_body_string("kaboom"))
            .mount(&server)
            .await;

        let mut missing = test_config(server.uri(), None);
        missing.model = "missing/model".to_string();
        let err = InferenceClient::new(missing)
            .unwrap()
            .classify_text("hi", ScoreMode::AllLabels)
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::ModelNotFound(ref m) if m == "missing/model"));

        let err = InferenceClient::new(test_config(server.uri(), Some("bad")))
            .unwrap()
            .classify_text("hi", ScoreMode::AllLabels)
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Unauthorized));

        let err = InferenceClient::new(test_config(server.uri(), Some("boom")))
            .unwrap()
            .classify_text("hi", ScoreMode::AllLabels)
            .await
            .unwrap_err();
        assert!(
            matches!(err, InferenceError::Api { status: 500, ref message } if message == "kaboom")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "nope" })),
            )
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        let err = client
            .classify_text("hi", ScoreMode::AllLabels)
            .await
            .expect_err("should fail");

        assert!(matches!(err, InferenceError::Decode(_)));
    }

    #[tokio::test]
    async fn health_check_follows_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client =
            InferenceClient::new(test_config(server.uri(), None)).expect("client should build");
        client.health_check().await.expect("health check should pass");

        let mut other = test_config(server.uri(), None);
        other.model = "other/model".to_string();
        let err = InferenceClient::new(other)
            .unwrap()
            .health_check()
            .await
            .expect_err("unmounted model should 404");
        assert!(matches!(err, InferenceError::ModelNotFound(_)));
    }

    #[test]
    fn base_url_with_path_keeps_prefix() {
        let mut config = test_config("http://localhost:8080/hf".to_string(), None);
        config.model = "org/model".to_string();
        let client = InferenceClient::new(config).expect("client should build");
        assert_eq!(
            client.model_url().as_str(),
            "http://localhost:8080/hf/models/org/model"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = InferenceClient::new(test_config("not a url".to_string(), None)).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidUrl(_)));
    }
}
