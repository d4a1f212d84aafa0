use std::env;
use std::fs;
use std::time::Duration;

use url::Url;

use crate::adapter::InferenceConfig;
use crate::error::AppError;

const DEFAULT_HTTP_PORT: u16 = 5000;
const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
const DEFAULT_INFERENCE_MODEL: &str = "finiteautomata/bertweet-base-sentiment-analysis";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Port for the form, result and health routes
    pub http_port: u16,
    pub inference_base_url: String,
    pub inference_model: String,
    /// Bearer token for the inference endpoint, if it needs one
    pub inference_api_token: Option<String>,
    pub inference_connect_timeout: Duration,
    pub inference_timeout: Duration,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_port(self.http_port)?;
        validate_base_url(&self.inference_base_url)?;
        if self.inference_model.trim().is_empty() {
            return Err(AppError::Config("Inference model cannot be empty".into()));
        }
        validate_timeout("INFERENCE_CONNECT_TIMEOUT_MS", self.inference_connect_timeout)?;
        validate_timeout("INFERENCE_TIMEOUT_MS", self.inference_timeout)?;
        Ok(())
    }

    pub fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            base_url: self.inference_base_url.clone(),
            model: self.inference_model.clone(),
            api_token: self.inference_api_token.clone(),
            connect_timeout: self.inference_connect_timeout,
            total_timeout: self.inference_timeout,
        }
    }
}

fn validate_port(port: u16) -> Result<(), AppError> {
    if port == 0 {
        return Err(AppError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Only absolute http(s) URLs can reach an inference endpoint.
fn validate_base_url(raw: &str) -> Result<(), AppError> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::Config(format!("Invalid inference base URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::Config(format!(
            "Inference base URL must be http or https, got '{other}'"
        ))),
    }
}

fn validate_timeout(name: &str, timeout: Duration) -> Result<(), AppError> {
    if timeout.is_zero() {
        return Err(AppError::Config(format!("{name} must be greater than 0")));
    }
    Ok(())
}

/// Read `name`, or the contents of the file named by `{name}_FILE` (Docker Secrets).
fn get_optional_or_file<F>(lookup: &F, name: &str) -> Result<Option<String>, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_var = format!("{name}_FILE");
    if let Some(path) = lookup(&file_var) {
        return fs::read_to_string(&path)
            .map(|content| Some(content.trim().to_string()))
            .map_err(|e| AppError::Config(format!("Failed to read {file_var}: {e}")));
    }
    Ok(lookup(name).filter(|value| !value.trim().is_empty()))
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("Invalid value for {name}: {e}"))),
        None => Ok(default),
    }
}

/// Build settings from an arbitrary key lookup.
pub fn get_configuration_from<F>(lookup: F) -> Result<Settings, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let http_port = parse_or(&lookup, "HTTP_PORT", DEFAULT_HTTP_PORT)?;
    let inference_base_url =
        lookup("INFERENCE_BASE_URL").unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string());
    let inference_model =
        lookup("INFERENCE_MODEL").unwrap_or_else(|| DEFAULT_INFERENCE_MODEL.to_string());
    let inference_api_token = get_optional_or_file(&lookup, "INFERENCE_API_TOKEN")?;
    let inference_connect_timeout = Duration::from_millis(parse_or(
        &lookup,
        "INFERENCE_CONNECT_TIMEOUT_MS",
        DEFAULT_CONNECT_TIMEOUT_MS,
    )?);
    let inference_timeout =
        Duration::from_millis(parse_or(&lookup, "INFERENCE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?);

    let settings = Settings {
        http_port,
        inference_base_url,
        inference_model,
        inference_api_token,
        inference_connect_timeout,
        inference_timeout,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}

pub fn get_configuration() -> Result<Settings, AppError> {
    get_configuration_from(|name| env::var(name).ok())
}
