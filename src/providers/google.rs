use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for the public Google Translate web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a new client against `endpoint` with a request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for a language pair
    pub fn request_url(&self, source_language: &str, target_language: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        Url::parse_with_params(&base, &[
            ("client", "gtx"),
            ("sl", source_language),
            ("tl", target_language),
            ("dt", "t"),
        ])
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }

    /// Extract the translated text from a `translate_a/single` response
    ///
    /// The body is a nested array whose first element lists segments as
    /// `[translated, original, ...]`.
    pub fn extract_text(body: &Value) -> Result<String, ProviderError> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;

        Ok(segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect())
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = self.request_url(source_language, target_language)?;

        // Text goes in the form body; long chunks do not fit in a query string.
        let response = self.client.post(url).form(&[("q", text)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        let translated = Self::extract_text(&body)?;
        debug!("Google translated {} chars into {} chars", text.chars().count(), translated.chars().count());
        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello", "en", "da").await.map(|_| ())
    }
}
