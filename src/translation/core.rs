/*!
 * Core translation service implementation.
 *
 * `TranslationService` wraps a single `Provider` and adds the long-text
 * policy: texts over the request limit are split into sentence-bounded
 * chunks, and any unit whose request fails degrades to its original text.
 */

use log::{debug, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::google::GoogleTranslate;
use crate::providers::ollama::Ollama;
use crate::providers::openai::OpenAI;
use crate::providers::Provider;
use super::chunking::{self, DEFAULT_MAX_CHUNK_CHARS};

/// Snapshot of the counters kept by a `TranslationService`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslationStats {
    /// Provider calls issued
    pub requests: usize,
    /// Provider calls that failed and fell back to the original text
    pub failures: usize,
    /// Texts that had to be split into chunks
    pub chunked_texts: usize,
}

impl TranslationStats {
    /// One-line summary for the end-of-run log
    pub fn summary(&self, elapsed: Duration) -> String {
        format!(
            "{} requests, {} failed, {} chunked texts in {:.2}s",
            self.requests,
            self.failures,
            self.chunked_texts,
            elapsed.as_secs_f64()
        )
    }
}

/// Translation service that turns arbitrary-length text into its translation
#[derive(Debug)]
pub struct TranslationService {
    /// Backend performing the actual requests
    provider: Arc<dyn Provider>,

    /// Texts longer than this many chars are chunked
    max_chars: usize,

    requests: AtomicUsize,
    failures: AtomicUsize,
    chunked_texts: AtomicUsize,
    started: Instant,
}

impl TranslationService {
    /// Create a service for the provider selected in `config`
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let endpoint = config.get_endpoint();
        let model = config.get_model();
        let timeout_secs = config.get_timeout_secs();
        let common = &config.common;

        let provider: Arc<dyn Provider> = match config.provider {
            TranslationProvider::Google => Arc::new(GoogleTranslate::new(endpoint, timeout_secs)),
            TranslationProvider::Ollama => Arc::new(Ollama::new(
                endpoint,
                model,
                common.system_prompt.clone(),
                common.temperature,
                timeout_secs,
            )),
            TranslationProvider::OpenAI => {
                let api_key = config.get_api_key();
                if api_key.is_empty() {
                    return Err(TranslationError::Configuration(
                        "OpenAI provider requires an API key".to_string(),
                    ));
                }
                Arc::new(OpenAI::new(
                    api_key,
                    endpoint,
                    model,
                    common.system_prompt.clone(),
                    common.temperature,
                    timeout_secs,
                ))
            }
            TranslationProvider::LMStudio => Arc::new(
                OpenAI::new(
                    config.get_api_key(),
                    endpoint,
                    model,
                    common.system_prompt.clone(),
                    common.temperature,
                    timeout_secs,
                )
                .with_label("lmstudio"),
            ),
        };

        let max_chars = config.get_max_chars_per_request();
        if max_chars == 0 {
            return Err(TranslationError::Configuration(
                "max_chars_per_request must be greater than zero".to_string(),
            ));
        }

        Ok(Self::with_provider(provider, max_chars))
    }

    /// Create a service around an existing provider
    pub fn with_provider(provider: Arc<dyn Provider>, max_chars: usize) -> Self {
        Self {
            provider,
            max_chars: if max_chars == 0 { DEFAULT_MAX_CHUNK_CHARS } else { max_chars },
            requests: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            chunked_texts: AtomicUsize::new(0),
            started: Instant::now(),
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Chunking threshold in chars
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Translate `text`, never failing
    ///
    /// Empty or whitespace-only text is returned as-is without a request.
    /// Text within the limit is sent in one request; longer text is sent
    /// chunk by chunk and the results are concatenated. A unit whose request
    /// fails is replaced by its original text.
    pub async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        if !chunking::needs_chunking(text, self.max_chars) {
            return self.translate_unit(text, source_language, target_language).await;
        }

        let chunks = chunking::split_into_chunks(text, self.max_chars);
        self.chunked_texts.fetch_add(1, Ordering::Relaxed);
        debug!(
            "Text of {} chars split into {} chunks",
            text.chars().count(),
            chunks.len()
        );

        let mut translated = String::with_capacity(text.len());
        for chunk in &chunks {
            translated.push_str(&self.translate_unit(chunk, source_language, target_language).await);
        }
        translated
    }

    async fn translate_unit(&self, text: &str, source_language: &str, target_language: &str) -> String {
        self.requests.fetch_add(1, Ordering::Relaxed);
        match self.provider.translate(text, source_language, target_language).await {
            Ok(translated) => translated,
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!("Failed to translate text: {}", e);
                text.to_string()
            }
        }
    }

    /// Current counters
    pub fn stats(&self) -> TranslationStats {
        TranslationStats {
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            chunked_texts: self.chunked_texts.load(Ordering::Relaxed),
        }
    }

    /// Time since the service was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
