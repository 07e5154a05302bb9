/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Google: public Google Translate web endpoint
 * - Ollama: Local LLM server
 * - OpenAI: OpenAI API and OpenAI-compatible servers (LM Studio)
 * - Mock: deterministic in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// A provider performs exactly one request per call and never retries;
/// fallback on failure is handled by the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider identifier used in logs
    fn name(&self) -> &str;

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Fill the `{source_language}` and `{target_language}` placeholders of a prompt
pub fn render_system_prompt(template: &str, source_language: &str, target_language: &str) -> String {
    template
        .replace("{source_language}", source_language)
        .replace("{target_language}", target_language)
}

pub mod google;
pub mod mock;
pub mod ollama;
pub mod openai;
