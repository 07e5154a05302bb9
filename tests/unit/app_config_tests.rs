/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use docx_translate::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "da");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.log_level, LogLevel::Info);

    let google = config.translation.get_provider_config(&TranslationProvider::Google)
        .expect("Google provider config should exist");
    assert_eq!(google.max_chars_per_request, 4500);
    assert_eq!(google.timeout_secs, 30);
    assert_eq!(google.endpoint, "https://translate.googleapis.com");

    let ollama = config.translation.get_provider_config(&TranslationProvider::Ollama)
        .expect("Ollama provider config should exist");
    assert_eq!(ollama.model, "llama3.2:3b");
    assert_eq!(ollama.endpoint, "http://localhost:11434");

    assert!(config.translation.common.system_prompt.contains("{source_language}"));
    assert!(config.translation.common.system_prompt.contains("{target_language}"));
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid source language
    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    // Invalid target language
    config.target_language = "".to_string();
    assert!(config.validate().is_err());
    config.target_language = "da".to_string();

    // OpenAI with empty API key should fail validation
    config.translation.provider = TranslationProvider::OpenAI;
    assert!(config.validate().is_err());

    config.set_api_key("sk-test");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withAutoSource_shouldOnlyAllowGoogle() {
    let mut config = Config::default();
    config.source_language = "auto".to_string();
    assert!(config.validate().is_ok());

    config.translation.provider = TranslationProvider::Ollama;
    assert!(config.validate().is_err());

    config.translation.provider = TranslationProvider::Google;
    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withRegionSubtags_shouldAcceptThem() {
    let mut config = Config::default();
    assert_eq!(config.translation.provider, TranslationProvider::Google);

    for code in ["zh-CN", "zh-TW", "pt-BR", "sr-Latn", "en_GB"] {
        config.target_language = code.to_string();
        assert!(config.validate().is_ok(), "target {} should validate", code);
    }

    config.source_language = "zh-TW".to_string();
    config.target_language = "pt-BR".to_string();
    assert!(config.validate().is_ok());

    config.target_language = "xx-CN".to_string();
    assert!(config.validate().is_err());
    config.target_language = "zh-".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withZeroMaxChars_shouldFail() {
    let mut config = Config::default();
    for provider in config.translation.available_providers.iter_mut() {
        provider.max_chars_per_request = 0;
    }
    assert!(config.validate().is_err());
}

#[test]
fn test_set_model_withMissingProviderEntry_shouldAddEntry() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::LMStudio;

    config.set_model("qwen2.5-7b-instruct");

    assert_eq!(config.translation.get_model(), "qwen2.5-7b-instruct");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:1234/v1");
    assert_eq!(config.translation.available_providers.len(), 1);
}

#[test]
fn test_getters_withoutProviderEntry_shouldFallBackToDefaults() {
    let mut config = Config::default();
    config.translation.available_providers = vec![ProviderConfig::new(TranslationProvider::Google)];
    config.translation.provider = TranslationProvider::OpenAI;

    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");
    assert_eq!(config.translation.get_api_key(), "");
    assert_eq!(config.translation.get_max_chars_per_request(), 4500);
    assert_eq!(config.translation.get_timeout_secs(), 30);
}

#[test]
fn test_provider_fromStr_shouldParseKnownNames() {
    assert_eq!("google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("LMStudio".parse::<TranslationProvider>().unwrap(), TranslationProvider::LMStudio);
    assert!("anthropic".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::OpenAI.to_string(), "openai");
}

#[test]
fn test_load_or_default_withMissingFile_shouldReturnDefaultsWithoutWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.target_language, "da");
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_load_or_default_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "target_language": "de", "translation": { "provider": "ollama" } }"#,
    )?;

    let config = Config::load_or_default(&path)?;

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.get_model(), "llama3.2:3b");
    assert!((config.translation.common.temperature - 0.3).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn test_load_or_default_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_default(&path).is_err());
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    let mut config = Config::default();
    config.source_language = "fr".to_string();
    config.log_level = LogLevel::Debug;
    config.translation.provider = TranslationProvider::Ollama;
    config.set_model("mistral");

    config.save(&path)?;
    let loaded = Config::load_or_default(&path)?;

    assert_eq!(loaded.source_language, "fr");
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert_eq!(loaded.translation.get_model(), "mistral");
    Ok(())
}

#[test]
fn test_log_level_intoLevelFilter_shouldMatch() {
    assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
    assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
}
