use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Validates ISO 639-1 (2-letter) and ISO 639-2 (3-letter) codes and turns
/// them into the English language names used in LLM prompts.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
    /// Automatic source language detection
    Auto,
}

/// Pseudo-code accepted as a source language by detecting providers
pub const AUTO_DETECT: &str = "auto";

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Split a tag such as `zh-CN` or `pt_BR` into its primary language subtag
/// and the remaining subtags
fn split_subtags(code: &str) -> (String, Vec<&str>) {
    let mut subtags = code.trim().split(['-', '_']);
    let primary = subtags.next().unwrap_or_default().to_lowercase();
    (primary, subtags.collect())
}

/// Validate a language code
///
/// The primary subtag must be ISO 639-1 or ISO 639-2. Region or script
/// subtags (`zh-CN`, `pt-BR`, `sr-Latn`) are passed through to the service
/// as long as they are 1 to 8 alphanumerics. `auto` is accepted as well;
/// whether it is allowed in a given position is up to the caller.
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let (normalized_code, extra_subtags) = split_subtags(code);

    if extra_subtags
        .iter()
        .any(|subtag| subtag.is_empty() || subtag.len() > 8 || !subtag.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    if normalized_code == AUTO_DETECT {
        if !extra_subtags.is_empty() {
            return Err(anyhow!("Invalid language code: {}", code));
        }
        return Ok(LanguageCodeType::Auto);
    }

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if bibliographic_to_terminology(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
///
/// Only the primary subtag counts: `pt-BR` becomes `por`.
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let (normalized_code, _) = split_subtags(code);

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(terminology) = bibliographic_to_terminology(&normalized_code) {
            return Ok(terminology.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Name to show a model for `code`, falling back to the code itself
pub fn display_name(code: &str) -> String {
    if code.trim().eq_ignore_ascii_case(AUTO_DETECT) {
        return "the detected language".to_string();
    }
    let (_, extra_subtags) = split_subtags(code);
    match get_language_name(code) {
        Ok(name) if extra_subtags.is_empty() => name,
        Ok(name) => format!("{} ({})", name, code.trim()),
        Err(_) => code.to_string(),
    }
}
