/*!
 * Tests for language utility functions
 */

use docx_translate::language_utils::{display_name, get_language_name, normalize_to_part2t, validate_language_code, LanguageCodeType};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    // ISO 639-1 tests
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("da").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("de").unwrap(), LanguageCodeType::Part1);

    // ISO 639-2/T tests
    assert_eq!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("dan").unwrap(), LanguageCodeType::Part2T);

    // ISO 639-2/B tests
    assert_eq!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);

    // Whitespace and case tests
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("ENG").unwrap(), LanguageCodeType::Part2T);

    // Auto detection
    assert_eq!(validate_language_code("auto").unwrap(), LanguageCodeType::Auto);
    assert_eq!(validate_language_code("AUTO").unwrap(), LanguageCodeType::Auto);

    // Invalid codes
    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization of language codes to ISO 639-2/T format
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("da").unwrap(), "dan");
    assert_eq!(normalize_to_part2t("fra").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");

    // Case insensitivity and whitespace
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");
    assert_eq!(normalize_to_part2t(" en ").unwrap(), "eng");

    assert!(normalize_to_part2t("auto").is_err());
}

/// Test retrieval of language names from codes
#[test]
fn test_get_language_name_withValidCodes_shouldReturnCorrectName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert_eq!(get_language_name("da").unwrap(), "Danish");
    assert_eq!(get_language_name("fre").unwrap(), "French");

    // Invalid codes
    assert!(get_language_name("xyz").is_err());
}

#[test]
fn test_display_name_withAuto_shouldDescribeDetection() {
    assert_eq!(display_name("auto"), "the detected language");
    assert_eq!(display_name("de"), "German");
}

#[test]
fn test_validate_language_code_withRegionSubtag_shouldValidatePrimarySubtag() {
    assert_eq!(validate_language_code("zh-CN").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("pt_BR").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zho-TW").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("sr-Latn-RS").unwrap(), LanguageCodeType::Part1);

    assert!(validate_language_code("zh-").is_err());
    assert!(validate_language_code("zh-C N").is_err());
    assert!(validate_language_code("zh-toolongsubtag").is_err());
    assert!(validate_language_code("auto-CN").is_err());
    assert!(validate_language_code("-CN").is_err());
}

#[test]
fn test_language_names_withRegionSubtag_shouldUsePrimarySubtag() {
    assert_eq!(normalize_to_part2t("pt-BR").unwrap(), "por");
    assert_eq!(get_language_name("zh-CN").unwrap(), "Chinese");
    assert_eq!(display_name("pt-BR"), "Portuguese (pt-BR)");
}
