/*!
 * # docx-translate
 *
 * A Rust library for translating Word (`.docx`) documents while keeping
 * their formatting.
 *
 * ## Features
 *
 * - Translate every paragraph and table cell of a document
 * - Translation providers:
 *   - Google Translate web endpoint (default)
 *   - Ollama (local LLM)
 *   - OpenAI API and LM Studio
 * - Run formatting of each paragraph's first run is kept
 * - Sentence-bounded chunking of long paragraphs
 * - Failed requests fall back to the original text
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: `.docx` package, XML tree and WordprocessingML model
 * - `translation`: Translation of document text:
 *   - `translation::core`: Translation service with fallback
 *   - `translation::chunking`: Splitting of oversized text
 *   - `translation::rewriter`: Writing translations back into paragraphs
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for translation services
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use document::{Document, DocxPackage};
pub use translation::{DocumentRewriter, RewriteSummary, TranslationService};
pub use language_utils::{get_language_name, validate_language_code};
pub use errors::{AppError, DocumentError, ProviderError, TranslationError};
