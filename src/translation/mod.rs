/*!
 * Translation of document text through a translation provider.
 *
 * - `core`: the translation service with chunking and failure fallback
 * - `chunking`: sentence-bounded splitting of oversized text
 * - `rewriter`: writes translations back into document paragraphs
 */

// Re-export main types for easier usage
pub use self::core::{TranslationService, TranslationStats};
pub use self::rewriter::{DocumentRewriter, RewriteSummary};

// Submodules
pub mod chunking;
pub mod core;
pub mod rewriter;
