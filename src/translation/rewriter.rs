/*!
 * Formatting-preserving document rewriter.
 *
 * Each paragraph is translated as a whole and written back into its runs:
 * the first run receives the full translation and every later run is
 * emptied, so run count and run properties survive. Top-level paragraphs
 * are visited first, then the cells of every top-level table.
 */

use log::{debug, info};
use std::path::Path;

use crate::document::{Document, DocxPackage, Paragraph, Table, MAIN_DOCUMENT_PART};
use crate::errors::DocumentError;
use super::core::TranslationService;

/// Counts reported after a document has been rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteSummary {
    /// Paragraphs visited, including those inside table cells
    pub paragraphs_seen: usize,
    /// Paragraphs that had text and were sent for translation
    pub paragraphs_translated: usize,
    /// Top-level tables visited
    pub tables_visited: usize,
}

/// Rewrites documents through a `TranslationService`
pub struct DocumentRewriter<'a> {
    translator: &'a TranslationService,
}

impl<'a> DocumentRewriter<'a> {
    pub fn new(translator: &'a TranslationService) -> Self {
        Self { translator }
    }

    /// Translate one paragraph in place
    ///
    /// Returns `false` when the paragraph has no text and was left alone.
    pub async fn rewrite_paragraph(
        &self,
        doc: &mut Document,
        paragraph: Paragraph,
        source_language: &str,
        target_language: &str,
    ) -> bool {
        let text = doc.paragraph_text(paragraph);
        if text.trim().is_empty() {
            return false;
        }

        let translated = self.translator.translate(&text, source_language, target_language).await;
        debug!(
            "Paragraph translated ({} -> {} chars)",
            text.chars().count(),
            translated.chars().count()
        );

        let runs = doc.runs(paragraph);
        match runs.split_first() {
            Some((first, rest)) => {
                doc.set_run_text(*first, &translated);
                for run in rest {
                    doc.set_run_text(*run, "");
                }
            }
            None => doc.set_paragraph_text(paragraph, &translated),
        }
        true
    }

    /// Translate every paragraph of every cell of `table`, row by row
    pub async fn rewrite_table(
        &self,
        doc: &mut Document,
        table: Table,
        source_language: &str,
        target_language: &str,
    ) -> RewriteSummary {
        self.rewrite_table_with_progress(doc, table, source_language, target_language, &mut || {})
            .await
    }

    async fn rewrite_table_with_progress(
        &self,
        doc: &mut Document,
        table: Table,
        source_language: &str,
        target_language: &str,
        on_paragraph: &mut (dyn FnMut() + Send),
    ) -> RewriteSummary {
        let mut summary = RewriteSummary {
            tables_visited: 1,
            ..RewriteSummary::default()
        };

        for row in doc.rows(table) {
            for cell in doc.cells(row) {
                for paragraph in doc.cell_paragraphs(cell) {
                    summary.paragraphs_seen += 1;
                    if self.rewrite_paragraph(doc, paragraph, source_language, target_language).await {
                        summary.paragraphs_translated += 1;
                    }
                    on_paragraph();
                }
            }
        }

        summary
    }

    /// Translate all top-level paragraphs, then all top-level tables
    pub async fn rewrite_body(
        &self,
        doc: &mut Document,
        source_language: &str,
        target_language: &str,
    ) -> RewriteSummary {
        self.rewrite_body_with_progress(doc, source_language, target_language, |_, _| {})
            .await
    }

    /// Like `rewrite_body`, calling `progress(done, total)` after each paragraph
    pub async fn rewrite_body_with_progress<F>(
        &self,
        doc: &mut Document,
        source_language: &str,
        target_language: &str,
        progress: F,
    ) -> RewriteSummary
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let paragraphs = doc.paragraphs();
        let tables = doc.tables();
        let total = paragraphs.len() + count_table_paragraphs(doc, &tables);
        let mut done = 0;
        let mut summary = RewriteSummary::default();

        for paragraph in paragraphs {
            summary.paragraphs_seen += 1;
            if self.rewrite_paragraph(doc, paragraph, source_language, target_language).await {
                summary.paragraphs_translated += 1;
            }
            done += 1;
            progress(done, total);
        }

        for table in tables {
            let mut tick = || {
                done += 1;
                progress(done, total);
            };
            let table_summary = self
                .rewrite_table_with_progress(doc, table, source_language, target_language, &mut tick)
                .await;
            summary.paragraphs_seen += table_summary.paragraphs_seen;
            summary.paragraphs_translated += table_summary.paragraphs_translated;
            summary.tables_visited += table_summary.tables_visited;
        }

        summary
    }

    /// Translate the document at `input` and save it to `output`
    ///
    /// `output` may equal `input`. Fails with `DocumentError::NotFound`
    /// before touching the file system when `input` is not a file.
    pub async fn rewrite_document(
        &self,
        input: &Path,
        output: &Path,
        source_language: &str,
        target_language: &str,
    ) -> Result<RewriteSummary, DocumentError> {
        self.rewrite_document_with_progress(input, output, source_language, target_language, |_, _| {})
            .await
    }

    /// Like `rewrite_document`, calling `progress(done, total)` after each paragraph
    pub async fn rewrite_document_with_progress<F>(
        &self,
        input: &Path,
        output: &Path,
        source_language: &str,
        target_language: &str,
        progress: F,
    ) -> Result<RewriteSummary, DocumentError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        if !input.is_file() {
            return Err(DocumentError::NotFound(input.to_path_buf()));
        }

        info!("Loading document: {}", input.display());
        let mut package = DocxPackage::open(input)?;
        let mut doc = Document::parse(&package.main_document_xml()?)?;

        info!("Translating from {} to {}", source_language, target_language);
        let summary = self
            .rewrite_body_with_progress(&mut doc, source_language, target_language, progress)
            .await;

        info!("Saving translated document: {}", output.display());
        package.replace_part(MAIN_DOCUMENT_PART, doc.to_xml()?)?;
        package.save(output)?;

        Ok(summary)
    }
}

fn count_table_paragraphs(doc: &Document, tables: &[Table]) -> usize {
    tables
        .iter()
        .flat_map(|table| doc.rows(*table))
        .flat_map(|row| doc.cells(row))
        .map(|cell| doc.cell_paragraphs(cell).len())
        .sum()
}
