/*!
 * End-to-end tests: .docx on disk in, translated .docx on disk out
 */

use std::sync::Arc;
use anyhow::Result;
use docx_translate::document::DocxPackage;
use docx_translate::providers::mock::MockProvider;
use docx_translate::translation::{DocumentRewriter, TranslationService};
use crate::common;
use crate::common::docx_fixtures::{cell_texts, paragraph, paragraph_texts, read_document, table, write_docx, STYLES_PART, STYLES_XML};

fn uppercase_service() -> (MockProvider, TranslationService) {
    let mock = MockProvider::uppercase();
    let service = TranslationService::with_provider(Arc::new(mock.clone()), 4500);
    (mock, service)
}

#[tokio::test]
async fn test_rewrite_document_withParagraphAndTable_shouldTranslateBoth() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    // Two rows of one cell; the second cell is blank
    let body = format!("{}{}", paragraph(&["Hello world."]), table(&[&["Hi"], &[""]]));
    let input = write_docx(temp_dir.path(), "input.docx", &body)?;
    let output = temp_dir.path().join("output.docx");
    let (mock, service) = uppercase_service();

    let summary = DocumentRewriter::new(&service)
        .rewrite_document(&input, &output, "en", "da")
        .await?;

    let doc = read_document(&output)?;
    assert_eq!(paragraph_texts(&doc), vec!["HELLO WORLD."]);
    assert_eq!(cell_texts(&doc), vec!["HI", ""]);
    assert_eq!(doc.tables().len(), 1);
    let rows = doc.rows(doc.tables()[0]);
    assert_eq!(rows.len(), 2);
    for row in rows {
        let cells = doc.cells(row);
        assert_eq!(cells.len(), 1);
        assert_eq!(doc.cell_paragraphs(cells[0]).len(), 1);
    }
    assert_eq!(summary.paragraphs_seen, 3);
    assert_eq!(summary.paragraphs_translated, 2);
    assert_eq!(summary.tables_visited, 1);
    assert_eq!(mock.request_count(), 2);

    // The input is left untouched
    assert_eq!(paragraph_texts(&read_document(&input)?), vec!["Hello world."]);
    Ok(())
}

#[tokio::test]
async fn test_rewrite_document_shouldKeepOtherPartsByteIdentical() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = write_docx(temp_dir.path(), "input.docx", &paragraph(&["Hello"]))?;
    let output = temp_dir.path().join("output.docx");
    let (_mock, service) = uppercase_service();

    DocumentRewriter::new(&service)
        .rewrite_document(&input, &output, "en", "da")
        .await?;

    let before = DocxPackage::open(&input)?;
    let after = DocxPackage::open(&output)?;
    assert_eq!(before.part_names(), after.part_names());
    assert_eq!(after.part(STYLES_PART), Some(STYLES_XML.as_bytes()));
    assert_eq!(after.part("_rels/.rels"), before.part("_rels/.rels"));
    assert_eq!(after.part("[Content_Types].xml"), before.part("[Content_Types].xml"));
    Ok(())
}

#[tokio::test]
async fn test_rewrite_document_withFormattedRuns_shouldKeepFirstRunFormatting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let body = r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/><w:color w:val="FF0000"/></w:rPr><w:t xml:space="preserve">Bold </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>italic</w:t></w:r></w:p>"#;
    let input = write_docx(temp_dir.path(), "input.docx", body)?;
    let output = temp_dir.path().join("output.docx");
    let (_mock, service) = uppercase_service();

    DocumentRewriter::new(&service)
        .rewrite_document(&input, &output, "en", "da")
        .await?;

    let package = DocxPackage::open(&output)?;
    let xml = package.main_document_xml()?;
    assert!(xml.contains(r#"<w:pPr><w:jc w:val="center"/></w:pPr>"#));
    assert!(xml.contains(r#"<w:r><w:rPr><w:b/><w:color w:val="FF0000"/></w:rPr><w:t>BOLD ITALIC</w:t></w:r>"#));
    assert!(xml.contains(r#"<w:r><w:rPr><w:i/></w:rPr></w:r>"#));
    Ok(())
}

#[tokio::test]
async fn test_rewrite_document_withSamePathForOutput_shouldOverwriteInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = write_docx(temp_dir.path(), "inplace.docx", &paragraph(&["In place"]))?;
    let (_mock, service) = uppercase_service();

    DocumentRewriter::new(&service)
        .rewrite_document(&input, &input, "en", "da")
        .await?;

    assert_eq!(paragraph_texts(&read_document(&input)?), vec!["IN PLACE"]);
    Ok(())
}

#[tokio::test]
async fn test_rewrite_document_withFailingProvider_shouldStillSaveOriginalText() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let body = format!("{}{}", paragraph(&["One ", "two"]), table(&[&["cell"]]));
    let input = write_docx(temp_dir.path(), "input.docx", &body)?;
    let output = temp_dir.path().join("output.docx");
    let service = TranslationService::with_provider(Arc::new(MockProvider::failing()), 4500);

    DocumentRewriter::new(&service)
        .rewrite_document(&input, &output, "en", "da")
        .await?;

    let doc = read_document(&output)?;
    assert_eq!(paragraph_texts(&doc), vec!["One two"]);
    assert_eq!(cell_texts(&doc), vec!["cell"]);
    assert_eq!(service.stats().failures, 2);
    Ok(())
}

#[tokio::test]
async fn test_rewrite_document_withCorruptInput_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "broken.docx", "not a zip")?;
    let output = temp_dir.path().join("broken_translated.docx");
    let (mock, service) = uppercase_service();

    let result = DocumentRewriter::new(&service)
        .rewrite_document(&input, &output, "en", "da")
        .await;

    assert!(result.is_err());
    assert!(!output.exists());
    assert_eq!(mock.request_count(), 0);
    Ok(())
}
