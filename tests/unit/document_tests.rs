/*!
 * Tests for the document package and body model
 */

use anyhow::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;
use docx_translate::document::{Document, DocxPackage, MAIN_DOCUMENT_PART};
use docx_translate::errors::DocumentError;
use crate::common;
use crate::common::docx_fixtures::{build_docx, document_xml, paragraph, STYLES_PART, STYLES_XML};

#[test]
fn test_from_bytes_withFixture_shouldListPartsInOrder() -> Result<()> {
    let package = DocxPackage::from_bytes(&build_docx(&paragraph(&["Hi"]))?)?;

    assert_eq!(
        package.part_names(),
        vec!["[Content_Types].xml", "_rels/.rels", MAIN_DOCUMENT_PART, STYLES_PART]
    );
    assert_eq!(package.part(STYLES_PART), Some(STYLES_XML.as_bytes()));
    Ok(())
}

#[test]
fn test_from_bytes_withoutMainDocument_shouldReturnMissingPart() -> Result<()> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("word/styles.xml", SimpleFileOptions::default())?;
    writer.write_all(STYLES_XML.as_bytes())?;
    let bytes = writer.finish()?.into_inner();

    let result = DocxPackage::from_bytes(&bytes);
    assert!(matches!(result, Err(DocumentError::MissingPart(part)) if part == MAIN_DOCUMENT_PART));
    Ok(())
}

#[test]
fn test_from_bytes_withGarbage_shouldReturnZipError() {
    let result = DocxPackage::from_bytes(b"definitely not a zip archive");
    assert!(matches!(result, Err(DocumentError::Zip(_))));
}

#[test]
fn test_open_withMissingFile_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = DocxPackage::open(temp_dir.path().join("nope.docx"));
    assert!(matches!(result, Err(DocumentError::NotFound(_))));
    Ok(())
}

#[test]
fn test_save_withReplacedDocument_shouldKeepOtherPartsIdentical() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = build_docx(&paragraph(&["Hello"]))?;
    let mut package = DocxPackage::from_bytes(&original)?;
    let before = DocxPackage::from_bytes(&original)?;

    let mut doc = Document::parse(&package.main_document_xml()?)?;
    let p = doc.paragraphs()[0];
    let run = doc.runs(p)[0];
    doc.set_run_text(run, "Hej");
    package.replace_part(MAIN_DOCUMENT_PART, doc.to_xml()?)?;

    let path = temp_dir.path().join("out.docx");
    package.save(&path)?;
    let reloaded = DocxPackage::open(&path)?;

    for name in ["[Content_Types].xml", "_rels/.rels", STYLES_PART] {
        assert_eq!(reloaded.part(name), before.part(name), "part {} changed", name);
    }
    let reparsed = Document::parse(&reloaded.main_document_xml()?)?;
    assert_eq!(common::docx_fixtures::paragraph_texts(&reparsed), vec!["Hej"]);
    Ok(())
}

#[test]
fn test_replace_part_withUnknownName_shouldFail() -> Result<()> {
    let mut package = DocxPackage::from_bytes(&build_docx("")?)?;
    let result = package.replace_part("word/missing.xml", Vec::new());
    assert!(matches!(result, Err(DocumentError::MissingPart(_))));
    Ok(())
}

#[test]
fn test_set_run_text_withSpecialCharacters_shouldRoundTrip() -> Result<()> {
    let mut doc = Document::parse(&document_xml(&paragraph(&["Fish &amp; Chips &lt;3"])))?;
    let p = doc.paragraphs()[0];
    assert_eq!(doc.paragraph_text(p), "Fish & Chips <3");

    let run = doc.runs(p)[0];
    doc.set_run_text(run, "\"Fisk\" & <pommes> 'frites'");
    let xml = String::from_utf8(doc.to_xml()?)?;
    let reparsed = Document::parse(&xml)?;

    assert_eq!(
        common::docx_fixtures::paragraph_texts(&reparsed),
        vec!["\"Fisk\" & <pommes> 'frites'"]
    );
    Ok(())
}

#[test]
fn test_set_run_text_withSurroundingWhitespace_shouldPreserveSpace() -> Result<()> {
    let mut doc = Document::parse(&document_xml("<w:p><w:r><w:t>x</w:t></w:r></w:p>"))?;
    let p = doc.paragraphs()[0];
    let run = doc.runs(p)[0];

    doc.set_run_text(run, " padded ");
    let xml = String::from_utf8(doc.to_xml()?)?;

    assert!(xml.contains(r#"<w:t xml:space="preserve"> padded </w:t>"#));
    Ok(())
}

#[test]
fn test_set_run_text_withTabsAndNewlines_shouldEmitTabAndBreak() -> Result<()> {
    let mut doc = Document::parse(&document_xml("<w:p><w:r><w:t>x</w:t></w:r></w:p>"))?;
    let p = doc.paragraphs()[0];
    let run = doc.runs(p)[0];

    doc.set_run_text(run, "a\tb\r\nc");
    let xml = String::from_utf8(doc.to_xml()?)?;

    assert!(xml.contains("<w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t>"));
    assert_eq!(doc.paragraph_text(p), "a\tb\nc");
    Ok(())
}

#[test]
fn test_set_run_text_withDrawing_shouldKeepDrawing() -> Result<()> {
    let mut doc = Document::parse(&document_xml(
        "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Logo</w:t><w:drawing><wp:inline xmlns:wp=\"urn:wp\"/></w:drawing></w:r></w:p>",
    ))?;
    let p = doc.paragraphs()[0];
    let run = doc.runs(p)[0];

    doc.set_run_text(run, "");

    assert_eq!(doc.run_text(run), "");
    assert_eq!(doc.run_child_count(run), 2);
    let xml = String::from_utf8(doc.to_xml()?)?;
    assert!(xml.contains("<w:drawing>"));
    Ok(())
}

#[test]
fn test_cell_text_withSeveralParagraphs_shouldJoinWithNewlines() -> Result<()> {
    let body = format!("<w:tbl><w:tr><w:tc>{}{}</w:tc></w:tr></w:tbl>", paragraph(&["one"]), paragraph(&["two"]));
    let doc = Document::parse(&document_xml(&body))?;
    let cell = doc.cells(doc.rows(doc.tables()[0])[0])[0];

    assert_eq!(doc.cell_text(cell), "one\ntwo");
    Ok(())
}
