/*!
 * WordprocessingML body model.
 *
 * Thin handles over the XML tree of `word/document.xml`: paragraphs, runs,
 * tables, rows and cells. Reading text follows what Word displays; writing
 * text only touches text-bearing run children so run properties, drawings and
 * field characters are kept.
 */

use quick_xml::events::BytesStart;

use super::xml::{NodeId, NodeKind, XmlTree};
use crate::errors::DocumentError;

const W_DOCUMENT: &str = "w:document";
const W_BODY: &str = "w:body";
const W_P: &str = "w:p";
const W_PPR: &str = "w:pPr";
const W_R: &str = "w:r";
const W_T: &str = "w:t";
const W_TAB: &str = "w:tab";
const W_BR: &str = "w:br";
const W_CR: &str = "w:cr";
const W_NO_BREAK_HYPHEN: &str = "w:noBreakHyphen";
const W_TBL: &str = "w:tbl";
const W_TR: &str = "w:tr";
const W_TC: &str = "w:tc";

/// Inline wrappers whose runs are part of the visible paragraph text
const RUN_CONTAINERS: [&str; 4] = ["w:hyperlink", "w:ins", "w:smartTag", "w:fldSimple"];

/// A paragraph (`w:p`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph(NodeId);

/// A run of uniformly formatted text (`w:r`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run(NodeId);

/// A table (`w:tbl`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table(NodeId);

/// A table row (`w:tr`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row(NodeId);

/// A table cell (`w:tc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell(NodeId);

/// Parsed main document part
#[derive(Debug, Clone)]
pub struct Document {
    tree: XmlTree,
    body: NodeId,
}

impl Document {
    /// Parse the XML of `word/document.xml`
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let tree = XmlTree::parse(xml)?;
        let root = tree
            .root_element()
            .filter(|&root| tree.is_named(root, W_DOCUMENT))
            .ok_or_else(|| DocumentError::Malformed(format!("root element is not {}", W_DOCUMENT)))?;
        let body = tree
            .first_child_named(root, W_BODY)
            .ok_or_else(|| DocumentError::Malformed(format!("missing {}", W_BODY)))?;
        Ok(Self { tree, body })
    }

    /// Serialize back to XML bytes
    pub fn to_xml(&self) -> Result<Vec<u8>, DocumentError> {
        self.tree.to_xml()
    }

    /// Top-level paragraphs in document order
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        self.tree
            .children_named(self.body, W_P)
            .into_iter()
            .map(Paragraph)
            .collect()
    }

    /// Top-level tables in document order
    pub fn tables(&self) -> Vec<Table> {
        self.tree
            .children_named(self.body, W_TBL)
            .into_iter()
            .map(Table)
            .collect()
    }

    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.tree.children_named(table.0, W_TR).into_iter().map(Row).collect()
    }

    /// Physical cells of a row; a merged cell appears once
    pub fn cells(&self, row: Row) -> Vec<Cell> {
        self.tree.children_named(row.0, W_TC).into_iter().map(Cell).collect()
    }

    pub fn cell_paragraphs(&self, cell: Cell) -> Vec<Paragraph> {
        self.tree
            .children_named(cell.0, W_P)
            .into_iter()
            .map(Paragraph)
            .collect()
    }

    /// Concatenated text of all paragraphs in a cell, separated by newlines
    pub fn cell_text(&self, cell: Cell) -> String {
        self.cell_paragraphs(cell)
            .into_iter()
            .map(|paragraph| self.paragraph_text(paragraph))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Runs of a paragraph, including runs inside hyperlinks and insertions
    pub fn runs(&self, paragraph: Paragraph) -> Vec<Run> {
        let mut runs = Vec::new();
        self.collect_runs(paragraph.0, &mut runs);
        runs
    }

    fn collect_runs(&self, parent: NodeId, runs: &mut Vec<Run>) {
        for &child in self.tree.children(parent) {
            if self.tree.is_named(child, W_R) {
                runs.push(Run(child));
            } else if RUN_CONTAINERS.iter().any(|name| self.tree.is_named(child, name)) {
                self.collect_runs(child, runs);
            }
        }
    }

    /// Paragraph text: concatenation of its runs' text
    pub fn paragraph_text(&self, paragraph: Paragraph) -> String {
        self.runs(paragraph)
            .into_iter()
            .map(|run| self.run_text(run))
            .collect()
    }

    /// Replace the whole content of a paragraph with a single run of `text`
    ///
    /// Paragraph properties (`w:pPr`) are kept, everything else is removed.
    pub fn set_paragraph_text(&mut self, paragraph: Paragraph, text: &str) {
        let children = self.tree.children(paragraph.0).to_vec();
        for child in children {
            if !self.tree.is_named(child, W_PPR) {
                self.tree.remove(child);
            }
        }
        let run = self.tree.create_element(BytesStart::new(W_R));
        self.tree.append_child(paragraph.0, run);
        self.set_run_text(Run(run), text);
    }

    /// Text of a single run
    pub fn run_text(&self, run: Run) -> String {
        let mut text = String::new();
        for &child in self.tree.children(run.0) {
            if let Some(piece) = self.text_of_run_child(child) {
                text.push_str(&piece);
            }
        }
        text
    }

    /// Replace the text of a run
    ///
    /// Text-bearing children are removed and the new text is inserted where
    /// the first of them was. Tabs and newlines become `w:tab` and `w:br`.
    pub fn set_run_text(&mut self, run: Run, text: &str) {
        let children = self.tree.children(run.0).to_vec();
        let mut insert_at = None;
        let mut kept = 0;
        for child in children {
            if self.is_text_bearing(child) {
                if insert_at.is_none() {
                    insert_at = Some(kept);
                }
                self.tree.remove(child);
            } else {
                kept += 1;
            }
        }
        let mut index = insert_at.unwrap_or(kept);

        for node in self.build_text_nodes(text) {
            self.tree.insert_child(run.0, index, node);
            index += 1;
        }
    }

    /// Whether the run carries its own formatting (`w:rPr`)
    pub fn run_has_properties(&self, run: Run) -> bool {
        self.tree.first_child_named(run.0, "w:rPr").is_some()
    }

    fn text_of_run_child(&self, child: NodeId) -> Option<String> {
        match self.tree.name(child) {
            name if name == W_T.as_bytes() => Some(self.tree.text_content(child)),
            name if name == W_TAB.as_bytes() => Some("\t".to_string()),
            name if name == W_CR.as_bytes() => Some("\n".to_string()),
            name if name == W_NO_BREAK_HYPHEN.as_bytes() => Some("-".to_string()),
            name if name == W_BR.as_bytes() && self.is_line_break(child) => Some("\n".to_string()),
            _ => None,
        }
    }

    fn is_text_bearing(&self, child: NodeId) -> bool {
        self.text_of_run_child(child).is_some()
    }

    /// Page and column breaks are layout, not text
    fn is_line_break(&self, br: NodeId) -> bool {
        match self.tree.attribute(br, "w:type") {
            None => true,
            Some(kind) => kind == "textWrapping",
        }
    }

    fn build_text_nodes(&mut self, text: &str) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut pending = String::new();

        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' if chars.peek() == Some(&'\n') => {}
                '\t' | '\n' | '\r' => {
                    if !pending.is_empty() {
                        nodes.push(self.create_text_element(&pending));
                        pending.clear();
                    }
                    let name = if ch == '\t' { W_TAB } else { W_BR };
                    nodes.push(self.tree.create_element(BytesStart::new(name)));
                }
                _ => pending.push(ch),
            }
        }
        if !pending.is_empty() {
            nodes.push(self.create_text_element(&pending));
        }
        nodes
    }

    fn create_text_element(&mut self, text: &str) -> NodeId {
        let mut start = BytesStart::new(W_T);
        if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
            start.push_attribute(("xml:space", "preserve"));
        }
        let element = self.tree.create_element(start);
        let content = self.tree.create_text(text);
        self.tree.append_child(element, content);
        element
    }

    /// Number of element children of a run
    pub fn run_child_count(&self, run: Run) -> usize {
        self.tree
            .children(run.0)
            .iter()
            .filter(|&&child| matches!(self.tree.kind(child), NodeKind::Element { .. }))
            .count()
    }
}
