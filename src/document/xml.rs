/*!
 * Lossless XML tree for package parts.
 *
 * The part is read with quick-xml into an arena of nodes. Elements keep their
 * original start tag (name, attributes, namespace declarations) and every
 * non-element event is kept verbatim, so a part that is parsed and written
 * back without edits produces equivalent markup.
 */

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::DocumentError;

/// Index of a node inside an [`XmlTree`]
pub type NodeId = usize;

/// Content of a single node
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An element with its start tag and ordered children
    Element {
        start: BytesStart<'static>,
        children: Vec<NodeId>,
    },
    /// Unescaped character data
    Text(String),
    /// Declarations, comments, processing instructions, CDATA and doctypes
    Markup(Event<'static>),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Arena-backed XML tree
#[derive(Debug, Clone, Default)]
pub struct XmlTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl XmlTree {
    /// Parse a complete XML document
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut tree = Self::default();
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let id = tree.attach(stack.last().copied(), NodeKind::Element {
                        start: start.into_owned(),
                        children: Vec::new(),
                    });
                    stack.push(id);
                }
                Event::End(_) => {
                    stack
                        .pop()
                        .ok_or_else(|| DocumentError::Malformed("unbalanced end tag".to_string()))?;
                }
                Event::Empty(start) => {
                    tree.attach(stack.last().copied(), NodeKind::Element {
                        start: start.into_owned(),
                        children: Vec::new(),
                    });
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    tree.attach(stack.last().copied(), NodeKind::Text(text));
                }
                Event::Eof => break,
                other => {
                    tree.attach(stack.last().copied(), NodeKind::Markup(other.into_owned()));
                }
            }
        }

        if !stack.is_empty() {
            return Err(DocumentError::Malformed("unclosed element at end of part".to_string()));
        }

        Ok(tree)
    }

    /// Serialize the tree back to bytes
    pub fn to_xml(&self) -> Result<Vec<u8>, DocumentError> {
        let mut writer = Writer::new(Vec::new());
        for &root in &self.roots {
            self.write_node(&mut writer, root)?;
        }
        Ok(writer.into_inner())
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), DocumentError> {
        match &self.nodes[id].kind {
            NodeKind::Element { start, children } => {
                if children.is_empty() {
                    writer.write_event(Event::Empty(start.borrow()))?;
                } else {
                    writer.write_event(Event::Start(start.borrow()))?;
                    for &child in children {
                        self.write_node(writer, child)?;
                    }
                    writer.write_event(Event::End(start.to_end()))?;
                }
            }
            NodeKind::Text(text) => {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            NodeKind::Markup(event) => {
                writer.write_event(event.borrow())?;
            }
        }
        Ok(())
    }

    /// First top-level element, i.e. the document element
    pub fn root_element(&self) -> Option<NodeId> {
        self.roots.iter().copied().find(|&id| self.is_element(id))
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Element { .. })
    }

    /// Qualified name of an element, empty for other nodes
    pub fn name(&self, id: NodeId) -> &[u8] {
        match &self.nodes[id].kind {
            NodeKind::Element { start, .. } => start.name().into_inner(),
            _ => &[],
        }
    }

    /// Check an element's qualified name (e.g. `w:p`)
    pub fn is_named(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == name.as_bytes()
    }

    /// Ordered children of an element, empty for other nodes
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id].kind {
            NodeKind::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Element children with the given qualified name
    pub fn children_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.is_named(child, name))
            .collect()
    }

    /// First element child with the given qualified name
    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&child| self.is_named(child, name))
    }

    /// Value of an attribute on an element
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<String> {
        let NodeKind::Element { start, .. } = &self.nodes[id].kind else {
            return None;
        };
        start
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == key.as_bytes())
            .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { children, .. } => {
                for &child in children {
                    self.collect_text(child, out);
                }
            }
            NodeKind::Markup(Event::CData(data)) => {
                out.push_str(&String::from_utf8_lossy(data));
            }
            NodeKind::Markup(_) => {}
        }
    }

    /// Create a detached element
    pub fn create_element(&mut self, start: BytesStart<'static>) -> NodeId {
        self.push(None, NodeKind::Element {
            start,
            children: Vec::new(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(None, NodeKind::Text(text.into()))
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, usize::MAX, child);
    }

    /// Insert a detached node at `index` among `parent`'s children (clamped)
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent].kind {
            let index = index.min(children.len());
            children.insert(index, child);
            self.nodes[child].parent = Some(parent);
        }
    }

    /// Detach a node from its parent; the slot stays in the arena unused
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            if let NodeKind::Element { children, .. } = &mut self.nodes[parent].kind {
                children.retain(|&child| child != id);
            }
        } else {
            self.roots.retain(|&root| root != id);
        }
    }

    fn attach(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = self.push(parent, kind);
        match parent {
            Some(parent) => {
                if let NodeKind::Element { children, .. } = &mut self.nodes[parent].kind {
                    children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        self.nodes.push(Node { parent, kind });
        self.nodes.len() - 1
    }
}
