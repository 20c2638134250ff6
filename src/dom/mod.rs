pub mod parser;
pub mod css;
pub mod serialize;

use std::collections::HashMap;

/// Index of a node inside a [`DomTree`].
///
/// Nodes are stored in pre-order, so comparing two ids compares their
/// document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    /// Script/style payload: serialized verbatim, never laid out or read as text.
    Raw,
}

/// Arena DOM node.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub node_type: NodeType,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl DomNode {
    pub fn document() -> Self {
        Self {
            tag: "#document".into(),
            attributes: HashMap::new(),
            text: String::new(),
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn element(tag: impl Into<String>, attrs: HashMap<String, String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            node_type: NodeType::Element,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            node_type: NodeType::Text,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Raw,
            ..Self::text(content)
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }
}

/// Parsed document: a pre-order arena plus the scraper document used for
/// selector matching.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub nodes: Vec<DomNode>,
    pub url: String,
    pub title: String,
    /// Source document, kept for `scraper::Selector` matching.
    pub(crate) source: scraper::Html,
    /// k-th element visited by the parser walk -> arena id.
    pub(crate) element_ids: Vec<NodeId>,
    /// Generated markup that replaces a node's children on serialization.
    pub(crate) inner_markup: HashMap<NodeId, String>,
}

impl DomTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text content below `id`, with whitespace runs collapsed afterwards.
    ///
    /// Text nodes are joined without separators, so inline markup inside a
    /// word (`Hel<em>lo</em>`) does not split it.
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut buf = String::new();
        self.collect_text_inner(id, &mut buf);
        buf.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text_inner(&self, id: NodeId, buf: &mut String) {
        let node = self.node(id);
        if node.node_type == NodeType::Raw {
            return;
        }
        buf.push_str(&node.text);
        for &child in &node.children {
            self.collect_text_inner(child, buf);
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// First element in document order carrying `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.is_element() && n.attr("id") == Some(id))
            .map(NodeId)
    }

    /// Whether `node` is `ancestor` or lies below it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.get(id)?;
            if n.is_element() && n.has_class(class) {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    pub fn replace_inner_markup(&mut self, id: NodeId, markup: String) {
        self.inner_markup.insert(id, markup);
    }

    pub fn inner_markup(&self, id: NodeId) -> Option<&str> {
        self.inner_markup.get(&id).map(|s| s.as_str())
    }
}
