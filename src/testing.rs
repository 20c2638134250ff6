//! Deterministic in-memory page for engine tests.

use std::collections::HashMap;

use crate::dom::parser::SelectorError;
use crate::dom::NodeId;
use crate::host::{Document, ElementBox, Geometry};

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub tag: String,
    pub text: String,
    pub attrs: HashMap<String, String>,
    pub parent: Option<NodeId>,
    pub top: f32,
    pub height: f32,
}

/// Elements are stored in document order; `NodeId(i)` is the i-th element.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    pub elements: Vec<FakeElement>,
    pub document_height: f32,
    pub container_width: f32,
    pub relayouts: Vec<f32>,
    pub markup: HashMap<NodeId, String>,
}

impl FakePage {
    pub fn new(document_height: f32) -> Self {
        Self {
            document_height,
            container_width: 240.0,
            ..Self::default()
        }
    }

    pub fn push(&mut self, tag: &str, text: &str, top: f32) -> NodeId {
        self.push_child(None, tag, text, top)
    }

    pub fn push_child(&mut self, parent: Option<NodeId>, tag: &str, text: &str, top: f32) -> NodeId {
        self.elements.push(FakeElement {
            tag: tag.to_string(),
            text: text.to_string(),
            attrs: HashMap::new(),
            parent,
            top,
            height: 30.0,
        });
        NodeId(self.elements.len() - 1)
    }

    pub fn with_attr(&mut self, node: NodeId, name: &str, value: &str) -> NodeId {
        self.elements[node.0].attrs.insert(name.to_string(), value.to_string());
        node
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let el = &self.elements[node.0];
        if let Some(class) = selector.strip_prefix('.') {
            el.attrs
                .get("class")
                .map(|c| c.split_whitespace().any(|c| c == class))
                .unwrap_or(false)
        } else if let Some(id) = selector.strip_prefix('#') {
            el.attrs.get("id").map(|v| v == id).unwrap_or(false)
        } else {
            el.tag == selector
        }
    }
}

impl Document for FakePage {
    fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let valid = !selector.is_empty()
            && selector
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '#'));
        if !valid {
            return Err(SelectorError {
                selector: selector.to_string(),
                message: "unsupported by fake page".to_string(),
            });
        }
        Ok((0..self.elements.len())
            .map(NodeId)
            .filter(|&id| self.matches(id, selector))
            .collect())
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.elements.get(node.0).map(|e| e.tag.as_str()).unwrap_or("")
    }

    fn text_content(&self, node: NodeId) -> String {
        self.elements[node.0].text.clone()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.elements.get(node.0)?.attrs.get(name).map(|s| s.as_str())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.elements[node.0].attrs.insert(name.to_string(), value.to_string());
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        (0..self.elements.len())
            .map(NodeId)
            .find(|&n| self.attr(n, "id") == Some(id))
    }

    fn position(&self, node: NodeId) -> usize {
        node.0
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements[id.0].parent;
        }
        false
    }

    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.matches(id, &format!(".{class}")) {
                return Some(id);
            }
            current = self.elements[id.0].parent;
        }
        None
    }

    fn replace_inner_markup(&mut self, node: NodeId, markup: String) {
        self.markup.insert(node, markup);
    }
}

impl Geometry for FakePage {
    fn element_box(&self, node: NodeId) -> Option<ElementBox> {
        self.elements.get(node.0).map(|e| ElementBox {
            top: e.top,
            height: e.height,
        })
    }

    fn document_height(&self) -> f32 {
        self.document_height
    }

    fn content_width(&self, _node: NodeId) -> Option<f32> {
        Some(self.container_width)
    }

    fn relayout(&mut self, viewport_width: f32) {
        self.relayouts.push(viewport_width);
    }
}
