use crate::dom::{DomNode, DomTree, NodeId};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

/// Tags whose text children are kept verbatim instead of read as content
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "noscript"];

/// A selector string that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid selector \"{}\": {}", self.selector, self.message)
    }
}

impl std::error::Error for SelectorError {}

/// Parse raw HTML string into an arena DomTree
pub fn parse_html(html: &str, url: &str) -> DomTree {
    let document = Html::parse_document(html);

    // Extract <title>
    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let mut nodes = vec![DomNode::document()];
    let mut element_ids = Vec::new();
    convert_element(document.root_element(), NodeId(0), &mut nodes, &mut element_ids);

    DomTree {
        nodes,
        url: url.to_string(),
        title: title.trim().to_string(),
        source: document,
        element_ids,
        inner_markup: HashMap::new(),
    }
}

fn push_node(nodes: &mut Vec<DomNode>, mut node: DomNode, parent: NodeId) -> NodeId {
    let id = NodeId(nodes.len());
    node.parent = Some(parent);
    nodes.push(node);
    nodes[parent.0].children.push(id);
    id
}

fn convert_element(
    el: ElementRef<'_>,
    parent: NodeId,
    nodes: &mut Vec<DomNode>,
    element_ids: &mut Vec<NodeId>,
) {
    let tag = el.value().name().to_string();
    let attributes: HashMap<String, String> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let raw = RAW_TEXT_TAGS.contains(&tag.as_str());
    let id = push_node(nodes, DomNode::element(tag, attributes), parent);
    element_ids.push(id);

    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    convert_element(child_el, id, nodes, element_ids);
                }
            }
            Node::Text(t) => {
                let s = t.text.to_string();
                if raw {
                    push_node(nodes, DomNode::raw(s), id);
                } else if !s.is_empty() {
                    push_node(nodes, DomNode::text(s), id);
                }
            }
            _ => {}
        }
    }
}

impl DomTree {
    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let sel = Selector::parse(selector).map_err(|e| SelectorError {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;

        // `descendants` walks elements in the same pre-order as `convert_element`.
        let matched = self
            .source
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .zip(self.element_ids.iter())
            .filter(|(el, _)| sel.matches(el))
            .map(|(_, &id)| id)
            .collect();
        Ok(matched)
    }
}
