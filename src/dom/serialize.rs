//! HTML serialization of the arena DOM.
//!
//! Nodes with generated inner markup (mounted widgets) emit that markup in
//! place of their original children.

use std::fmt::Write;

use crate::dom::{DomTree, NodeId, NodeType};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape text for element content or a double-quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

impl DomTree {
    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        for &child in &self.node(self.root()).children {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match node.node_type {
            NodeType::Text => out.push_str(&escape_html(&node.text)),
            NodeType::Raw => out.push_str(&node.text),
            NodeType::Document => {
                for &child in &node.children {
                    self.write_node(child, out);
                }
            }
            NodeType::Element => {
                out.push('<');
                out.push_str(&node.tag);
                let mut attrs: Vec<(&String, &String)> = node.attributes.iter().collect();
                attrs.sort();
                for (k, v) in attrs {
                    let _ = write!(out, " {}=\"{}\"", k, escape_html(v));
                }
                out.push('>');
                if VOID_TAGS.contains(&node.tag.as_str()) {
                    return;
                }
                match self.inner_markup(id) {
                    Some(markup) => out.push_str(markup),
                    None => {
                        for &child in &node.children {
                            self.write_node(child, out);
                        }
                    }
                }
                let _ = write!(out, "</{}>", node.tag);
            }
        }
    }
}
