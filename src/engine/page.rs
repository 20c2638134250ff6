//! Parsed page with block layout: the host the CLI and pipeline mount on.

use crate::dom::parser::{parse_html, SelectorError};
use crate::dom::{DomTree, NodeId};
use crate::host::{Document, ElementBox, Geometry};
use crate::render::layout::{compute_layout, PageLayout};

pub struct StaticPage {
    pub dom: DomTree,
    pub layout: PageLayout,
}

impl StaticPage {
    pub fn new(dom: DomTree, viewport_width: f32) -> Self {
        let layout = compute_layout(&dom, viewport_width);
        Self { dom, layout }
    }

    pub fn parse(html: &str, url: &str, viewport_width: f32) -> Self {
        Self::new(parse_html(html, url), viewport_width)
    }

    pub fn to_html(&self) -> String {
        self.dom.to_html()
    }
}

impl Document for StaticPage {
    fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.dom.select(selector)
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.dom
            .get(node)
            .filter(|n| n.is_element())
            .map(|n| n.tag.as_str())
            .unwrap_or("")
    }

    fn text_content(&self, node: NodeId) -> String {
        self.dom.collect_text(node)
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.dom.get(node).and_then(|n| n.attr(name))
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.dom.set_attr(node, name, value);
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.element_by_id(id)
    }

    fn position(&self, node: NodeId) -> usize {
        node.0
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.dom.is_within(node, ancestor)
    }

    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.dom.closest_with_class(node, class)
    }

    fn replace_inner_markup(&mut self, node: NodeId, markup: String) {
        self.dom.replace_inner_markup(node, markup);
    }
}

impl Geometry for StaticPage {
    fn element_box(&self, node: NodeId) -> Option<ElementBox> {
        self.layout.get(node).map(|b| ElementBox {
            top: b.y,
            height: b.height,
        })
    }

    fn document_height(&self) -> f32 {
        self.layout.document_height
    }

    fn content_width(&self, node: NodeId) -> Option<f32> {
        self.layout.get(node).map(|b| b.width)
    }

    fn relayout(&mut self, viewport_width: f32) {
        if (viewport_width - self.layout.viewport_width).abs() > f32::EPSILON {
            log::debug!("relayout at {}px", viewport_width);
            self.layout = compute_layout(&self.dom, viewport_width);
        }
    }
}
