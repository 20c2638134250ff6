//! Capabilities the nav engine needs from a page.
//!
//! The engine never touches a concrete DOM. It reads and annotates elements
//! through [`Document`] and reads positions through [`Geometry`]; the static
//! page in `engine::page` implements both on top of the parsed arena and the
//! block layout engine.

use crate::dom::parser::SelectorError;
use crate::dom::NodeId;

/// Document tree access.
pub trait Document {
    /// Elements matching `selector`, in document order.
    fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Lowercase tag name, empty for non-elements.
    fn tag_name(&self, node: NodeId) -> &str;

    /// Whitespace-normalised text content.
    fn text_content(&self, node: NodeId) -> String;

    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Pre-order position of `node` in the document.
    fn position(&self, node: NodeId) -> usize;

    /// Whether `node` is `ancestor` or lies below it.
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool;

    /// Nearest inclusive ancestor carrying `class`.
    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId>;

    /// Replace everything below `node` with generated markup.
    fn replace_inner_markup(&mut self, node: NodeId, markup: String);
}

/// Vertical extent of an element relative to the document top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub top: f32,
    pub height: f32,
}

impl ElementBox {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Layout access.
pub trait Geometry {
    fn element_box(&self, node: NodeId) -> Option<ElementBox>;

    fn document_height(&self) -> f32;

    /// Width available to a node's content, used for the nav container.
    fn content_width(&self, node: NodeId) -> Option<f32>;

    /// Recompute geometry for a new viewport width.
    fn relayout(&mut self, viewport_width: f32);
}

/// Everything a mounted widget needs.
pub trait Host: Document + Geometry {}

impl<T: Document + Geometry> Host for T {}

/// Scroll position and viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.height
    }
}
