use crate::dom::{DomTree, NodeId, NodeType};

/// Bounding box for a laid-out DOM node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Boxes for every node of a document, indexed by `NodeId`.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub boxes: Vec<Option<LayoutBox>>,
    pub viewport_width: f32,
    pub document_height: f32,
}

impl PageLayout {
    pub fn get(&self, id: NodeId) -> Option<LayoutBox> {
        self.boxes.get(id.0).copied().flatten()
    }
}

const BLOCK_TAGS: &[&str] = &[
    "html",
    "body",
    "div",
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "ul",
    "ol",
    "li",
    "table",
    "tr",
    "td",
    "th",
    "form",
    "section",
    "article",
    "aside",
    "main",
    "header",
    "footer",
    "nav",
    "blockquote",
    "pre",
    "figure",
    "figcaption",
    "details",
    "summary",
];

/// Elements that never generate a box.
const HIDDEN_TAGS: &[&str] = &["head", "title", "meta", "link", "script", "style", "template"];

/// Per-tag vertical margins (top, bottom) in pixels.
fn tag_margins(tag: &str) -> (f32, f32) {
    match tag {
        "h1" => (24.0, 16.0),
        "h2" => (20.0, 12.0),
        "h3" | "h4" => (16.0, 10.0),
        "h5" | "h6" => (12.0, 8.0),
        "p" => (4.0, 10.0),
        "ul" | "ol" => (8.0, 8.0),
        "li" => (2.0, 2.0),
        "section" | "article" | "main" => (16.0, 16.0),
        "nav" | "header" | "footer" => (12.0, 12.0),
        "blockquote" => (12.0, 12.0),
        "pre" => (8.0, 8.0),
        "hr" => (8.0, 8.0),
        _ => (0.0, 0.0),
    }
}

/// Per-tag padding in pixels.
fn tag_padding(tag: &str, is_block: bool) -> f32 {
    match tag {
        "section" | "article" | "main" | "aside" => 16.0,
        "nav" | "header" | "footer" => 12.0,
        "blockquote" => 20.0,
        _ if is_block => 4.0,
        _ => 0.0,
    }
}

fn tag_font_size(tag: &str, parent_font_size: f32) -> f32 {
    match tag {
        "h1" => 32.0,
        "h2" => 24.0,
        "h3" => 20.0,
        "h4" => 18.0,
        "h5" | "h6" => 16.0,
        "small" => 12.0,
        _ => parent_font_size,
    }
}

/// Number of wrapped lines `text` takes at `font_size` within `available_width`.
pub fn wrapped_lines(text: &str, font_size: f32, available_width: f32) -> f32 {
    let chars_per_line = (available_width / (font_size * 0.6)).max(1.0) as usize;
    (text.chars().count() as f32 / chars_per_line as f32).ceil().max(1.0)
}

/// Compute layout for a DOM tree (simple top-to-bottom block model).
pub fn compute_layout(tree: &DomTree, viewport_width: f32) -> PageLayout {
    let mut boxes = vec![None; tree.len()];
    let mut cursor_y = 0.0;
    if !tree.is_empty() {
        layout_node(tree, tree.root(), 0.0, &mut cursor_y, viewport_width, 16.0, &mut boxes);
    }
    PageLayout {
        boxes,
        viewport_width,
        document_height: cursor_y,
    }
}

fn layout_node(
    tree: &DomTree,
    id: NodeId,
    x: f32,
    cursor_y: &mut f32,
    available_width: f32,
    parent_font_size: f32,
    boxes: &mut [Option<LayoutBox>],
) {
    let node = tree.node(id);
    if node.node_type == NodeType::Raw || HIDDEN_TAGS.contains(&node.tag.as_str()) {
        return;
    }

    let is_block = node.node_type == NodeType::Element && BLOCK_TAGS.contains(&node.tag.as_str());
    let font_size = tag_font_size(&node.tag, parent_font_size);

    let (margin_top, margin_bottom) = tag_margins(&node.tag);
    let padding = tag_padding(&node.tag, is_block);

    if is_block {
        *cursor_y += margin_top;
    }

    let start_y = *cursor_y;

    if padding > 0.0 {
        *cursor_y += padding;
    }

    // Layout children
    let child_x = x + padding;
    let child_width = (available_width - padding * 2.0).max(0.0);

    for &child in &node.children {
        layout_node(tree, child, child_x, cursor_y, child_width, font_size, boxes);
    }

    // Text content contributes to height
    if node.node_type == NodeType::Text {
        let text = node.text.trim();
        if !text.is_empty() {
            let line_height = font_size * 1.4;
            *cursor_y += wrapped_lines(text, font_size, available_width) * line_height;
        }
    }

    if padding > 0.0 {
        *cursor_y += padding;
    }

    let height = *cursor_y - start_y;

    if is_block {
        *cursor_y += margin_bottom;
    }

    boxes[id.0] = Some(LayoutBox {
        x,
        y: start_y,
        width: available_width,
        height,
    });
}
