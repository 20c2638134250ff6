//! Row geometry of the generated nav list.

use crate::nav::config::NavConfig;
use crate::nav::hierarchy::NavTree;
use crate::render::layout::wrapped_lines;
use crate::render::path::{AnchorBox, PATH_INSET};

/// Left padding of the root list, leaving room for the path.
pub const LIST_GUTTER: f32 = 2.0 * PATH_INSET + 2.0;

/// Anchor boxes for every tree entry, indexed by `EntryId`.
///
/// Rows stack in pre-order; each nesting level indents by the configured
/// child indent, and labels wrap to the width left in the container.
pub fn layout_anchors(tree: &NavTree, config: &NavConfig, container_width: f32) -> Vec<AnchorBox> {
    let row_height = config.row_height();
    let mut top = 0.0;
    tree.entries
        .iter()
        .map(|entry| {
            let left = LIST_GUTTER + entry.depth as f32 * config.child_indent;
            let available = (container_width - left).max(config.font_size);
            let lines = wrapped_lines(&entry.label, config.font_size, available);
            let anchor = AnchorBox {
                left,
                top,
                height: lines * row_height,
            };
            top += anchor.height;
            anchor
        })
        .collect()
}
