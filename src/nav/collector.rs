//! Candidate element discovery.

use std::collections::HashSet;

use crate::dom::NodeId;
use crate::host::Document;
use crate::nav::config::{LabelSource, NavConfig};

/// Class of a mounted widget container.
pub const WIDGET_CLASS: &str = "scrollpath-nav";
/// Class of the authoring-time placeholder.
pub const EDITOR_CLASS: &str = "scrollpath-nav-editor";

/// Level given to custom-selector matches that are not headings.
pub const CUSTOM_LEVEL: u8 = 2;

/// An element that will become a nav entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node: NodeId,
    pub level: u8,
    pub label: String,
    pub id: String,
}

/// Heading level of an `h1`–`h6` tag.
pub fn heading_level(tag: &str) -> Option<u8> {
    let bytes = tag.as_bytes();
    match bytes {
        [b'h' | b'H', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

fn select_tolerant<D: Document + ?Sized>(doc: &D, selector: &str, out: &mut Vec<NodeId>) {
    match doc.select(selector) {
        Ok(found) => out.extend(found),
        Err(e) => log::warn!("skipping selector: {}", e),
    }
}

/// Gather heading and custom-selector matches in document order.
///
/// Elements are deduplicated, exclude-selector matches are dropped, and so is
/// anything inside `container`, another widget container or an editor
/// placeholder.
pub fn collect_elements<D: Document + ?Sized>(
    doc: &D,
    container: NodeId,
    config: &NavConfig,
) -> Vec<NodeId> {
    let mut matched = Vec::new();
    for level in &config.heading_levels {
        select_tolerant(doc, &format!("h{level}"), &mut matched);
    }
    for selector in &config.include_selectors {
        select_tolerant(doc, selector, &mut matched);
    }

    let mut excluded = HashSet::new();
    for selector in &config.exclude_selectors {
        let mut found = Vec::new();
        select_tolerant(doc, selector, &mut found);
        excluded.extend(found);
    }

    let mut seen = HashSet::new();
    let mut elements: Vec<NodeId> = matched
        .into_iter()
        .filter(|node| seen.insert(*node))
        .filter(|node| !excluded.contains(node))
        .filter(|&node| {
            !doc.is_within(node, container)
                && doc.closest_with_class(node, WIDGET_CLASS).is_none()
                && doc.closest_with_class(node, EDITOR_CLASS).is_none()
        })
        .collect();

    elements.sort_by_key(|&node| doc.position(node));
    elements
}

/// Label text for `node` per the configured source.
pub fn resolve_label<D: Document + ?Sized>(doc: &D, node: NodeId, source: LabelSource) -> String {
    let attr = match source {
        LabelSource::Text => None,
        LabelSource::Title => doc.attr(node, "title"),
        LabelSource::DataLabel => doc.attr(node, "data-label"),
    };
    match attr.map(str::trim).filter(|s| !s.is_empty()) {
        Some(label) => label.to_string(),
        None => doc.text_content(node),
    }
}

/// Turn id-annotated elements into candidates.
pub fn to_candidates<D: Document + ?Sized>(
    doc: &D,
    elements: &[NodeId],
    config: &NavConfig,
) -> Vec<Candidate> {
    elements
        .iter()
        .map(|&node| Candidate {
            node,
            level: heading_level(doc.tag_name(node)).unwrap_or(CUSTOM_LEVEL),
            label: resolve_label(doc, node, config.label_source),
            id: doc.attr(node, "id").unwrap_or_default().to_string(),
        })
        .collect()
}
