//! Fragment identifiers for nav targets.

use std::collections::HashSet;

use crate::dom::NodeId;
use crate::host::Document;

/// Base used when an element's text yields no usable characters.
pub const FALLBACK_ID: &str = "section";

/// Lowercase, collapse non-alphanumeric runs into single hyphens, trim hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Make sure every element carries a unique `id`.
///
/// Existing ids are never touched. New ids are derived from the text and
/// suffixed `-1`, `-2`, … until they collide with neither an id already on
/// the page nor one handed out earlier in this pass. Elements are processed
/// in document order, so the earliest element wins the bare slug.
pub fn assign_ids<D: Document + ?Sized>(doc: &mut D, elements: &[NodeId]) {
    let mut used: HashSet<String> = HashSet::new();

    for &node in elements {
        if let Some(existing) = doc.attr(node, "id").filter(|id| !id.is_empty()) {
            used.insert(existing.to_string());
            continue;
        }

        let mut base = slugify(&doc.text_content(node));
        if base.is_empty() {
            base = FALLBACK_ID.to_string();
        }

        let mut id = base.clone();
        let mut counter = 1;
        while used.contains(&id) || doc.element_by_id(&id).is_some() {
            id = format!("{base}-{counter}");
            counter += 1;
        }

        log::debug!("assigned id \"{}\"", id);
        doc.set_attr(node, "id", &id);
        used.insert(id);
    }
}
