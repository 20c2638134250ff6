//! Nested nav tree built from the flat, document-ordered candidate list.

use crate::dom::NodeId;
use crate::host::Document;
use crate::nav::collector::Candidate;
use crate::nav::config::ManualEntry;

/// Index of an entry in a [`NavTree`]; also its row in the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub usize);

/// Input row for the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySource {
    pub level: u8,
    pub label: String,
    pub target_id: String,
}

impl From<&Candidate> for EntrySource {
    fn from(c: &Candidate) -> Self {
        Self {
            level: c.level,
            label: c.label.clone(),
            target_id: c.id.clone(),
        }
    }
}

impl From<&ManualEntry> for EntrySource {
    fn from(m: &ManualEntry) -> Self {
        Self {
            level: m.level.clamp(1, 6),
            label: m.label.clone(),
            target_id: m.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub level: u8,
    pub label: String,
    pub target_id: String,
    /// Nesting depth, 0 for root entries.
    pub depth: usize,
    pub parent: Option<EntryId>,
    pub children: Vec<EntryId>,
}

/// Entries are stored in creation order, which is also pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavTree {
    pub entries: Vec<NavEntry>,
    pub roots: Vec<EntryId>,
}

/// Entry whose target element resolved on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatEntry {
    pub entry: EntryId,
    pub target: NodeId,
}

impl NavTree {
    /// Build the tree. Each entry hangs under the most recent entry of the
    /// nearest shallower level that is still open; without one it becomes a
    /// root. Appending at level L closes every open level deeper than L.
    pub fn build(sources: impl IntoIterator<Item = EntrySource>) -> Self {
        let mut tree = NavTree::default();
        // open[l]: latest entry at level l whose child list may still grow.
        let mut open: [Option<EntryId>; 7] = [None; 7];

        for source in sources {
            let level = source.level.clamp(1, 6);
            let parent = (1..level as usize).rev().find_map(|l| open[l]);
            let id = EntryId(tree.entries.len());
            let depth = parent.map(|p| tree.entries[p.0].depth + 1).unwrap_or(0);

            tree.entries.push(NavEntry {
                level,
                label: source.label,
                target_id: source.target_id,
                depth,
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(p) => tree.entries[p.0].children.push(id),
                None => tree.roots.push(id),
            }

            open[level as usize] = Some(id);
            for slot in open.iter_mut().skip(level as usize + 1) {
                *slot = None;
            }
        }
        tree
    }

    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        Self::build(candidates.iter().map(EntrySource::from))
    }

    /// Enabled manual entries, in authored order.
    pub fn from_manual(entries: &[ManualEntry]) -> Self {
        Self::build(entries.iter().filter(|e| e.enabled).map(EntrySource::from))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> &NavEntry {
        &self.entries[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = EntryId> {
        (0..self.entries.len()).map(EntryId)
    }

    /// Entries paired with their target element, in row order. Entries whose
    /// target id is not on the page are left out here but stay in the tree.
    pub fn resolve_targets<D: Document + ?Sized>(&self, doc: &D) -> Vec<FlatEntry> {
        self.ids()
            .filter_map(|entry| {
                let target_id = &self.entry(entry).target_id;
                match doc.element_by_id(target_id) {
                    Some(target) => Some(FlatEntry { entry, target }),
                    None => {
                        log::debug!("nav entry \"{}\" has no target on the page", target_id);
                        None
                    }
                }
            })
            .collect()
    }
}
