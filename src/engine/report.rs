//! Serializable snapshot of mounted navs, used by the CLI's `--json` output.

use serde::Serialize;

use crate::engine::runtime::PageRuntime;
use crate::host::Host;
use crate::nav::widget::ScrollPathNav;

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub id: String,
    pub label: String,
    pub level: u8,
    pub depth: usize,
    /// Arc-length span on the path; absent when the target is missing.
    pub path_start: Option<f32>,
    pub path_end: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub d: String,
    pub length: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavReport {
    pub container: usize,
    pub empty: bool,
    pub entries: Vec<EntryReport>,
    pub path: Option<PathReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavState {
    pub active_ids: Vec<String>,
    pub window: Option<(f32, f32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrollReport {
    pub scroll_y: f32,
    pub navs: Vec<NavState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub url: String,
    pub document_height: f32,
    pub navs: Vec<NavReport>,
    pub scrolls: Vec<ScrollReport>,
}

pub fn describe_nav(widget: &ScrollPathNav) -> NavReport {
    let Some(m) = widget.mounted() else {
        return NavReport {
            container: widget.container().0,
            empty: widget.is_empty(),
            entries: Vec::new(),
            path: None,
        };
    };

    let entries = m
        .tree
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let bounds = m
                .flat
                .iter()
                .position(|f| f.entry.0 == i)
                .and_then(|k| m.path.bounds.get(k));
            EntryReport {
                id: entry.target_id.clone(),
                label: entry.label.clone(),
                level: entry.level,
                depth: entry.depth,
                path_start: bounds.map(|b| b.start),
                path_end: bounds.map(|b| b.end),
            }
        })
        .collect();

    NavReport {
        container: widget.container().0,
        empty: false,
        entries,
        path: Some(PathReport {
            d: m.path.d.clone(),
            length: m.path.length,
        }),
    }
}

pub fn nav_state(widget: &ScrollPathNav) -> NavState {
    NavState {
        active_ids: widget.active_ids(),
        window: widget.highlight().and_then(|h| h.window),
    }
}

/// Scroll to each position in turn and record what every nav shows.
pub fn simulate_scrolls<H: Host>(runtime: &mut PageRuntime<H>, positions: &[f32]) -> Vec<ScrollReport> {
    positions
        .iter()
        .map(|&y| {
            runtime.scroll_to(y);
            ScrollReport {
                scroll_y: runtime.viewport().scroll_y,
                navs: runtime.widgets().iter().map(nav_state).collect(),
            }
        })
        .collect()
}

pub fn page_report<H: Host>(runtime: &mut PageRuntime<H>, url: &str, positions: &[f32]) -> PageReport {
    let navs = runtime.widgets().iter().map(describe_nav).collect();
    let scrolls = simulate_scrolls(runtime, positions);
    PageReport {
        url: url.to_string(),
        document_height: runtime.host().document_height(),
        navs,
        scrolls,
    }
}
