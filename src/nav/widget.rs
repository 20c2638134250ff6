//! One mounted scroll path nav.
//!
//! Mounting runs the setup chain once: collect, assign ids, build the tree,
//! lay out the rows, draw the path and subscribe the visibility tracker.
//! Afterwards the widget reacts to two independent inputs: geometry changes
//! (`redraw`) and viewport changes (`update_visibility`).

use std::collections::HashSet;

use crate::dom::NodeId;
use crate::host::{Host, Viewport};
use crate::nav::collector::{collect_elements, to_candidates};
use crate::nav::config::NavConfig;
use crate::nav::hierarchy::{EntryId, FlatEntry, NavTree};
use crate::nav::ids::assign_ids;
use crate::nav::sync::{sync_path, Highlight};
use crate::nav::visibility::{Detection, VisibilityTracker};
use crate::render::markup::{empty_markup, nav_markup};
use crate::render::nav_layout::layout_anchors;
use crate::render::path::{render_path, AnchorBox, RenderedPath};

/// Container width used when the host has no box for the container.
pub const FALLBACK_CONTAINER_WIDTH: f32 = 240.0;

#[derive(Debug, Clone)]
pub struct Mounted {
    pub tree: NavTree,
    pub flat: Vec<FlatEntry>,
    /// One box per tree entry, including entries without a target.
    pub anchors: Vec<AnchorBox>,
    /// Bounds are per flat entry.
    pub path: RenderedPath,
    pub tracker: VisibilityTracker,
    pub highlight: Highlight,
}

#[derive(Debug, Clone)]
pub enum WidgetState {
    /// Nothing to navigate: placeholder rendered, no observers.
    Empty,
    Mounted(Box<Mounted>),
    Disposed,
}

#[derive(Debug, Clone)]
pub struct ScrollPathNav {
    container: NodeId,
    config: NavConfig,
    state: WidgetState,
}

impl ScrollPathNav {
    /// Mount on `container`, reading configuration from its attributes.
    pub fn mount<H: Host + ?Sized>(host: &mut H, container: NodeId, viewport: &Viewport) -> Self {
        let config = NavConfig::from_element(host, container);
        Self::mount_with_config(host, container, config, viewport)
    }

    pub fn mount_with_config<H: Host + ?Sized>(
        host: &mut H,
        container: NodeId,
        config: NavConfig,
        viewport: &Viewport,
    ) -> Self {
        let tree = if config.manual_mode() {
            NavTree::from_manual(&config.manual_entries)
        } else {
            let elements = collect_elements(host, container, &config);
            assign_ids(host, &elements);
            NavTree::from_candidates(&to_candidates(host, &elements, &config))
        };

        let mut widget = Self {
            container,
            config,
            state: WidgetState::Empty,
        };

        if tree.is_empty() {
            log::info!("no headings found for nav {:?}", container);
            widget.render_into(host);
            return widget;
        }

        let flat = tree.resolve_targets(host);
        let tracker = VisibilityTracker::subscribe(
            Detection::from_config(&widget.config),
            flat.iter().map(|f| f.target).collect(),
        );
        widget.state = WidgetState::Mounted(Box::new(Mounted {
            tree,
            flat,
            anchors: Vec::new(),
            path: RenderedPath::default(),
            tracker,
            highlight: Highlight::hidden(),
        }));

        widget.redraw(host);
        widget.update_visibility(host, viewport);
        if let Some(m) = widget.mounted() {
            log::info!(
                "mounted nav {:?}: {} entries, {} on the path",
                container,
                m.tree.len(),
                m.flat.len()
            );
        }
        widget.render_into(host);
        widget
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn mounted(&self) -> Option<&Mounted> {
        match &self.state {
            WidgetState::Mounted(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, WidgetState::Empty)
    }

    /// Recompute row geometry and the path, then re-apply the highlight.
    pub fn redraw<H: Host + ?Sized>(&mut self, host: &H) {
        let width = host
            .content_width(self.container)
            .unwrap_or(FALLBACK_CONTAINER_WIDTH);
        let config = &self.config;
        let WidgetState::Mounted(m) = &mut self.state else {
            return;
        };

        m.anchors = layout_anchors(&m.tree, config, width);
        let on_path: Vec<AnchorBox> = m.flat.iter().map(|f| m.anchors[f.entry.0]).collect();
        m.path = render_path(&on_path, config.corner_radius);
        Self::sync(m, config);
    }

    /// Recompute the active set; re-sync the path when it changed.
    pub fn update_visibility<H: Host + ?Sized>(&mut self, host: &H, viewport: &Viewport) -> bool {
        let config = &self.config;
        let WidgetState::Mounted(m) = &mut self.state else {
            return false;
        };
        if !m.tracker.update(host, viewport) {
            return false;
        }
        Self::sync(m, config);
        true
    }

    fn sync(m: &mut Mounted, config: &NavConfig) {
        m.highlight = sync_path(
            &m.path.bounds,
            m.tracker.active(),
            m.path.length,
            config.line_style,
            config.path_width,
        );
    }

    /// Entries whose targets are currently active.
    pub fn active_entries(&self) -> Vec<EntryId> {
        self.mounted()
            .map(|m| {
                m.tracker
                    .active()
                    .iter()
                    .filter_map(|&i| m.flat.get(i).map(|f| f.entry))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Target ids of the active entries.
    pub fn active_ids(&self) -> Vec<String> {
        match self.mounted() {
            Some(m) => self
                .active_entries()
                .into_iter()
                .map(|e| m.tree.entry(e).target_id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.mounted().map(|m| &m.highlight)
    }

    pub fn observer_count(&self) -> usize {
        self.mounted().map(|m| m.tracker.observer_count()).unwrap_or(0)
    }

    pub fn listener_count(&self) -> usize {
        self.mounted().map(|m| m.tracker.listener_count()).unwrap_or(0)
    }

    /// Inner markup for the container in its current state.
    pub fn markup(&self) -> String {
        match &self.state {
            WidgetState::Empty => empty_markup(),
            WidgetState::Mounted(m) => {
                let visible: HashSet<EntryId> = self.active_entries().into_iter().collect();
                nav_markup(&m.tree, &visible, &m.path, &m.highlight, &self.config)
            }
            WidgetState::Disposed => String::new(),
        }
    }

    /// Replace the container's contents with the generated markup.
    pub fn render_into<H: Host + ?Sized>(&self, host: &mut H) {
        host.replace_inner_markup(self.container, self.markup());
    }

    /// Release every observer and listener. The widget ignores later events.
    pub fn dispose(&mut self) {
        if let WidgetState::Mounted(m) = &mut self.state {
            m.tracker.unsubscribe();
        }
        self.state = WidgetState::Disposed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Document;
    use crate::nav::config::ManualEntry;
    use crate::testing::FakePage;

    fn viewport(scroll_y: f32) -> Viewport {
        Viewport { scroll_y, width: 1024.0, height: 600.0 }
    }

    fn article() -> (FakePage, NodeId) {
        let mut page = FakePage::new(3000.0);
        let nav = page.push("nav", "", 0.0);
        page.with_attr(nav, "class", "scrollpath-nav");
        page.push("h2", "Getting started", 100.0);
        page.push("h3", "Install", 400.0);
        page.push("h4", "From source", 700.0);
        page.push("h2", "Usage", 1200.0);
        page.push("h3", "Options", 1800.0);
        (page, nav)
    }

    #[test]
    fn mounts_full_chain() {
        let (mut page, nav) = article();
        let widget = ScrollPathNav::mount(&mut page, nav, &viewport(0.0));

        let m = widget.mounted().unwrap();
        assert_eq!(m.tree.len(), 5);
        assert_eq!(m.tree.roots.len(), 2);
        assert_eq!(m.flat.len(), 5);
        assert_eq!(m.path.bounds.len(), 5);
        assert_eq!(widget.observer_count(), 5);
        assert!(page.element_by_id("getting-started").is_some());

        // Band [60, 300] at the top: only the first heading.
        assert_eq!(widget.active_ids(), vec!["getting-started"]);
        assert!(widget.highlight().unwrap().is_visible());
        assert!(page.markup[&nav].contains("href=\"#getting-started\""));
    }

    #[test]
    fn empty_page_renders_placeholder_without_observers() {
        let mut page = FakePage::new(1000.0);
        let nav = page.push("nav", "", 0.0);
        page.with_attr(nav, "class", "scrollpath-nav");
        page.push("p", "No headings here", 50.0);

        let widget = ScrollPathNav::mount(&mut page, nav, &viewport(0.0));
        assert!(widget.is_empty());
        assert_eq!(widget.observer_count(), 0);
        assert_eq!(widget.listener_count(), 0);
        assert!(page.markup[&nav].contains("No headings found on this page."));
    }

    #[test]
    fn section_mode_tracks_scroll() {
        let (mut page, nav) = article();
        page.with_attr(nav, "data-section-detection", "true");
        let mut widget = ScrollPathNav::mount(&mut page, nav, &viewport(0.0));
        assert_eq!(widget.listener_count(), 1);
        assert_eq!(widget.observer_count(), 0);

        assert!(widget.update_visibility(&page, &viewport(1300.0)));
        assert_eq!(widget.active_ids(), vec!["usage", "options"]);
        let (start, end) = widget.highlight().unwrap().window.unwrap();
        let m = widget.mounted().unwrap();
        assert_eq!(start, m.path.bounds[3].start);
        assert_eq!(end, m.path.bounds[4].end);
    }

    #[test]
    fn manual_entries_replace_detection() {
        let (mut page, nav) = article();
        let target = page.push("h2", "Appendix", 2500.0);
        page.with_attr(target, "id", "appendix");
        let config = NavConfig {
            manual_entries: vec![
                ManualEntry { id: "appendix".into(), label: "Appendix".into(), enabled: true, level: 2 },
                ManualEntry { id: "gone".into(), label: "Removed".into(), enabled: true, level: 3 },
                ManualEntry { id: "off".into(), label: "Off".into(), enabled: false, level: 2 },
            ],
            ..NavConfig::default()
        };

        let widget = ScrollPathNav::mount_with_config(&mut page, nav, config, &viewport(0.0));
        let m = widget.mounted().unwrap();
        assert_eq!(m.tree.len(), 2);
        assert_eq!(m.flat.len(), 1);
        assert_eq!(m.anchors.len(), 2);
        assert_eq!(m.path.bounds.len(), 1);
        // Detection did not run, so headings keep having no ids.
        assert!(page.id_of(NodeId(1)).is_none());
        assert!(page.markup[&nav].contains("href=\"#gone\""));
    }

    #[test]
    fn redraw_follows_container_width() {
        let (mut page, nav) = article();
        let mut widget = ScrollPathNav::mount(&mut page, nav, &viewport(0.0));
        let before = widget.mounted().unwrap().path.length;

        page.container_width = 60.0;
        widget.redraw(&page);
        let after = widget.mounted().unwrap().path.length;
        assert!(after > before);
    }

    #[test]
    fn dispose_releases_observers() {
        let (mut page, nav) = article();
        let mut widget = ScrollPathNav::mount(&mut page, nav, &viewport(0.0));
        widget.dispose();
        assert_eq!(widget.observer_count(), 0);
        assert!(!widget.update_visibility(&page, &viewport(1000.0)));
        assert!(widget.markup().is_empty());
    }
}
