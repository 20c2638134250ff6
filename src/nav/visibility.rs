//! Which nav entries are currently "in view".
//!
//! Point-based detection emulates an intersection observer per target with a
//! viewport band inset by the configured margins. Section-based detection
//! gives every target the span down to the next target and tests that span
//! against the viewport.

use std::collections::BTreeSet;

use crate::dom::NodeId;
use crate::host::{Geometry, Viewport};
use crate::nav::config::NavConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    /// Insets of the viewport band, in percent of the viewport height.
    Point { margin_top: f32, margin_bottom: f32 },
    Section,
}

impl Detection {
    pub fn from_config(config: &NavConfig) -> Self {
        if config.section_detection {
            Self::Section
        } else {
            Self::Point {
                margin_top: config.margin_top,
                margin_bottom: config.margin_bottom,
            }
        }
    }
}

/// Listener registrations held by a tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum Subscription {
    /// One intersection observation per target.
    Intersection(Vec<NodeId>),
    /// A single scroll listener.
    Scroll,
}

/// Vertical span owned by one target in section mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f32,
    pub end: f32,
    /// The last span includes the document end.
    pub closed: bool,
}

impl Span {
    pub fn overlaps(&self, from: f32, to: f32) -> bool {
        if self.closed {
            self.start <= to && from <= self.end
        } else {
            self.start < to && from < self.end
        }
    }
}

/// `[top_i, top_{i+1})` for each target, the last closed at the document end.
pub fn section_spans(tops: &[f32], document_height: f32) -> Vec<Span> {
    tops.iter()
        .enumerate()
        .map(|(i, &start)| match tops.get(i + 1) {
            Some(&next) => Span {
                start,
                end: next.max(start),
                closed: false,
            },
            None => Span {
                start,
                end: document_height.max(start),
                closed: true,
            },
        })
        .collect()
}

/// Viewport band `[top, bottom]` for point-based detection.
pub fn point_band(viewport: &Viewport, margin_top: f32, margin_bottom: f32) -> (f32, f32) {
    let top = viewport.scroll_y + viewport.height * margin_top / 100.0;
    let bottom = viewport.bottom() - viewport.height * margin_bottom / 100.0;
    (top, bottom.max(top))
}

/// Active set of flat-entry indices for one widget.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    detection: Detection,
    targets: Vec<NodeId>,
    active: BTreeSet<usize>,
    subscription: Option<Subscription>,
}

impl VisibilityTracker {
    /// Register against `targets` (flat-entry order).
    pub fn subscribe(detection: Detection, targets: Vec<NodeId>) -> Self {
        let subscription = match detection {
            Detection::Point { .. } => Subscription::Intersection(targets.clone()),
            Detection::Section => Subscription::Scroll,
        };
        Self {
            detection,
            targets,
            active: BTreeSet::new(),
            subscription: Some(subscription),
        }
    }

    pub fn active(&self) -> &BTreeSet<usize> {
        &self.active
    }

    /// Number of intersection observations currently registered.
    pub fn observer_count(&self) -> usize {
        match &self.subscription {
            Some(Subscription::Intersection(targets)) => targets.len(),
            _ => 0,
        }
    }

    pub fn listener_count(&self) -> usize {
        match &self.subscription {
            Some(Subscription::Scroll) => 1,
            _ => 0,
        }
    }

    /// Drop every registration; later updates are no-ops.
    pub fn unsubscribe(&mut self) {
        self.subscription = None;
        self.active.clear();
    }

    /// Recompute the active set. Returns `true` when it changed.
    pub fn update<G: Geometry + ?Sized>(&mut self, geometry: &G, viewport: &Viewport) -> bool {
        if self.subscription.is_none() {
            return false;
        }

        let next: BTreeSet<usize> = match self.detection {
            Detection::Point {
                margin_top,
                margin_bottom,
            } => {
                let (band_top, band_bottom) = point_band(viewport, margin_top, margin_bottom);
                self.targets
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &node)| {
                        let b = geometry.element_box(node)?;
                        (b.top <= band_bottom && b.bottom() >= band_top).then_some(i)
                    })
                    .collect()
            }
            Detection::Section => {
                let tops: Vec<f32> = self
                    .targets
                    .iter()
                    .map(|&node| geometry.element_box(node).map(|b| b.top).unwrap_or(0.0))
                    .collect();
                section_spans(&tops, geometry.document_height())
                    .iter()
                    .enumerate()
                    .filter(|(_, span)| span.overlaps(viewport.scroll_y, viewport.bottom()))
                    .map(|(i, _)| i)
                    .collect()
            }
        };

        if next == self.active {
            return false;
        }
        self.active = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    fn page_with_tops(tops: &[f32], height: f32) -> (FakePage, Vec<NodeId>) {
        let mut page = FakePage::new(height);
        let nodes = tops.iter().map(|&t| page.push("h2", "H", t)).collect();
        (page, nodes)
    }

    fn viewport(scroll_y: f32) -> Viewport {
        Viewport {
            scroll_y,
            width: 1024.0,
            height: 500.0,
        }
    }

    #[test]
    fn section_spans_run_to_next_heading() {
        let spans = section_spans(&[100.0, 400.0, 900.0], 1500.0);
        assert_eq!(
            spans,
            vec![
                Span { start: 100.0, end: 400.0, closed: false },
                Span { start: 400.0, end: 900.0, closed: false },
                Span { start: 900.0, end: 1500.0, closed: true },
            ]
        );
    }

    #[test]
    fn half_open_spans_do_not_touch_neighbours() {
        let span = Span { start: 100.0, end: 400.0, closed: false };
        assert!(!span.overlaps(400.0, 900.0));
        assert!(span.overlaps(399.0, 900.0));
        let last = Span { start: 900.0, end: 1500.0, closed: true };
        assert!(last.overlaps(1500.0, 2000.0));
    }

    #[test]
    fn section_mode_activates_overlapping_spans() {
        let (page, nodes) = page_with_tops(&[100.0, 400.0, 900.0], 1500.0);
        let mut tracker = VisibilityTracker::subscribe(Detection::Section, nodes);

        assert!(tracker.update(&page, &viewport(0.0)));
        assert_eq!(tracker.active().iter().copied().collect::<Vec<_>>(), vec![0, 1]);

        assert!(tracker.update(&page, &viewport(950.0)));
        assert_eq!(tracker.active().iter().copied().collect::<Vec<_>>(), vec![2]);

        assert!(!tracker.update(&page, &viewport(960.0)));
    }

    #[test]
    fn point_mode_uses_inset_band() {
        let (page, nodes) = page_with_tops(&[20.0, 100.0, 400.0], 2000.0);
        let detection = Detection::Point { margin_top: 10.0, margin_bottom: 50.0 };
        let mut tracker = VisibilityTracker::subscribe(detection, nodes);

        // Band is [50, 250]: the first heading (20..50) touches the band edge.
        tracker.update(&page, &viewport(0.0));
        assert_eq!(tracker.active().iter().copied().collect::<Vec<_>>(), vec![0, 1]);

        // Band is [350, 550].
        tracker.update(&page, &viewport(300.0));
        assert_eq!(tracker.active().iter().copied().collect::<Vec<_>>(), vec![2]);

        // Band is [1050, 1250]: nothing in view.
        assert!(tracker.update(&page, &viewport(1000.0)));
        assert!(tracker.active().is_empty());
    }

    #[test]
    fn subscriptions_follow_detection_mode() {
        let (_, nodes) = page_with_tops(&[0.0, 10.0], 100.0);
        let point = VisibilityTracker::subscribe(
            Detection::Point { margin_top: 0.0, margin_bottom: 0.0 },
            nodes.clone(),
        );
        assert_eq!(point.observer_count(), 2);
        assert_eq!(point.listener_count(), 0);

        let mut section = VisibilityTracker::subscribe(Detection::Section, nodes);
        assert_eq!(section.observer_count(), 0);
        assert_eq!(section.listener_count(), 1);

        section.unsubscribe();
        assert_eq!(section.listener_count(), 0);
    }

    #[test]
    fn unsubscribed_tracker_ignores_updates() {
        let (page, nodes) = page_with_tops(&[0.0], 100.0);
        let mut tracker = VisibilityTracker::subscribe(Detection::Section, nodes);
        tracker.unsubscribe();
        assert!(!tracker.update(&page, &viewport(0.0)));
        assert!(tracker.active().is_empty());
    }

    #[test]
    fn band_never_inverts() {
        let (top, bottom) = point_band(&viewport(0.0), 50.0, 50.0);
        assert_eq!(top, 250.0);
        assert_eq!(bottom, 250.0);
    }
}
