//! Maps the active entries onto the path's dash pattern.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dom::css::format_length;
use crate::nav::config::LineStyle;
use crate::render::path::PathBounds;

/// Stroke state for the SVG path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub opacity: f32,
    pub dasharray: Option<String>,
    pub dashoffset: Option<f32>,
    /// Revealed arc-length window, when visible.
    pub window: Option<(f32, f32)>,
}

impl Highlight {
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            dasharray: None,
            dashoffset: None,
            window: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// `[min start, max end]` over the active entries, if non-degenerate.
pub fn active_window(bounds: &[PathBounds], active: &BTreeSet<usize>) -> Option<(f32, f32)> {
    let mut hits = active.iter().filter_map(|&i| bounds.get(i)).peekable();
    hits.peek()?;
    let (start, end) = hits.fold((f32::INFINITY, 0.0f32), |(s, e), b| {
        (s.min(b.start), e.max(b.end))
    });
    (start < end).then_some((start, end))
}

/// Compute the path stroke for the active set.
///
/// Solid paths get a dash pattern that reveals exactly the active window.
/// Dashed and dotted paths keep their repeating pattern and are only shown
/// or hidden; the window itself is not singled out for them.
pub fn sync_path(
    bounds: &[PathBounds],
    active: &BTreeSet<usize>,
    total_length: f32,
    style: LineStyle,
    stroke_width: f32,
) -> Highlight {
    let Some((start, end)) = active_window(bounds, active) else {
        return Highlight::hidden();
    };

    let (dasharray, dashoffset) = match style.dash_pattern(stroke_width) {
        None => (
            format!(
                "1 {} {} {}",
                format_length(start),
                format_length(end - start),
                format_length(total_length)
            ),
            1.0,
        ),
        Some((dash, gap)) => (format!("{} {}", format_length(dash), format_length(gap)), 0.0),
    };

    Highlight {
        opacity: 1.0,
        dasharray: Some(dasharray),
        dashoffset: Some(dashoffset),
        window: Some((start, end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(pairs: &[(f32, f32)]) -> Vec<PathBounds> {
        pairs.iter().map(|&(start, end)| PathBounds { start, end }).collect()
    }

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn window_spans_min_start_to_max_end() {
        let b = bounds(&[(10.0, 20.0), (25.0, 30.0), (40.0, 55.0)]);
        assert_eq!(active_window(&b, &set(&[0, 2])), Some((10.0, 55.0)));
    }

    #[test]
    fn empty_or_degenerate_window_hides_path() {
        let b = bounds(&[(10.0, 10.0), (20.0, 30.0)]);
        assert_eq!(active_window(&b, &set(&[])), None);
        assert_eq!(active_window(&b, &set(&[0])), None);
        assert_eq!(active_window(&b, &set(&[7])), None);

        let h = sync_path(&b, &set(&[0]), 30.0, LineStyle::Solid, 2.0);
        assert_eq!(h, Highlight::hidden());
        assert!(!h.is_visible());
    }

    #[test]
    fn solid_path_reveals_the_window() {
        let b = bounds(&[(10.0, 20.0), (40.0, 55.0)]);
        let h = sync_path(&b, &set(&[0, 1]), 80.0, LineStyle::Solid, 2.0);
        assert_eq!(h.opacity, 1.0);
        assert_eq!(h.dasharray.as_deref(), Some("1 10 45 80"));
        assert_eq!(h.dashoffset, Some(1.0));
        assert_eq!(h.window, Some((10.0, 55.0)));
    }

    #[test]
    fn dashed_styles_keep_their_pattern() {
        let b = bounds(&[(10.0, 20.0), (40.0, 55.0)]);
        let first = sync_path(&b, &set(&[0]), 80.0, LineStyle::Dashed, 2.0);
        let second = sync_path(&b, &set(&[1]), 80.0, LineStyle::Dashed, 2.0);
        assert_eq!(first.dasharray.as_deref(), Some("8 6"));
        assert_eq!(first.dasharray, second.dasharray);
        assert!(first.is_visible());

        let dotted = sync_path(&b, &set(&[1]), 80.0, LineStyle::Dotted, 3.0);
        assert_eq!(dotted.dasharray.as_deref(), Some("3 6"));
    }
}
