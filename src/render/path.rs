//! SVG path through the nav anchors.
//!
//! The path runs down each anchor's left edge and bends between rows whose
//! indent differs. Arc length is tracked while the path is built, so every
//! entry knows where its stroke starts and ends along the path.

use std::f32::consts::FRAC_PI_2;
use std::fmt::Write;

use crate::dom::css::format_length;

/// Horizontal gap between the path and the anchor's left edge.
pub const PATH_INSET: f32 = 5.0;

/// Anchor position relative to the widget container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorBox {
    pub left: f32,
    pub top: f32,
    pub height: f32,
}

/// Arc-length interval of one entry's vertical stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathBounds {
    pub start: f32,
    pub end: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Move { x: f32, y: f32 },
    Line { x: f32, y: f32 },
    /// Quarter circle of radius `r` ending at (x, y).
    Arc { r: f32, sweep: bool, x: f32, y: f32 },
}

/// Path data with a running arc length.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<Segment>,
    cursor: (f32, f32),
    length: f32,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.segments.push(Segment::Move { x, y });
        self.cursor = (x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        let (cx, cy) = self.cursor;
        self.length += ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        self.segments.push(Segment::Line { x, y });
        self.cursor = (x, y);
    }

    /// Quarter-circle turn of radius `r` to (x, y).
    pub fn quarter_arc_to(&mut self, r: f32, sweep: bool, x: f32, y: f32) {
        self.length += FRAC_PI_2 * r;
        self.segments.push(Segment::Arc { r, sweep, x, y });
        self.cursor = (x, y);
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Total arc length so far.
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// SVG `d` attribute.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        for segment in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = match *segment {
                Segment::Move { x, y } => write!(d, "M {} {}", format_length(x), format_length(y)),
                Segment::Line { x, y } => write!(d, "L {} {}", format_length(x), format_length(y)),
                Segment::Arc { r, sweep, x, y } => write!(
                    d,
                    "A {r} {r} 0 0 {} {} {}",
                    sweep as u8,
                    format_length(x),
                    format_length(y),
                    r = format_length(r)
                ),
            };
        }
        d
    }
}

/// Computed geometry for one widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPath {
    pub d: String,
    pub length: f32,
    /// One interval per input anchor, in the same order.
    pub bounds: Vec<PathBounds>,
    /// Extent of the path, for sizing the SVG.
    pub width: f32,
    pub height: f32,
}

/// Turn from vertical into horizontal and back, with rounded corners.
fn rounded_bend(path: &mut PathBuilder, radius: f32, to_x: f32, to_y: f32) {
    let (from_x, from_y) = path.cursor();
    let dx = to_x - from_x;
    let dir = dx.signum();
    let r = radius.min(dx.abs() / 2.0);

    // Previous stroke too short for the corner: start turning right away.
    if to_y - from_y > r {
        path.line_to(from_x, to_y - r);
    }
    let (cx, cy) = path.cursor();
    path.quarter_arc_to(r, dir < 0.0, cx + dir * r, cy + r);
    path.line_to(to_x - dir * r, cy + r);
    path.quarter_arc_to(r, dir > 0.0, to_x, cy + 2.0 * r);
}

/// Build the path visiting every anchor in order.
pub fn render_path(anchors: &[AnchorBox], corner_radius: f32) -> RenderedPath {
    let mut path = PathBuilder::new();
    let mut bounds = Vec::with_capacity(anchors.len());
    let mut prev_x = 0.0;
    let mut max_x: f32 = 0.0;

    for (i, anchor) in anchors.iter().enumerate() {
        let x = anchor.left - PATH_INSET;
        let y = anchor.top;
        let bottom = y + anchor.height;
        max_x = max_x.max(x);

        let start;
        if i == 0 {
            path.move_to(x, y);
            start = 0.0;
        } else {
            if (x - prev_x).abs() > f32::EPSILON {
                if corner_radius > 0.0 {
                    rounded_bend(&mut path, corner_radius, x, y);
                } else {
                    if path.cursor() != (prev_x, y) {
                        path.line_to(prev_x, y);
                    }
                    path.line_to(x, y);
                }
            } else {
                path.line_to(x, y);
            }
            start = path.length();
        }

        let (_, cy) = path.cursor();
        path.line_to(x, bottom.max(cy));
        bounds.push(PathBounds {
            start,
            end: path.length(),
        });
        prev_x = x;
    }

    RenderedPath {
        d: path.to_svg_d(),
        length: path.length(),
        bounds,
        width: max_x + PATH_INSET,
        height: path.cursor().1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(left: f32, top: f32) -> AnchorBox {
        AnchorBox { left, top, height: 20.0 }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn straight_path_for_equal_indents() {
        let path = render_path(&[anchor(10.0, 0.0), anchor(10.0, 25.0)], 0.0);
        assert_eq!(path.d, "M 5 0 L 5 20 L 5 25 L 5 45");
        assert_eq!(path.bounds[0], PathBounds { start: 0.0, end: 20.0 });
        assert_eq!(path.bounds[1], PathBounds { start: 25.0, end: 45.0 });
        assert!(close(path.length, 45.0));
    }

    #[test]
    fn right_angle_bend_on_indent_change() {
        let path = render_path(&[anchor(10.0, 0.0), anchor(30.0, 20.0)], 0.0);
        assert_eq!(path.d, "M 5 0 L 5 20 L 25 20 L 25 40");
        assert_eq!(path.bounds[1], PathBounds { start: 40.0, end: 60.0 });
    }

    #[test]
    fn right_angle_bend_after_a_gap_drops_down_first() {
        let path = render_path(&[anchor(10.0, 0.0), anchor(30.0, 30.0)], 0.0);
        assert_eq!(path.d, "M 5 0 L 5 20 L 5 30 L 25 30 L 25 50");
        assert_eq!(path.bounds[1], PathBounds { start: 50.0, end: 70.0 });
    }

    #[test]
    fn rounded_bend_adds_quarter_arcs() {
        let path = render_path(&[anchor(10.0, 0.0), anchor(50.0, 30.0)], 8.0);
        // 20 down, 2 straight, arc, 24 across, arc, then the stroke from 38 to 50.
        let arc = FRAC_PI_2 * 8.0;
        assert!(close(path.bounds[1].start, 20.0 + 2.0 + arc + 24.0 + arc));
        assert!(close(path.bounds[1].end - path.bounds[1].start, 12.0));
        assert!(path.d.contains("A 8 8 0 0 0 13 30"));
        assert!(path.d.contains("A 8 8 0 0 1 45 38"));
    }

    #[test]
    fn rounded_bend_toward_smaller_indent() {
        let path = render_path(&[anchor(50.0, 0.0), anchor(10.0, 30.0)], 4.0);
        assert!(path.d.contains("A 4 4 0 0 1 41 30"));
        assert!(path.d.contains("A 4 4 0 0 0 5 34"));
    }

    #[test]
    fn short_gap_skips_pre_corner_segment() {
        let path = render_path(&[anchor(10.0, 0.0), anchor(50.0, 22.0)], 8.0);
        // Gap of 2 < radius: the arc starts directly at the end of the first stroke.
        assert!(path.d.starts_with("M 5 0 L 5 20 A 8 8"));
        for b in &path.bounds {
            assert!(b.start <= b.end);
        }
    }

    #[test]
    fn radius_limited_by_half_the_indent_change() {
        let path = render_path(&[anchor(10.0, 0.0), anchor(14.0, 40.0)], 30.0);
        assert!(path.d.contains("A 2 2"));
    }

    #[test]
    fn arc_length_never_decreases() {
        let anchors: Vec<AnchorBox> = [10.0, 26.0, 42.0, 10.0, 26.0, 26.0]
            .iter()
            .enumerate()
            .map(|(i, &left)| anchor(left, i as f32 * 24.0))
            .collect();
        for radius in [0.0, 4.0, 50.0] {
            let path = render_path(&anchors, radius);
            let mut last = 0.0;
            for b in &path.bounds {
                assert!(b.start <= b.end);
                assert!(b.start >= last - 1e-3);
                last = b.end;
            }
            assert!(close(last, path.length));
        }
    }

    #[test]
    fn empty_input_yields_empty_path() {
        let path = render_path(&[], 0.0);
        assert!(path.d.is_empty());
        assert!(path.bounds.is_empty());
        assert_eq!(path.length, 0.0);
    }
}
