//! Widget configuration read from the container's `data-*` attributes.
//!
//! Every field has a documented default. Malformed values fall back to the
//! default and numeric values are clamped to their authoring ranges, so a
//! container with no attributes at all still mounts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::css::{normalize_hex_color, parse_css_size};
use crate::host::Document;

pub const DEFAULT_HEADING_LEVELS: [u8; 3] = [2, 3, 4];
pub const DEFAULT_PATH_COLOR: &str = "#3858e9";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown line style \"{}\"", s))
    }
}

impl LineStyle {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            "dotted" => Some(Self::Dotted),
            _ => None,
        }
    }

    /// Repeating dash pattern for the non-solid styles, scaled by stroke width.
    pub fn dash_pattern(self, width: f32) -> Option<(f32, f32)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((width * 4.0, width * 3.0)),
            Self::Dotted => Some((width, width * 2.0)),
        }
    }
}

/// Where a nav link's label comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelSource {
    /// The element's text content.
    Text,
    /// The `title` attribute, falling back to text.
    Title,
    /// The `data-label` attribute, falling back to text.
    DataLabel,
}

impl LabelSource {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "title" => Some(Self::Title),
            "data-label" | "label" => Some(Self::DataLabel),
            _ => None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> u8 {
    2
}

/// Pre-authored nav entry referencing a target by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub id: String,
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Included heading levels, ascending, within 1–6.
    pub heading_levels: Vec<u8>,
    pub include_selectors: Vec<String>,
    pub exclude_selectors: Vec<String>,
    /// Viewport band insets in percent (0–50, step 5).
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub section_detection: bool,
    pub path_color: String,
    pub path_width: f32,
    /// Stroke opacity in percent (10–100).
    pub path_opacity: f32,
    pub line_style: LineStyle,
    pub child_indent: f32,
    pub corner_radius: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub label_source: LabelSource,
    pub manual_entries: Vec<ManualEntry>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            heading_levels: DEFAULT_HEADING_LEVELS.to_vec(),
            include_selectors: Vec::new(),
            exclude_selectors: Vec::new(),
            margin_top: 10.0,
            margin_bottom: 50.0,
            section_detection: false,
            path_color: DEFAULT_PATH_COLOR.to_string(),
            path_width: 2.0,
            path_opacity: 100.0,
            line_style: LineStyle::Solid,
            child_indent: 16.0,
            corner_radius: 0.0,
            font_size: 16.0,
            line_height: 1.6,
            label_source: LabelSource::Text,
            manual_entries: Vec::new(),
        }
    }
}

fn clamped(raw: Option<&str>, default: f32, min: f32, max: f32) -> f32 {
    raw.and_then(parse_css_size)
        .map(|v| v.clamp(min, max))
        .unwrap_or(default)
}

fn margin(raw: Option<&str>, default: f32) -> f32 {
    ((clamped(raw, default, 0.0, 50.0) / 5.0).round() * 5.0).min(50.0)
}

fn flag(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|s| s.trim().to_ascii_lowercase()) {
        Some(s) if matches!(s.as_str(), "true" | "1" | "yes" | "on") => true,
        Some(s) if matches!(s.as_str(), "false" | "0" | "no" | "off") => false,
        _ => default,
    }
}

/// Split a comma-separated selector list, dropping empty items.
pub fn split_selectors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `h2,h3` or `2,3` into sorted, deduplicated levels.
pub fn parse_heading_levels(raw: &str) -> Vec<u8> {
    let mut levels: Vec<u8> = raw
        .split(',')
        .filter_map(|s| {
            let s = s.trim().to_ascii_lowercase();
            s.strip_prefix('h').unwrap_or(s.as_str()).parse::<u8>().ok()
        })
        .filter(|l| (1..=6).contains(l))
        .collect();
    levels.sort_unstable();
    levels.dedup();
    levels
}

/// Parse a JSON manual-entry list. Malformed input yields `None`.
pub fn parse_manual_entries(raw: &str) -> Option<Vec<ManualEntry>> {
    match serde_json::from_str::<Vec<ManualEntry>>(raw) {
        Ok(mut entries) => {
            for entry in &mut entries {
                entry.level = entry.level.clamp(1, 6);
            }
            Some(entries)
        }
        Err(e) => {
            log::warn!("ignoring malformed manual entries: {}", e);
            None
        }
    }
}

impl NavConfig {
    /// Read configuration from the container element's attributes.
    pub fn from_element<D: Document + ?Sized>(doc: &D, container: crate::dom::NodeId) -> Self {
        Self::from_attributes(|name| doc.attr(container, name))
    }

    /// Read configuration through an attribute lookup.
    pub fn from_attributes<'a>(get: impl Fn(&str) -> Option<&'a str>) -> Self {
        let d = Self::default();

        let heading_levels = match get("data-heading-levels").map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let levels = parse_heading_levels(raw);
                if levels.is_empty() {
                    log::warn!("no valid heading levels in \"{}\", using defaults", raw);
                    d.heading_levels.clone()
                } else {
                    levels
                }
            }
            _ => d.heading_levels.clone(),
        };

        let path_color = get("data-path-color")
            .and_then(normalize_hex_color)
            .unwrap_or_else(|| d.path_color.clone());

        let manual_entries = get("data-manual-entries")
            .filter(|s| !s.trim().is_empty())
            .and_then(parse_manual_entries)
            .unwrap_or_default();

        Self {
            heading_levels,
            include_selectors: get("data-custom-selectors")
                .map(split_selectors)
                .unwrap_or_default(),
            exclude_selectors: get("data-exclude-selectors")
                .map(split_selectors)
                .unwrap_or_default(),
            margin_top: margin(get("data-margin-top"), d.margin_top),
            margin_bottom: margin(get("data-margin-bottom"), d.margin_bottom),
            section_detection: flag(get("data-section-detection"), d.section_detection),
            path_color,
            path_width: clamped(get("data-path-width"), d.path_width, 1.0, 10.0),
            path_opacity: clamped(get("data-path-opacity"), d.path_opacity, 10.0, 100.0),
            line_style: get("data-line-style")
                .and_then(LineStyle::parse)
                .unwrap_or(d.line_style),
            child_indent: clamped(get("data-child-indent"), d.child_indent, 1.0, 300.0),
            corner_radius: clamped(get("data-corner-radius"), d.corner_radius, 0.0, 50.0),
            font_size: clamped(get("data-font-size"), d.font_size, 8.0, 32.0),
            line_height: clamped(get("data-line-height"), d.line_height, 1.0, 4.0),
            label_source: get("data-label-source")
                .and_then(LabelSource::parse)
                .unwrap_or(d.label_source),
            manual_entries,
        }
    }

    /// Manual entries replace live detection when any of them is enabled.
    pub fn manual_mode(&self) -> bool {
        self.manual_entries.iter().any(|e| e.enabled)
    }

    /// Height of one nav row.
    pub fn row_height(&self) -> f32 {
        self.font_size * self.line_height
    }

    pub fn with_section_detection(mut self, enabled: bool) -> Self {
        self.section_detection = enabled;
        self
    }

    pub fn with_heading_levels(mut self, levels: Vec<u8>) -> Self {
        if !levels.is_empty() {
            self.heading_levels = levels;
        }
        self
    }

    pub fn with_include_selectors(mut self, selectors: Vec<String>) -> Self {
        self.include_selectors.extend(selectors);
        self
    }

    pub fn with_exclude_selectors(mut self, selectors: Vec<String>) -> Self {
        self.exclude_selectors.extend(selectors);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.clamp(0.0, 50.0);
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }
}

/// Settings forced onto every mounted widget, on top of its attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub heading_levels: Option<Vec<u8>>,
    pub include_selectors: Vec<String>,
    pub exclude_selectors: Vec<String>,
    pub section_detection: Option<bool>,
    pub corner_radius: Option<f32>,
    pub line_style: Option<LineStyle>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, mut config: NavConfig) -> NavConfig {
        if let Some(levels) = &self.heading_levels {
            config = config.with_heading_levels(levels.clone());
        }
        config = config
            .with_include_selectors(self.include_selectors.clone())
            .with_exclude_selectors(self.exclude_selectors.clone());
        if let Some(enabled) = self.section_detection {
            config = config.with_section_detection(enabled);
        }
        if let Some(radius) = self.corner_radius {
            config = config.with_corner_radius(radius);
        }
        if let Some(style) = self.line_style {
            config = config.with_line_style(style);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> NavConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NavConfig::from_attributes(|name| map.get(name).map(|s| s.as_str()))
    }

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(from_map(&[]), NavConfig::default());
    }

    #[test]
    fn parses_levels_in_both_notations() {
        assert_eq!(parse_heading_levels("h3, h2,H2"), vec![2, 3]);
        assert_eq!(parse_heading_levels("1,6,7,x"), vec![1, 6]);
        assert_eq!(from_map(&[("data-heading-levels", "h9")]).heading_levels, vec![2, 3, 4]);
    }

    #[test]
    fn clamps_and_falls_back_on_numbers() {
        let c = from_map(&[
            ("data-path-width", "25"),
            ("data-path-opacity", "abc"),
            ("data-margin-top", "13"),
            ("data-margin-bottom", "80"),
            ("data-child-indent", "0"),
            ("data-font-size", "12px"),
        ]);
        assert_eq!(c.path_width, 10.0);
        assert_eq!(c.path_opacity, 100.0);
        assert_eq!(c.margin_top, 15.0);
        assert_eq!(c.margin_bottom, 50.0);
        assert_eq!(c.child_indent, 1.0);
        assert_eq!(c.font_size, 12.0);
    }

    #[test]
    fn parses_styles_and_sources() {
        let c = from_map(&[
            ("data-line-style", "Dotted"),
            ("data-label-source", "data-label"),
            ("data-section-detection", "true"),
            ("data-path-color", "#ABC"),
            ("data-custom-selectors", ".step, , [data-nav]"),
        ]);
        assert_eq!(c.line_style, LineStyle::Dotted);
        assert_eq!(c.label_source, LabelSource::DataLabel);
        assert!(c.section_detection);
        assert_eq!(c.path_color, "#abc");
        assert_eq!(c.include_selectors, vec![".step", "[data-nav]"]);

        let bad = from_map(&[("data-path-color", "blue"), ("data-line-style", "wavy")]);
        assert_eq!(bad.path_color, DEFAULT_PATH_COLOR);
        assert_eq!(bad.line_style, LineStyle::Solid);
    }

    #[test]
    fn manual_entries_from_json() {
        let c = from_map(&[(
            "data-manual-entries",
            r#"[{"id":"a","label":"A"},{"id":"b","label":"B","enabled":false,"level":9}]"#,
        )]);
        assert_eq!(c.manual_entries.len(), 2);
        assert!(c.manual_entries[0].enabled);
        assert_eq!(c.manual_entries[0].level, 2);
        assert_eq!(c.manual_entries[1].level, 6);
        assert!(c.manual_mode());

        let broken = from_map(&[("data-manual-entries", "[{")]);
        assert!(broken.manual_entries.is_empty());
        assert!(!broken.manual_mode());
    }

    #[test]
    fn overrides_win_over_attributes() {
        let base = from_map(&[("data-heading-levels", "h2"), ("data-custom-selectors", ".step")]);
        let overrides = ConfigOverrides {
            heading_levels: Some(vec![3]),
            include_selectors: vec![".card".into()],
            section_detection: Some(true),
            corner_radius: Some(80.0),
            line_style: Some("dashed".parse().unwrap()),
            ..ConfigOverrides::default()
        };
        let c = overrides.apply(base.clone());
        assert_eq!(c.heading_levels, vec![3]);
        assert_eq!(c.include_selectors, vec![".step", ".card"]);
        assert!(c.section_detection);
        assert_eq!(c.corner_radius, 50.0);
        assert_eq!(c.line_style, LineStyle::Dashed);

        assert!(ConfigOverrides::default().is_empty());
        assert_eq!(ConfigOverrides::default().apply(base.clone()), base);
        assert!("wavy".parse::<LineStyle>().is_err());
    }

    #[test]
    fn manual_mode_needs_an_enabled_entry() {
        let c = from_map(&[(
            "data-manual-entries",
            r#"[{"id":"a","label":"A","enabled":false}]"#,
        )]);
        assert!(!c.manual_mode());
    }
}
