//! Generated widget markup: the nested link list and the SVG path overlay.

use std::collections::HashSet;
use std::fmt::Write;

use crate::dom::css::format_length;
use crate::dom::serialize::escape_html;
use crate::nav::config::NavConfig;
use crate::nav::hierarchy::{EntryId, NavTree};
use crate::nav::sync::Highlight;
use crate::render::path::RenderedPath;

pub const EMPTY_MESSAGE: &str = "No headings found on this page.";
pub const VISIBLE_CLASS: &str = "scrollpath-nav__item--visible";

/// Placeholder rendered when nothing was collected.
pub fn empty_markup() -> String {
    format!("<p class=\"scrollpath-nav__empty\">{}</p>", EMPTY_MESSAGE)
}

fn write_list(
    out: &mut String,
    tree: &NavTree,
    items: &[EntryId],
    visible: &HashSet<EntryId>,
    config: &NavConfig,
) {
    out.push_str("<ul class=\"scrollpath-nav__list\">");
    for &id in items {
        let entry = tree.entry(id);
        let class = if visible.contains(&id) {
            format!("scrollpath-nav__item {VISIBLE_CLASS}")
        } else {
            "scrollpath-nav__item".to_string()
        };
        let indent = if entry.depth > 0 {
            format!(" style=\"padding-left: {}px\"", format_length(config.child_indent))
        } else {
            String::new()
        };
        let _ = write!(
            out,
            "<li class=\"{class}\" data-level=\"{}\" data-target=\"{}\"{indent}>\
             <a class=\"scrollpath-nav__link\" href=\"#{}\">{}</a>",
            entry.level,
            escape_html(&entry.target_id),
            escape_html(&entry.target_id),
            escape_html(&entry.label),
        );
        if !entry.children.is_empty() {
            write_list(out, tree, &entry.children, visible, config);
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

/// SVG overlay with the current highlight applied.
pub fn svg_markup(path: &RenderedPath, highlight: &Highlight, config: &NavConfig) -> String {
    let mut style = format!("opacity: {}", format_length(highlight.opacity));
    if let Some(dasharray) = &highlight.dasharray {
        let _ = write!(style, "; stroke-dasharray: {dasharray}");
    }
    if let Some(offset) = highlight.dashoffset {
        let _ = write!(style, "; stroke-dashoffset: {}", format_length(offset));
    }

    format!(
        "<svg class=\"scrollpath-nav__svg\" xmlns=\"http://www.w3.org/2000/svg\" \
         width=\"{w}\" height=\"{h}\" aria-hidden=\"true\">\
         <path class=\"scrollpath-nav__path\" d=\"{d}\" fill=\"none\" stroke=\"{color}\" \
         stroke-width=\"{width}\" stroke-opacity=\"{opacity}\" stroke-linecap=\"round\" \
         stroke-linejoin=\"round\" style=\"{style}\"/></svg>",
        w = format_length(path.width + config.path_width),
        h = format_length(path.height),
        d = path.d,
        color = escape_html(&config.path_color),
        width = format_length(config.path_width),
        opacity = format_length(config.path_opacity / 100.0),
    )
}

/// Full inner markup of a mounted widget.
pub fn nav_markup(
    tree: &NavTree,
    visible: &HashSet<EntryId>,
    path: &RenderedPath,
    highlight: &Highlight,
    config: &NavConfig,
) -> String {
    let mut out = String::new();
    write_list(&mut out, tree, &tree.roots, visible, config);
    out.push_str(&svg_markup(path, highlight, config));
    out
}
