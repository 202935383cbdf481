//! Structural color extraction for SVG documents.
//!
//! Paint colors come from `fill`/`stroke` attributes and inline `style`
//! declarations of visible elements; gradient colors come from the `stop`
//! elements of `linearGradient`/`radialGradient` definitions. Paint values
//! that reference a gradient (`url(#id)`) are skipped, since the gradient's
//! own stops are collected separately.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

use crate::color::{ColorReport, ColorSet, normalize_color};

const PAINT_PROPERTIES: [&str; 2] = ["fill", "stroke"];

/// Collect every distinct paint and gradient-stop color in `doc`.
pub fn extract_vector_colors(doc: &Document) -> ColorReport {
    let mut colors = ColorSet::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        if is_visible(&node) {
            collect_paint(&node, &mut colors);
        }
    }
    let paint_colors = colors.len();

    for gradient in doc
        .descendants()
        .filter(|n| matches!(n.tag_name().name(), "linearGradient" | "radialGradient"))
    {
        for stop in gradient.descendants().filter(|n| n.tag_name().name() == "stop") {
            collect_stop(&stop, &mut colors);
        }
    }

    debug!(paint_colors, total = colors.len(), "extracted vector colors");
    ColorReport::from_set(colors)
}

/// Parse SVG text and extract its colors.
///
/// DTDs are accepted: editor exports usually carry an SVG 1.1 `DOCTYPE`.
pub fn extract_vector_colors_from_str(svg: &str) -> crate::Result<ColorReport> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(svg, options)?;
    Ok(extract_vector_colors(&doc))
}

/// Per-element visibility. Ancestors are not consulted, so a visible child
/// of a hidden group still contributes its colors.
fn is_visible(node: &Node) -> bool {
    if let Some(style) = node.attribute("style") {
        if style.contains("display:none")
            || style.contains("visibility:hidden")
            || style.contains("opacity:0")
        {
            return false;
        }
    }
    !(node.attribute("display") == Some("none")
        || node.attribute("visibility") == Some("hidden")
        || node.attribute("opacity") == Some("0"))
}

fn collect_paint(node: &Node, colors: &mut ColorSet) {
    for property in PAINT_PROPERTIES {
        if let Some(value) = node.attribute(property) {
            insert_paint(value, colors);
        }
    }

    let Some(style) = node.attribute("style") else {
        return;
    };
    for (property, value) in declarations(style) {
        if PAINT_PROPERTIES.contains(&property.to_lowercase().as_str()) {
            insert_paint(value, colors);
        }
    }
}

/// Add a paint value unless it is blank, `none`, `transparent` or a
/// `url(...)` reference.
fn insert_paint(value: &str, colors: &mut ColorSet) {
    let value = value.trim();
    if value.is_empty()
        || value.eq_ignore_ascii_case("none")
        || value.eq_ignore_ascii_case("transparent")
        || value.starts_with("url(")
    {
        return;
    }
    colors.insert(normalize_color(value));
}

fn collect_stop(stop: &Node, colors: &mut ColorSet) {
    if let Some(value) = stop.attribute("stop-color") {
        if !value.trim().is_empty() {
            colors.insert(normalize_color(value));
        }
    }

    let Some(style) = stop.attribute("style") else {
        return;
    };
    for part in style.split(';') {
        if let Some(value) = part.trim().strip_prefix("stop-color:") {
            let value = value.trim();
            if !value.is_empty() {
                colors.insert(normalize_color(value));
            }
        }
    }
}

/// `prop:value` pairs of an inline style, both sides trimmed. Declarations
/// without a colon are skipped; the value keeps any further colons.
fn declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style
        .split(';')
        .filter_map(|part| part.split_once(':'))
        .map(|(property, value)| (property.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors_of(svg: &str) -> ColorReport {
        extract_vector_colors_from_str(svg).unwrap()
    }

    #[test]
    fn test_short_hex_fill() {
        let report = colors_of(r##"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="#ABC"/></svg>"##);
        assert_eq!(report.count, 1);
        assert!(report.contains("#AABBCC"));
    }

    #[test]
    fn test_percent_white_fill() {
        let report = colors_of(r#"<svg><circle fill="rgb(100%,100%,100%)"/></svg>"#);
        assert!(report.contains("white"));
        assert_eq!(report.count, 1);
    }

    #[test]
    fn test_none_fill_with_stroke() {
        let report = colors_of(r##"<svg><path fill="none" stroke="#FF0000"/></svg>"##);
        assert_eq!(report.colors.iter().collect::<Vec<_>>(), ["#FF0000"]);
    }

    #[test]
    fn test_gradient_reference_uses_stop_colors() {
        let report = colors_of(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <defs>
                  <linearGradient id="grad1"><stop offset="0" stop-color="#112233"/></linearGradient>
                </defs>
                <rect fill="url(#grad1)"/>
              </svg>"##,
        );
        assert_eq!(report.count, 1);
        assert!(report.contains("#112233"));
        assert!(report.colors.iter().all(|c| !c.contains("url")));
    }

    #[test]
    fn test_stop_style_declaration() {
        let report = colors_of(
            r#"<svg><radialGradient id="g">
                 <stop style="stop-opacity:0.5; stop-color: rgb(0,0,255)"/>
                 <stop offset="1" style="stop-color:red;offset:1"/>
               </radialGradient></svg>"#,
        );
        assert!(report.contains("#0000FF"));
        assert!(report.contains("red"));
        assert_eq!(report.count, 2);
    }

    #[test]
    fn test_style_paint_declarations() {
        let report = colors_of(
            r##"<svg><rect style="FILL: #123456; stroke:none; stroke-width:2"/>
                <rect style="stroke:url(#g);fill:transparent"/>
                <rect style="fill: rgba(0,0,0,0.5)"/></svg>"##,
        );
        assert_eq!(report.count, 2);
        assert!(report.contains("#123456"));
        assert!(report.contains("rgba(0,0,0,0.5)"));
    }

    #[test]
    fn test_hidden_elements_are_skipped() {
        let report = colors_of(
            r##"<svg>
                <rect fill="#010101" style="display:none"/>
                <rect fill="#020202" visibility="hidden"/>
                <rect fill="#030303" opacity="0"/>
                <rect fill="#040404" display="none"/>
                <rect style="fill:#050505;opacity:0"/>
              </svg>"##,
        );
        assert_eq!(report, ColorReport::empty());
    }

    #[test]
    fn test_hidden_ancestor_does_not_hide_children() {
        let report = colors_of(r##"<svg><g display="none" fill="#111111"><rect fill="#222222"/></g></svg>"##);
        assert_eq!(report.count, 1);
        assert!(report.contains("#222222"));
    }

    #[test]
    fn test_opacity_half_is_visible() {
        let report = colors_of(r##"<svg><rect fill="#333333" opacity="0.5"/></svg>"##);
        assert!(report.contains("#333333"));
    }

    #[test]
    fn test_duplicates_across_forms_collapse() {
        let report = colors_of(
            r##"<svg><rect fill="#fff"/><rect stroke="white"/><rect fill="#ff0000"/>
                <rect style="stroke:rgb(255,0,0)"/></svg>"##,
        );
        assert_eq!(report.count, 2);
        assert!(report.contains("white"));
        assert!(report.contains("#FF0000"));
    }

    #[test]
    fn test_colorless_document_is_empty() {
        let report = colors_of(r#"<svg><g><rect width="10" height="10"/></g></svg>"#);
        assert_eq!(report.count, 0);
    }

    #[test]
    fn test_doctype_header_is_accepted() {
        let report = colors_of(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"><rect fill="#ABC"/></svg>"##,
        );
        assert_eq!(report.count, 1);
        assert!(report.contains("#AABBCC"));
    }

    #[test]
    fn test_white_spelled_as_float_rgb_collapses() {
        let report = colors_of(r#"<svg><rect fill="white"/><rect fill="rgb(255.0,255,255)"/></svg>"#);
        assert_eq!(report.colors.iter().collect::<Vec<_>>(), ["white"]);
    }

    #[test]
    fn test_malformed_markup_is_error() {
        assert!(extract_vector_colors_from_str("<svg><rect></svg>").is_err());
    }
}
