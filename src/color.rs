//! Canonical color identifiers and the result shape shared by both analyzers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Label used for pure white in every input format.
pub const WHITE: &str = "white";

/// Deduplicated set of canonical color identifiers.
pub type ColorSet = BTreeSet<String>;

/// Number of distinct colors and the colors themselves.
///
/// `count` is always `colors.len()`; it is kept as a field because callers
/// report it separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorReport {
    pub count: usize,
    pub colors: ColorSet,
}

impl ColorReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_set(colors: ColorSet) -> Self {
        Self {
            count: colors.len(),
            colors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.contains(color)
    }
}

static WHITE_FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"rgb\s*\(\s*255\s*,\s*255\s*,\s*255\s*\)",
        r"|rgb\s*\(\s*100%\s*,\s*100%\s*,\s*100%\s*\)",
        r"|rgba\s*\(\s*255\s*,\s*255\s*,\s*255\s*,\s*1(?:\.0*)?\s*\)",
        r"|rgba\s*\(\s*100%\s*,\s*100%\s*,\s*100%\s*,\s*1(?:\.0*)?\s*\)",
        r")"
    ))
    .expect("white color pattern is valid")
});

static RGB_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^rgb\s*\(([^)]+)\)").expect("rgb pattern is valid"));

/// Label for an 8-bit sRGB triple: `"white"` for (255,255,255), uppercase
/// `#RRGGBB` otherwise.
pub fn rgb_label(rgb: [u8; 3]) -> String {
    if rgb == [255, 255, 255] {
        WHITE.to_string()
    } else {
        format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
    }
}

/// Whether an already trimmed and lowercased color value spells white.
fn is_white(color: &str) -> bool {
    matches!(color, "#fff" | "#ffffff" | WHITE) || WHITE_FUNCTIONAL.is_match(color)
}

/// Normalize a raw paint value to its canonical identifier.
///
/// Hex and `rgb()` forms become `#RRGGBB` (or `"white"`). Named colors,
/// `rgba()` with partial alpha and anything unrecognised come back trimmed
/// and lowercased.
pub fn normalize_color(raw: &str) -> String {
    let color = raw.trim().to_lowercase();

    if is_white(&color) {
        return WHITE.to_string();
    }

    if let Some(digits) = color.strip_prefix('#') {
        if digits.chars().count() == 3 {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            return format!("#{}", doubled.to_uppercase());
        }
        return color.to_uppercase();
    }

    if let Some(caps) = RGB_FUNCTION.captures(&color) {
        if let Some(rgb) = parse_rgb_components(&caps[1]) {
            return rgb_label(rgb);
        }
    }

    color
}

/// Parse the inside of `rgb(...)`. Percentages are detected on the first
/// component and scaled by 2.55; every channel is truncated toward zero.
fn parse_rgb_components(inner: &str) -> Option<[u8; 3]> {
    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() < 3 {
        return None;
    }
    let percent = parts[0].contains('%');

    let mut rgb = [0u8; 3];
    for (channel, part) in rgb.iter_mut().zip(&parts[..3]) {
        let value = if percent {
            part.trim().replace('%', "").parse::<f64>().ok()? * 2.55
        } else {
            part.trim().parse::<f64>().ok()?
        };
        *channel = (value.trunc() as i64).clamp(0, 255) as u8;
    }
    Some(rgb)
}
