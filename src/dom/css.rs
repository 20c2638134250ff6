//! Lightweight CSS value handling.
//!
//! Validates the path color and parses the small set of numeric values the
//! nav configuration carries as attribute strings.

/// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) into [r, g, b, a] (0.0–1.0).
pub fn parse_hex_color(val: &str) -> Option<[f32; 4]> {
    let v = val.trim().to_lowercase();
    let hex = v.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
        }
        8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = channel(&hex[6..8])?;
            Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0])
        }
        _ => None,
    }
}

/// Lowercased `#rrggbb`-style color if `val` is a valid hex color.
pub fn normalize_hex_color(val: &str) -> Option<String> {
    parse_hex_color(val).map(|_| val.trim().to_lowercase())
}

/// Parse a CSS size value (px or plain number).
pub fn parse_css_size(val: &str) -> Option<f32> {
    let v = val.trim().to_lowercase();
    let num_str = v.trim_end_matches("px").trim_end_matches('%').trim();
    num_str.parse::<f32>().ok().filter(|n| n.is_finite())
}

/// Format a length for SVG/CSS output: integers without a fraction,
/// everything else to two decimals.
pub fn format_length(v: f32) -> String {
    if (v - v.round()).abs() < 0.005 {
        format!("{}", v.round() as i64)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').to_string()
    }
}
