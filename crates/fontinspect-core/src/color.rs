#![forbid(unsafe_code)]

//! Computed-color normalization.
//!
//! Browsers report computed colors as `rgb(r, g, b)` or `rgba(r, g, b, a)`.
//! The overlay shows them as `#RRGGBB`. Conversion is total: input that is
//! already hex, or that cannot be read as an `rgb()`/`rgba()` triple, comes
//! back unchanged and the caller renders it verbatim.

use std::borrow::Cow;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `rgb(...)` / `rgba(...)` functional notation.
    ///
    /// Accepts comma- or space-separated channels, percentages, and fractional
    /// values. Alpha is ignored. Returns `None` for any other notation or when
    /// fewer than three channels can be read.
    #[must_use]
    pub fn parse_rgb_function(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let open = trimmed.find('(')?;
        let name = trimmed[..open].trim();
        if !name.eq_ignore_ascii_case("rgb") && !name.eq_ignore_ascii_case("rgba") {
            return None;
        }
        let args = trimmed[open + 1..].strip_suffix(')')?;

        let mut channels = [0u8; 3];
        let mut parts = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        for channel in &mut channels {
            *channel = parse_channel(parts.next()?)?;
        }
        let [r, g, b] = channels;
        Some(Self::new(r, g, b))
    }
}

fn parse_channel(token: &str) -> Option<u8> {
    let value = match token.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0 * 255.0,
        None => token.parse::<f64>().ok()?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

/// Normalize a computed color to `#RRGGBB`.
///
/// - Input starting with `#` is returned byte-for-byte (casing preserved).
/// - `rgb()`/`rgba()` is converted to uppercase hex, alpha dropped.
/// - Everything else (named colors, `hsl()`, empty input) passes through.
#[must_use]
pub fn normalize_hex(input: &str) -> Cow<'_, str> {
    if input.starts_with('#') {
        return Cow::Borrowed(input);
    }
    match Rgb::parse_rgb_function(input) {
        Some(rgb) => Cow::Owned(rgb.to_hex()),
        None => Cow::Borrowed(input),
    }
}

/// Whether `value` is a six-digit hex color (`#` + six hex digits, any case).
#[must_use]
pub fn is_hex6(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_black_and_white() {
        assert_eq!(normalize_hex("rgb(0, 0, 0)"), "#000000");
        assert_eq!(normalize_hex("rgb(255,255,255)"), "#FFFFFF");
    }

    #[test]
    fn output_is_uppercase_and_zero_padded() {
        assert_eq!(normalize_hex("rgb(10, 171, 5)"), "#0AAB05");
    }

    #[test]
    fn rgba_ignores_alpha() {
        assert_eq!(normalize_hex("rgba(59, 130, 246, 0.5)"), "#3B82F6");
        assert_eq!(normalize_hex("rgba(0, 0, 0, 0)"), "#000000");
    }

    #[test]
    fn space_separated_syntax() {
        assert_eq!(normalize_hex("rgb(239 68 68 / 50%)"), "#EF4444");
    }

    #[test]
    fn channels_are_clamped_and_rounded() {
        assert_eq!(normalize_hex("rgb(300, -4, 127.6)"), "#FF0080");
        assert_eq!(normalize_hex("rgb(100%, 0%, 50%)"), "#FF0080");
    }

    #[test]
    fn hex_passes_through_unchanged() {
        assert_eq!(normalize_hex("#abc123"), "#abc123");
        assert_eq!(normalize_hex("#FFF"), "#FFF");
        assert!(matches!(normalize_hex("#abc123"), Cow::Borrowed(_)));
    }

    #[test]
    fn unparseable_passes_through_unchanged() {
        assert_eq!(normalize_hex("hsl(0,0%,0%)"), "hsl(0,0%,0%)");
        assert_eq!(normalize_hex("rgb(1, 2)"), "rgb(1, 2)");
        assert_eq!(normalize_hex("rgb(a, b, c)"), "rgb(a, b, c)");
        assert_eq!(normalize_hex("currentcolor"), "currentcolor");
        assert_eq!(normalize_hex(""), "");
    }

    #[test]
    fn hex6_detection() {
        assert!(is_hex6("#000000"));
        assert!(is_hex6("#abc123"));
        assert!(!is_hex6("#FFF"));
        assert!(!is_hex6("#GGGGGG"));
        assert!(!is_hex6("hsl(0,0%,0%)"));
    }
}
