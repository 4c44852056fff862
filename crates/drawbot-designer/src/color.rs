//! CSS colour parsing for shape commands.

use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS colour string.
    ///
    /// Supported formats:
    /// - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
    /// - `rgb(r, g, b)` and `rgba(r, g, b, a)` with `a` in `0..=1`
    /// - the common named colours (case-insensitive)
    ///
    /// Returns `None` for anything else; the renderer falls back to its
    /// default colour.
    pub fn from_css(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_functional(args);
        }

        Self::named(&lower)
    }

    /// Return the colour as an `[r, g, b, a]` byte array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" | "aqua" => Self::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Self::rgb(255, 0, 255),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "pink" => Self::rgb(255, 192, 203),
            "brown" => Self::rgb(165, 42, 42),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "darkgray" | "darkgrey" => Self::rgb(169, 169, 169),
            "silver" => Self::rgb(192, 192, 192),
            "navy" => Self::rgb(0, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            "olive" => Self::rgb(128, 128, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "gold" => Self::rgb(255, 215, 0),
            "skyblue" => Self::rgb(135, 206, 235),
            "lightblue" => Self::rgb(173, 216, 230),
            "darkblue" => Self::rgb(0, 0, 139),
            "lightgreen" => Self::rgb(144, 238, 144),
            "darkgreen" => Self::rgb(0, 100, 0),
            "forestgreen" => Self::rgb(34, 139, 34),
            "saddlebrown" => Self::rgb(139, 69, 19),
            "beige" => Self::rgb(245, 245, 220),
            "violet" => Self::rgb(238, 130, 238),
            "indigo" => Self::rgb(75, 0, 130),
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_functional(args: &str) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |s: &str| -> Option<u8> {
            let v: f64 = s.parse().ok()?;
            Some(v.round().clamp(0.0, 255.0) as u8)
        };

        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let alpha: f64 = a.parse().ok()?;
                let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                Some(Self::new(channel(r)?, channel(g)?, channel(b)?, alpha))
            }
            _ => None,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Rgba::from_css("red"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::from_css(" Yellow "), Some(Rgba::rgb(255, 255, 0)));
        assert_eq!(Rgba::from_css("grey"), Rgba::from_css("gray"));
        assert_eq!(Rgba::from_css("not-a-color"), None);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Rgba::from_css("#f00"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::from_css("#00ff0080"), Some(Rgba::new(0, 255, 0, 128)));
        assert_eq!(Rgba::from_css("#12345"), None);
        assert_eq!(Rgba::from_css("#zzz"), None);
    }

    #[test]
    fn test_functional_colors() {
        assert_eq!(Rgba::from_css("rgb(10, 20, 30)"), Some(Rgba::rgb(10, 20, 30)));
        assert_eq!(
            Rgba::from_css("rgba(255,0,0,0.5)"),
            Some(Rgba::new(255, 0, 0, 128))
        );
        assert_eq!(Rgba::from_css("rgb(1,2)"), None);
    }
}
