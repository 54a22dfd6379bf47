//! Canvas background color and its textual forms.
//!
//! Parses hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, leading `#` optional)
//! and the CSS basic named colors.

use core::str::FromStr;

use crate::settings::ParseError;

/// Background fill for the composite.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanvasColor {
    /// Transparent black `[0, 0, 0, 0]`.
    #[default]
    Transparent,
    /// sRGB color with straight alpha, 8 bits per channel.
    Srgb { r: u8, g: u8, b: u8, a: u8 },
}

impl CanvasColor {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Srgb { r, g, b, a: 255 }
    }

    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// `[r, g, b, a]` bytes as stored in a [`Raster`](crate::Raster).
    pub const fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::Transparent => [0, 0, 0, 0],
            Self::Srgb { r, g, b, a } => [r, g, b, a],
        }
    }
}

impl From<[u8; 4]> for CanvasColor {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::Srgb { r, g, b, a }
    }
}

impl FromStr for CanvasColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| ParseError::new("color", s))
    }
}

pub(crate) fn parse_color(s: &str) -> Option<CanvasColor> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    parse_hex(hex).or_else(|| lookup_named(s))
}

fn parse_hex(hex: &str) -> Option<CanvasColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let b = hex.as_bytes();
    match b.len() {
        3 | 4 => {
            let r = nibble(b[0])? * 0x11;
            let g = nibble(b[1])? * 0x11;
            let bl = nibble(b[2])? * 0x11;
            let a = match b.get(3) {
                Some(&ch) => nibble(ch)? * 0x11,
                None => 255,
            };
            Some(CanvasColor::Srgb { r, g, b: bl, a })
        }
        6 | 8 => {
            let r = byte(b[0], b[1])?;
            let g = byte(b[2], b[3])?;
            let bl = byte(b[4], b[5])?;
            let a = if b.len() == 8 { byte(b[6], b[7])? } else { 255 };
            Some(CanvasColor::Srgb { r, g, b: bl, a })
        }
        _ => None,
    }
}

fn nibble(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn byte(hi: u8, lo: u8) -> Option<u8> {
    Some(nibble(hi)? << 4 | nibble(lo)?)
}

fn lookup_named(name: &str) -> Option<CanvasColor> {
    if name.eq_ignore_ascii_case("transparent") {
        return Some(CanvasColor::Transparent);
    }
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, [r, g, b])| CanvasColor::rgb(r, g, b))
}

/// CSS basic color keywords plus the `grey` spelling.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aqua", [0, 255, 255]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("lime", [0, 255, 0]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("silver", [192, 192, 192]),
    ("teal", [0, 128, 128]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_hex_with_hash() {
        assert_eq!("#ffffff".parse(), Ok(CanvasColor::white()));
        assert_eq!("#1a2B3c".parse(), Ok(CanvasColor::rgb(0x1a, 0x2b, 0x3c)));
    }

    #[test]
    fn short_hex_expands_nibbles() {
        assert_eq!("f80".parse(), Ok(CanvasColor::rgb(0xff, 0x88, 0x00)));
        assert_eq!(
            "#f808".parse(),
            Ok(CanvasColor::Srgb {
                r: 0xff,
                g: 0x88,
                b: 0x00,
                a: 0x88
            })
        );
    }

    #[test]
    fn eight_digit_hex_carries_alpha() {
        assert_eq!(
            "00000080".parse::<CanvasColor>().map(CanvasColor::to_rgba),
            Ok([0, 0, 0, 0x80])
        );
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!("White".parse(), Ok(CanvasColor::white()));
        assert_eq!("NAVY".parse(), Ok(CanvasColor::rgb(0, 0, 128)));
        assert_eq!("transparent".parse(), Ok(CanvasColor::Transparent));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!("#12345".parse::<CanvasColor>().is_err());
        assert!("#ggg".parse::<CanvasColor>().is_err());
        assert!("".parse::<CanvasColor>().is_err());
        assert!("rebeccapurple".parse::<CanvasColor>().is_err());
    }

    #[test]
    fn transparent_is_all_zero() {
        assert_eq!(CanvasColor::Transparent.to_rgba(), [0, 0, 0, 0]);
        assert_eq!(CanvasColor::default(), CanvasColor::Transparent);
    }
}
