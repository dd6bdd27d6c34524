use std::fmt;

/// A decoded paint colour.
///
/// Packed colours put red in bits 31..24, green in 23..16, blue in 15..8 and alpha in the low
/// byte 7..0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    /// Zero / absent colour.
    Transparent,
    /// Alpha byte `0xFF`.
    Rgb { r: u8, g: u8, b: u8 },
    /// Any other alpha byte.
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Paint {
    /// Alpha as a `0..=1` fraction.
    pub fn alpha(self) -> f64 {
        match self {
            Paint::Transparent => 0.0,
            Paint::Rgb { .. } => 1.0,
            Paint::Rgba { a, .. } => f64::from(a) / 255.0,
        }
    }

    /// Straight (non-premultiplied) RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        match self {
            Paint::Transparent => [0, 0, 0, 0],
            Paint::Rgb { r, g, b } => [r, g, b, 0xFF],
            Paint::Rgba { r, g, b, a } => [r, g, b, a],
        }
    }
}

/// Decode a packed colour.
pub fn decode_color(color: u32) -> Paint {
    if color == 0 {
        return Paint::Transparent;
    }
    let [r, g, b, a] = color.to_be_bytes();
    if a == 0xFF {
        Paint::Rgb { r, g, b }
    } else {
        Paint::Rgba { r, g, b, a }
    }
}

/// CSS form: `transparent`, `#rrggbb` or `rgba(r,g,b,alpha)`.
impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Paint::Transparent => f.write_str("transparent"),
            Paint::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Paint::Rgba { r, g, b, .. } => write!(f, "rgba({r},{g},{b},{})", self.alpha()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/color.rs"]
mod tests;
