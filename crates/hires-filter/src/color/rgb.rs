//! 8-bit RGB color type
//!
//! Colors in the filter are compared byte-exactly: after quantization a
//! pixel is either exactly the palette background or exactly the palette
//! foreground, and the later passes rely on that.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Luminance threshold in thousandths (128.000).
///
/// Weights are scaled by 1000 so the comparison is exact integer math.
const THRESHOLD_MILLI: u32 = 128_000;

/// A color as three 8-bit channels.
///
/// Alpha is not part of the color: the pipeline passes alpha through
/// untouched, so equality between pixels only ever looks at RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    ///
    /// # Example
    /// ```
    /// use hires_filter::Rgb;
    /// let violet = Rgb::from_bytes([168, 85, 247]);
    /// assert_eq!(violet.g, 85);
    /// ```
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Perceived luminance `0.299r + 0.587g + 0.114b` in thousandths.
    ///
    /// Returned as an integer so that threshold comparisons are exact;
    /// `luminance_milli() / 1000` is the familiar 0..=255 scale.
    #[inline]
    pub const fn luminance_milli(self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    /// Whether this color falls on the dark side of the 128 threshold.
    ///
    /// The comparison is strict: a luminance of exactly 128 is light.
    ///
    /// ```
    /// use hires_filter::Rgb;
    /// assert!(Rgb::new(127, 127, 127).is_dark());
    /// assert!(!Rgb::new(128, 128, 128).is_dark());
    /// ```
    #[inline]
    pub const fn is_dark(self) -> bool {
        self.luminance_milli() < THRESHOLD_MILLI
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use hires_filter::Rgb;
    ///
    /// let green: Rgb = "#00ff41".parse().unwrap();
    /// assert_eq!(green, Rgb::new(0, 255, 65));
    ///
    /// let white: Rgb = "#FFF".parse().unwrap();
    /// assert_eq!(white, Rgb::WHITE);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
