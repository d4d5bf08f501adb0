use crate::error::StyleError;
use image::Rgb as RgbPixel;

/// 8-bit RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Opaque black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Opaque white
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand (case-insensitive)
    pub fn from_hex(input: &str) -> Result<Self, StyleError> {
        let invalid = || StyleError::InvalidColorFormat {
            input: input.to_string(),
        };
        let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
        if !digits.is_ascii() {
            return Err(invalid());
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
                match (channel(0), channel(2), channel(4)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
                    _ => Err(invalid()),
                }
            }
            3 => {
                // #abc expands to #aabbcc
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
                match (channel(0), channel(1), channel(2)) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as an array, in r, g, b order
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb> for RgbPixel<u8> {
    fn from(c: Rgb) -> Self {
        RgbPixel([c.r, c.g, c.b])
    }
}

impl From<RgbPixel<u8>> for Rgb {
    fn from(p: RgbPixel<u8>) -> Self {
        Rgb::new(p.0[0], p.0[1], p.0[2])
    }
}
