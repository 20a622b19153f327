//! sRGB color representation, gamma transfer functions, and hex parsing.

use core::fmt;

use crate::error::SwatchError;

/// sRGB gamma correction transfer functions.
pub mod gamma {
    /// Converts a gamma-corrected sRGB channel in `[0, 1]` to linear light.
    #[inline]
    #[must_use]
    pub fn srgb_to_linear(channel: f64) -> f64 {
        if channel <= 0.04045 {
            channel / 12.92
        } else {
            ((channel + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Converts a linear-light channel in `[0, 1]` to gamma-corrected sRGB.
    #[inline]
    #[must_use]
    pub fn linear_to_srgb(channel: f64) -> f64 {
        if channel <= 0.0031308 {
            channel * 12.92
        } else {
            1.055 * channel.powf(1.0 / 2.4) - 0.055
        }
    }
}

/// An sRGB color, cached in both gamma-corrected and linear-light form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Gamma-corrected sRGB channels in `[0, 1]`.
    pub srgb: [f64; 3],
    /// Linear-light channels in `[0, 1]`, gamma-expanded from `srgb`.
    pub linear: [f64; 3],
    /// Alpha in `[0, 1]`. Not used by any color-space math; carried for
    /// callers that need it alongside a `Color`.
    pub alpha: f64,
}

impl Color {
    /// Builds a color from 8-bit sRGB channels, fully opaque.
    #[must_use]
    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_srgb(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
    }

    /// Builds a color from sRGB channels in `[0, 1]`, fully opaque.
    #[must_use]
    pub fn from_srgb(r: f64, g: f64, b: f64) -> Self {
        let linear = [
            gamma::srgb_to_linear(r),
            gamma::srgb_to_linear(g),
            gamma::srgb_to_linear(b),
        ];
        Self {
            srgb: [r, g, b],
            linear,
            alpha: 1.0,
        }
    }

    /// Returns the 8-bit sRGB channels, rounding to nearest.
    #[must_use]
    pub fn to_srgb8(&self) -> [u8; 3] {
        [
            (self.srgb[0] * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.srgb[1] * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.srgb[2] * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Parses a `#RRGGBB` (leading `#` optional, case-insensitive) hex string.
    pub fn from_hex(hex: &str) -> Result<Self, SwatchError> {
        let stripped = hex.strip_prefix('#').unwrap_or(hex);
        if stripped.len() != 6 {
            return Err(SwatchError::InvalidHex {
                hex: hex.to_string(),
                reason: format!("expected 6 hex digits, got {}", stripped.len()),
            });
        }
        let channel = |s: &str| -> Result<u8, SwatchError> {
            u8::from_str_radix(s, 16).map_err(|_| SwatchError::InvalidHex {
                hex: hex.to_string(),
                reason: format!("'{s}' is not a valid hex byte"),
            })
        };
        let r = channel(&stripped[0..2])?;
        let g = channel(&stripped[2..4])?;
        let b = channel(&stripped[4..6])?;
        Ok(Self::from_srgb8(r, g, b))
    }

    /// Renders as `#RRGGBB`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_srgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_srgb8();
        write!(f, "rgb({r}, {g}, {b})")
    }
}
