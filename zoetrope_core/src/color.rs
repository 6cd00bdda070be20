// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide accent colors.
//!
//! A [`Tint`] is the single color a slide contributes: it tints the hologram
//! material and doubles as the UI panel accent. Authored as `#rrggbb` hex in
//! slide data.

use core::fmt;

/// An RGB color with `f32` components in `0.0..=1.0`.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Tint {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Tint {
    /// Creates a tint from components. Values are clamped to `0.0..=1.0`.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Parses a `#rrggbb` hex string (leading `#` optional).
    ///
    /// Returns `None` on any malformed input rather than guessing.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let byte = |range: core::ops::Range<usize>| -> Option<f32> {
            u8::from_str_radix(&digits[range], 16)
                .ok()
                .map(|v| f32::from(v) / 255.0)
        };
        Some(Self {
            r: byte(0..2)?,
            g: byte(2..4)?,
            b: byte(4..6)?,
        })
    }

    /// Returns the components as `0..=255` bytes.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "components are clamped to 0.0..=1.0 at construction"
        )]
        let quantize = |v: f32| (v * 255.0 + 0.5) as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

impl fmt::Debug for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "Tint(#{r:02x}{g:02x}{b:02x})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let a = Tint::from_hex("#ff9d0b").unwrap();
        let b = Tint::from_hex("ff9d0b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_rgb8(), [0xff, 0x9d, 0x0b]);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Tint::from_hex("").is_none());
        assert!(Tint::from_hex("#fff").is_none());
        assert!(Tint::from_hex("#gggggg").is_none());
        assert!(Tint::from_hex("#ff9d0bff").is_none());
    }

    #[test]
    fn new_clamps_components() {
        let t = Tint::new(2.0, -1.0, 0.5);
        assert_eq!(t.to_rgb8(), [255, 0, 128]);
    }
}
