// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Packed 32-bit colors.  The layout is `0xAARRGGBB`, and everything
//! this crate produces is fully opaque, so the alpha byte is always
//! 0xFF on the way out.  Palettes handed to us by a host may carry
//! other alpha values; we never read them.

use errors::RenderError;

/// A single packed ARGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Pack three channels into an opaque color.
    #[inline]
    pub fn rgb(r: u32, g: u32, b: u32) -> Argb {
        Argb((0xFF << 24) | (r << 16) | (g << 8) | b)
    }

    /// The red channel.
    #[inline]
    pub fn red(self) -> u32 {
        (self.0 >> 16) & 0xFF
    }

    /// The green channel.
    #[inline]
    pub fn green(self) -> u32 {
        (self.0 >> 8) & 0xFF
    }

    /// The blue channel.
    #[inline]
    pub fn blue(self) -> u32 {
        self.0 & 0xFF
    }

    /// Blend toward `other` by `fraction`.  The factor is single
    /// precision and each channel is truncated, not rounded, so a
    /// fraction of zero returns exactly our own channels.
    #[inline]
    pub fn lerp(self, other: Argb, fraction: f32) -> Argb {
        let mix = |a: u32, b: u32| (a as f32 * (1.0 - fraction) + b as f32 * fraction) as u32;
        Argb::rgb(
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(s: &str) -> Result<Argb, RenderError> {
        let digits = s.trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RenderError::BadColor(s.to_string()));
        }
        match u32::from_str_radix(digits, 16) {
            Ok(v) => Ok(Argb(0xFF00_0000 | v)),
            Err(_) => Err(RenderError::BadColor(s.to_string())),
        }
    }

    /// The three color channels as bytes, in image order.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.red() as u8, self.green() as u8, self.blue() as u8]
    }
}

impl From<u32> for Argb {
    fn from(v: u32) -> Argb {
        Argb(v)
    }
}

impl From<Argb> for u32 {
    fn from(c: Argb) -> u32 {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_with_full_alpha() {
        assert_eq!(Argb::rgb(0x12, 0x34, 0x56), Argb(0xFF12_3456));
        assert_eq!(Argb::rgb(0, 0, 0).0 >> 24, 0xFF);
    }

    #[test]
    fn unpacks_channels() {
        let c = Argb(0x80AB_CDEF);
        assert_eq!(c.red(), 0xAB);
        assert_eq!(c.green(), 0xCD);
        assert_eq!(c.blue(), 0xEF);
    }

    #[test]
    fn lerp_at_zero_is_exact() {
        let a = Argb::rgb(201, 13, 77);
        let b = Argb::rgb(0, 255, 128);
        assert_eq!(a.lerp(b, 0.0), a);
    }

    #[test]
    fn lerp_approaches_other_end() {
        let a = Argb::rgb(0, 0, 0);
        let b = Argb::rgb(200, 100, 50);
        let c = a.lerp(b, 0.999_999);
        assert!(c.red() >= 199 && c.green() >= 99 && c.blue() >= 49);
        assert_eq!(a.lerp(b, 0.5), Argb::rgb(100, 50, 25));
    }

    #[test]
    fn lerp_truncates() {
        let a = Argb::rgb(0, 0, 0);
        let b = Argb::rgb(3, 3, 3);
        // 3 * 0.5 = 1.5, which truncates to 1.
        assert_eq!(a.lerp(b, 0.5), Argb::rgb(1, 1, 1));
    }

    #[test]
    fn parses_hex() {
        assert_eq!(Argb::from_hex("#102030").unwrap(), Argb::rgb(0x10, 0x20, 0x30));
        assert_eq!(Argb::from_hex("ffffff").unwrap(), Argb(0xFFFF_FFFF));
        assert!(Argb::from_hex("#12345").is_err());
        assert!(Argb::from_hex("zzzzzz").is_err());
    }
}
