// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The unit of work: a rectangle of pixels, colored in place.

use colorize::resolve_color;
use escape::iterate;
use params::{Palette, RenderParams};
use planes::{AffineTransform, Pixel};
use tables::LogTables;

/// Where a block sits in the full image, and how big it is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    /// Column of the block's left edge in the full image.
    pub x: usize,
    /// Row of the block's top edge in the full image.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Block {
    /// Pixels in the block.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// A block with no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Color every pixel of `block` into `output`, row-major.  Pixels
/// flagged in `skip` keep whatever `output` already held.  Returns how
/// many pixels were computed.
///
/// `output` and `skip`, when present, must both hold exactly
/// `block.len()` entries, and `palette` exactly
/// `params.max_iterations + 1`.  None of that is checked here.
pub fn render_block(
    block: &Block,
    transform: &AffineTransform,
    params: &RenderParams,
    palette: &Palette,
    tables: &LogTables,
    skip: Option<&[bool]>,
    output: &mut [u32],
) -> usize {
    debug_assert_eq!(output.len(), block.len());
    debug_assert!(skip.map_or(true, |s| s.len() == block.len()));

    let mut computed = 0;
    for row in 0..block.height {
        for column in 0..block.width {
            let index = row * block.width + column;
            if skip.map_or(false, |s| s[index]) {
                continue;
            }
            let c = transform.pixel_to_point(&Pixel(block.x + column, block.y + row));
            let escape = iterate(c, params.max_iterations, params.escape_radius_squared);
            output[index] = resolve_color(&escape, params, palette, tables).0;
            computed += 1;
        }
    }
    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::Argb;
    use num::Complex;

    fn gray(max: usize) -> Palette {
        Palette::ramp(
            max,
            Argb::rgb(0, 0, 0),
            Argb::rgb(255, 255, 255),
            Argb::rgb(255, 0, 0),
        )
        .unwrap()
    }

    fn plane() -> AffineTransform {
        AffineTransform::from_corners(16, 12, Complex::new(-2.5, -1.25), Complex::new(1.0, 1.25))
            .unwrap()
    }

    #[test]
    fn whole_block_is_written() {
        let tables = LogTables::new();
        let params = RenderParams::new(30).smooth_colors(true);
        let block = Block {
            x: 0,
            y: 0,
            width: 16,
            height: 12,
        };
        let mut out = vec![0u32; block.len()];
        let n = render_block(&block, &plane(), &params, &gray(30), &tables, None, &mut out);
        assert_eq!(n, 16 * 12);
        assert!(out.iter().all(|&c| c >> 24 == 0xFF));
    }

    #[test]
    fn constant_interior_fills_with_interior_color() {
        let tables = LogTables::new();
        let params = RenderParams::new(50);
        let palette = gray(50);
        let block = Block {
            x: 3,
            y: 9,
            width: 4,
            height: 3,
        };
        let mut out = vec![0u32; block.len()];
        let t = AffineTransform::constant(Complex::new(0.0, 0.0));
        render_block(&block, &t, &params, &palette, &tables, None, &mut out);
        assert!(out.iter().all(|&c| c == palette[50].0));
    }

    #[test]
    fn skip_mask_leaves_pixels_alone() {
        let tables = LogTables::new();
        let params = RenderParams::new(20);
        let block = Block {
            x: 0,
            y: 0,
            width: 4,
            height: 2,
        };
        let skip = [true, false, false, true, false, true, true, false];
        let mut out = vec![0xDEAD_BEEF_u32; block.len()];
        let n = render_block(
            &block,
            &AffineTransform::constant(Complex::new(0.0, 0.0)),
            &params,
            &gray(20),
            &tables,
            Some(&skip[..]),
            &mut out,
        );
        assert_eq!(n, 4);
        for (i, &s) in skip.iter().enumerate() {
            if s {
                assert_eq!(out[i], 0xDEAD_BEEF);
            } else {
                assert_ne!(out[i], 0xDEAD_BEEF);
            }
        }
    }

    #[test]
    fn block_uses_absolute_coordinates() {
        let tables = LogTables::new();
        let params = RenderParams::new(40).smooth_colors(true).use_log2_lookup(true);
        let palette = gray(40);
        let t = plane();

        let whole = Block {
            x: 0,
            y: 0,
            width: 16,
            height: 12,
        };
        let mut full = vec![0u32; whole.len()];
        render_block(&whole, &t, &params, &palette, &tables, None, &mut full);

        let part = Block {
            x: 5,
            y: 7,
            width: 6,
            height: 3,
        };
        let mut piece = vec![0u32; part.len()];
        render_block(&part, &t, &params, &palette, &tables, None, &mut piece);

        for row in 0..part.height {
            for column in 0..part.width {
                assert_eq!(
                    piece[row * part.width + column],
                    full[(part.y + row) * whole.width + part.x + column]
                );
            }
        }
    }

    #[test]
    fn escaping_point_gets_banded_color() {
        let tables = LogTables::new();
        let params = RenderParams::new(50);
        let palette = gray(50);
        let block = Block {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };
        let mut out = [0u32];
        let t = AffineTransform::constant(Complex::new(2.5, 0.0));
        render_block(&block, &t, &params, &palette, &tables, None, &mut out);
        assert_eq!(out[0], palette[1].0);
    }
}
