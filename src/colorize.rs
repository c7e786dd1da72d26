// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns an escape result into a color.
//!
//! Interior points always get the last palette entry.  Escaped points
//! either index the palette directly by iteration count ("banded"), or
//! get a continuous iteration count
//!
//! ```text
//! mu = n + 1 - log2(log2(|z|^2) / 2) / log2(2)
//! ```
//!
//! and blend the two palette entries either side of it.  Both
//! logarithms can come from the `LogTables` instead of `log2`.

use color::Argb;
use escape::Escape;
use params::{Palette, RenderParams};
use tables::LogTables;

/// `((i + offset) % n + n) % n`.  Rust's `%` keeps the sign of the
/// dividend, so a negative offset needs the second pass to land in
/// `[0, n)`.  The offset is reduced mod `n` first so that any `i64`
/// offset is safe; `i` is at most `n + 1` here.
#[inline]
pub fn wrap_index(i: i64, offset: i64, n: i64) -> usize {
    let offset = offset % n;
    (((i + offset) % n + n) % n) as usize
}

/// The smooth-coloring correction term `nu` for a final `|z|^2`.
#[inline]
pub fn smoothing_term(mag_sq: f64, params: &RenderParams, tables: &LogTables) -> f64 {
    if params.use_log2_lookup {
        let log_zn = tables.log2_magnitude(mag_sq, params.log_magnitude_scale_factor) / 2.0;
        tables.log2_log(log_zn, params.log_log_scale_factor) / params.log2_2
    } else {
        let log_zn = mag_sq.log2() / 2.0;
        log_zn.log2() / params.log2_2
    }
}

/// The continuous iteration count for an escaped orbit, never below zero.
#[inline]
pub fn continuous_index(escape: &Escape, params: &RenderParams, tables: &LogTables) -> f64 {
    let nu = smoothing_term(escape.z.norm_sqr(), params, tables);
    f64::max(0.0, (escape.iterations + 1) as f64 - nu)
}

/// Pick the color for one pixel.
#[inline]
pub fn resolve_color(
    escape: &Escape,
    params: &RenderParams,
    palette: &Palette,
    tables: &LogTables,
) -> Argb {
    let max = params.max_iterations;
    if escape.is_interior(max) {
        return palette[max];
    }

    let n = max as i64;
    if !params.smooth_colors {
        return palette[wrap_index(escape.iterations as i64, params.color_offset, n)];
    }

    let mu = continuous_index(escape, params, tables);
    let index1 = mu as i64;
    let index2 = index1 + 1;
    let color1 = palette[wrap_index(index1, params.color_offset, n)];
    let color2 = palette[wrap_index(index2, params.color_offset, n)];
    let fraction = (mu - mu.floor()) as f32;
    color1.lerp(color2, fraction)
}
