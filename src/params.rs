// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs a host turns for each render, and the palette it hands us.

use color::Argb;
use errors::RenderError;
use tables::{LOG_LOG_SCALE_FACTOR, MAGNITUDE_SCALE_FACTOR};

/// Per-render settings.  Nothing in here is validated by the engine;
/// `validate` exists for hosts that want to check before rendering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// Iteration cap.  Also the palette index of the interior color.
    pub max_iterations: usize,
    /// `|z|^2` above this counts as escaped.
    pub escape_radius_squared: f64,
    /// Cyclic shift applied to palette indexing.  May be negative.
    pub color_offset: i64,
    /// Continuous coloring instead of flat bands.
    pub smooth_colors: bool,
    /// Use the quantized log tables instead of calling `log2`.
    pub use_log2_lookup: bool,
    /// Maps `|z|^2 - 4` onto a magnitude table index.
    pub log_magnitude_scale_factor: f64,
    /// Maps `logZn - 1` onto a log-log table index.
    pub log_log_scale_factor: f64,
    /// `log2(2.0)`, kept as a parameter rather than recomputed.
    pub log2_2: f64,
}

impl RenderParams {
    /// Defaults: radius squared of four, no offset, flat coloring,
    /// exact logarithms, and scale factors matching `LogTables`.
    pub fn new(max_iterations: usize) -> RenderParams {
        RenderParams {
            max_iterations,
            escape_radius_squared: 4.0,
            color_offset: 0,
            smooth_colors: false,
            use_log2_lookup: false,
            log_magnitude_scale_factor: MAGNITUDE_SCALE_FACTOR,
            log_log_scale_factor: LOG_LOG_SCALE_FACTOR,
            log2_2: 2.0_f64.log2(),
        }
    }

    /// Set the escape threshold.
    pub fn escape_radius_squared(mut self, r: f64) -> Self {
        self.escape_radius_squared = r;
        self
    }

    /// Set the palette shift.
    pub fn color_offset(mut self, offset: i64) -> Self {
        self.color_offset = offset;
        self
    }

    /// Turn smooth coloring on or off.
    pub fn smooth_colors(mut self, on: bool) -> Self {
        self.smooth_colors = on;
        self
    }

    /// Choose the lookup tables over exact logarithms.
    pub fn use_log2_lookup(mut self, on: bool) -> Self {
        self.use_log2_lookup = on;
        self
    }

    /// Check the invariants the engine assumes, against the palette it
    /// will be given.
    pub fn validate(&self, palette: &Palette) -> Result<(), RenderError> {
        if self.max_iterations < 1 {
            return Err(RenderError::NoIterations);
        }
        if !(self.escape_radius_squared > 0.0) {
            return Err(RenderError::BadEscapeRadius(self.escape_radius_squared));
        }
        if palette.len() != self.max_iterations + 1 {
            return Err(RenderError::PaletteMismatch {
                expected: self.max_iterations + 1,
                actual: palette.len(),
            });
        }
        Ok(())
    }
}

/// `max_iterations + 1` colors.  The last one is the interior.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Argb>,
}

impl Palette {
    /// Wrap a host-supplied list of colors.
    pub fn new(colors: Vec<Argb>) -> Result<Palette, RenderError> {
        if colors.len() < 2 {
            return Err(RenderError::PaletteTooShort(colors.len()));
        }
        Ok(Palette { colors })
    }

    /// A plain linear ramp from `from` to `to` across the exterior
    /// entries, with `interior` at the end.  Good enough for a demo;
    /// real palettes come from the host.
    pub fn ramp(
        max_iterations: usize,
        from: Argb,
        to: Argb,
        interior: Argb,
    ) -> Result<Palette, RenderError> {
        if max_iterations < 1 {
            return Err(RenderError::NoIterations);
        }
        let steps = max_iterations as f32;
        let mut colors: Vec<Argb> = (0..max_iterations)
            .map(|i| from.lerp(to, i as f32 / steps))
            .collect();
        colors.push(interior);
        Palette::new(colors)
    }

    /// Number of entries, interior included.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color for the points that never escape.
    pub fn interior(&self) -> Argb {
        self.colors[self.colors.len() - 1]
    }
}

impl ::std::ops::Index<usize> for Palette {
    type Output = Argb;

    #[inline]
    fn index(&self, i: usize) -> &Argb {
        &self.colors[i]
    }
}
