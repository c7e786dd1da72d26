// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Precomputed logarithm tables for smooth coloring.
//!
//! Smooth coloring wants `log2(|z|^2)` and then the log of that,
//! for every pixel that escapes.  Right after the escape test fires
//! `|z|^2` lives in a narrow band (four to thirty-six for the usual
//! radius), and `log2(|z|^2) / 2` lives in an even narrower one, so
//! both logarithms can be replaced by a quantized lookup into a
//! 65536-entry table.  The tables are built once, never mutated, and
//! shared by reference with every block render.

/// Number of entries in each table.
pub const TABLE_SIZE: usize = 65536;

/// Highest valid table index.
pub const TABLE_MAX: i64 = (TABLE_SIZE - 1) as i64;

/// Lower bound of the `|z|^2` domain covered by the magnitude table.
pub const MAGNITUDE_LOW: f64 = 4.0;

/// Width of the `|z|^2` domain, `[4, 36]`.
pub const MAGNITUDE_SPAN: f64 = 32.0;

/// Lower bound of the `log2(|z|^2) / 2` domain covered by the log-log table.
pub const LOG_LOW: f64 = 1.0;

/// Width of the log-log domain, `[1, 2.585]`.
pub const LOG_SPAN: f64 = 1.585;

/// Maps `|z|^2 - 4` onto a magnitude table index.
pub const MAGNITUDE_SCALE_FACTOR: f64 = TABLE_MAX as f64 / MAGNITUDE_SPAN;

/// Maps `logZn - 1` onto a log-log table index.
pub const LOG_LOG_SCALE_FACTOR: f64 = TABLE_MAX as f64 / LOG_SPAN;

/// The two lookup tables.
#[derive(Clone, Debug)]
pub struct LogTables {
    magnitude: Vec<f64>,
    log_log: Vec<f64>,
}

fn build(low: f64, span: f64) -> Vec<f64> {
    (0..TABLE_SIZE)
        .map(|i| (low + (i as f64 / TABLE_MAX as f64) * span).log2())
        .collect()
}

impl LogTables {
    /// Build both tables.  Deterministic; building twice gives
    /// identical tables.
    pub fn new() -> LogTables {
        let tables = LogTables {
            magnitude: build(MAGNITUDE_LOW, MAGNITUDE_SPAN),
            log_log: build(LOG_LOW, LOG_SPAN),
        };
        debug!("Built log lookup tables, {} entries each", TABLE_SIZE);
        tables
    }

    /// `log2(4 + (i / 65535) * 32)`
    pub fn magnitude(&self) -> &[f64] {
        &self.magnitude
    }

    /// `log2(1 + (i / 65535) * 1.585)`
    pub fn log_log(&self) -> &[f64] {
        &self.log_log
    }

    /// Approximate `log2(mag_sq)`.
    #[inline]
    pub fn log2_magnitude(&self, mag_sq: f64, scale: f64) -> f64 {
        self.magnitude[quantize(mag_sq - MAGNITUDE_LOW, scale)]
    }

    /// Approximate `log2(log_zn)`.
    #[inline]
    pub fn log2_log(&self, log_zn: f64, scale: f64) -> f64 {
        self.log_log[quantize(log_zn - LOG_LOW, scale)]
    }
}

impl Default for LogTables {
    fn default() -> LogTables {
        LogTables::new()
    }
}

/// Truncate toward zero, then saturate into the table.  Anything
/// outside the domain reads the nearest end of the table.
#[inline]
pub fn quantize(offset: f64, scale: f64) -> usize {
    let index = (offset * scale) as i64;
    index.max(0).min(TABLE_MAX) as usize
}
