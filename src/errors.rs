// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised while setting up a render.  The pixel engine itself
//! never fails; everything here is caught by the constructors and the
//! frame harness before any block is computed.

/// Everything that can go wrong before the engine gets its hands on
/// the pixels.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The two corners of the complex plane are in the wrong order.
    #[fail(display = "The left lower corner is not to the left of and below the right upper corner")]
    InvertedPlane,

    /// An image with no pixels in it.
    #[fail(display = "Image dimensions must be non-zero, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// A palette needs at least one exterior color and the interior color.
    #[fail(display = "A palette needs at least two colors, got {}", _0)]
    PaletteTooShort(usize),

    /// The palette must have exactly one entry per iteration plus the interior.
    #[fail(display = "Palette has {} colors, expected {}", actual, expected)]
    PaletteMismatch {
        /// `max_iterations + 1`
        expected: usize,
        /// What we were handed.
        actual: usize,
    },

    /// The escape radius must be positive.
    #[fail(display = "Escape radius squared must be positive, got {}", _0)]
    BadEscapeRadius(f64),

    /// Zero iterations cannot classify anything.
    #[fail(display = "Iteration limit must be at least 1")]
    NoIterations,

    /// Could not read a color.
    #[fail(display = "Could not parse color '{}'", _0)]
    BadColor(String),

    /// A worker thread died during a frame render.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}
