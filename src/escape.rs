// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration for a single point.

use num::Complex;

/// Where an orbit stopped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// Iterations performed before the escape test fired, or the cap
    /// if it never did.
    pub iterations: usize,
    /// The last value of z.  Smooth coloring needs its magnitude.
    pub z: Complex<f64>,
}

impl Escape {
    /// True when the orbit ran all the way to the cap.
    #[inline]
    pub fn is_interior(&self, max_iterations: usize) -> bool {
        self.iterations == max_iterations
    }
}

/// Iterate `z <- z^2 + c` from zero.  The magnitude test runs
/// *before* each step, on the squares of the current z, and those
/// same squares feed the step.  A point that never passes the test
/// runs exactly `max_iterations` steps.
#[inline]
pub fn iterate(c: Complex<f64>, max_iterations: usize, escape_radius_squared: f64) -> Escape {
    let (mut re, mut im) = (0.0_f64, 0.0_f64);
    let mut i = 0;
    while i < max_iterations {
        let re_sq = re * re;
        let im_sq = im * im;
        if re_sq + im_sq > escape_radius_squared {
            break;
        }
        let next_im = 2.0 * re * im + c.im;
        re = re_sq - im_sq + c.re;
        im = next_im;
        i += 1;
    }
    Escape {
        iterations: i,
        z: Complex::new(re, im),
    }
}
