#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Smooth-colored Mandelbrot renderer
//!
//! The Mandelbrot set takes a point c on the complex plane and
//! repeatedly squares z and adds c, starting from zero.  Points whose
//! orbit stays bounded are inside the set; everything else eventually
//! runs off to infinity, and how many steps that takes is the classic
//! "escape time" used to color the picture.
//!
//! Coloring by the raw step count gives hard bands.  Smooth coloring
//! uses the size of z at the moment it escaped to work out how far
//! past the boundary it overshot, producing a fractional step count
//! that can blend between two palette entries.  That costs two
//! logarithms per escaped pixel, which this crate can trade for two
//! table lookups (see `tables`).
//!
//! The engine works on blocks: a host picks a rectangle of the image,
//! the view transform, a palette, and a few flags, and gets colors
//! back.  `frame` is a small host that does exactly that with a pool of
//! threads.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

#[cfg(test)]
extern crate rand;

pub mod block;
pub mod color;
pub mod colorize;
pub mod errors;
pub mod escape;
pub mod frame;
pub mod params;
pub mod planes;
pub mod tables;

pub use block::{render_block, Block};
pub use color::Argb;
pub use colorize::resolve_color;
pub use errors::RenderError;
pub use escape::{iterate, Escape};
pub use frame::{render_frame, Frame};
pub use params::{Palette, RenderParams};
pub use planes::{AffineTransform, Pixel};
pub use tables::LogTables;
