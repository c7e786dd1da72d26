// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A whole image, cut into blocks and handed out to worker threads.
//!
//! The engine only knows about blocks.  This is the smallest host that
//! can drive it: it owns the image buffer and a mask of pixels that
//! are already done, splits the image into square blocks, and lets a
//! handful of threads pull blocks off a shared queue until it runs
//! dry.  Each worker renders into its own scratch buffers; the results
//! are stitched back into the frame once every thread has joined.
//!
//! Because the mask survives between calls, rendering the same frame
//! twice computes nothing the second time.  Call `invalidate` after
//! changing the view.

use block::{render_block, Block};
use color::Argb;
use crossbeam::thread::ScopedJoinHandle;
use errors::RenderError;
use itertools::iproduct;
use params::{Palette, RenderParams};
use planes::AffineTransform;
use std::sync::{Arc, Mutex};
use tables::LogTables;

/// A rendered (or partly rendered) image.
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    colors: Vec<u32>,
    set: Vec<bool>,
}

/// A block's worth of results waiting to be stitched in.
struct Rendered {
    block: Block,
    colors: Vec<u32>,
    computed: usize,
}

impl Frame {
    /// An empty frame.  Every pixel starts unset and transparent black.
    pub fn new(width: usize, height: usize) -> Result<Frame, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage(width, height));
        }
        Ok(Frame {
            width,
            height,
            colors: vec![0; width * height],
            set: vec![false; width * height],
        })
    }

    /// Image width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed ARGB, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.colors
    }

    /// Which pixels have been computed.
    pub fn mask(&self) -> &[bool] {
        &self.set
    }

    /// Forget what has been computed.  Colors stay until overwritten.
    pub fn invalidate(&mut self) {
        for s in self.set.iter_mut() {
            *s = false;
        }
    }

    /// Mark a rectangle as needing work again.
    pub fn invalidate_block(&mut self, block: &Block) {
        for row in block.y..(block.y + block.height).min(self.height) {
            for column in block.x..(block.x + block.width).min(self.width) {
                self.set[row * self.width + column] = false;
            }
        }
    }

    /// Tightly packed RGB bytes, for writing out an image.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.colors.len() * 3);
        for &c in &self.colors {
            bytes.extend_from_slice(&Argb(c).to_rgb8());
        }
        bytes
    }

    /// Cut the frame into `size`-square blocks, clipping the right and
    /// bottom edges.
    pub fn blocks(&self, size: usize) -> Vec<Block> {
        let size = size.max(1);
        let (width, height) = (self.width, self.height);
        let columns = (0..width).step_by(size);
        let rows = (0..height).step_by(size);
        iproduct!(rows, columns)
            .map(|(y, x)| Block {
                x,
                y,
                width: size.min(width - x),
                height: size.min(height - y),
            })
            .collect()
    }

    fn gather(&self, block: &Block) -> (Vec<u32>, Vec<bool>) {
        let mut colors = Vec::with_capacity(block.len());
        let mut set = Vec::with_capacity(block.len());
        for row in block.y..block.y + block.height {
            let start = row * self.width + block.x;
            colors.extend_from_slice(&self.colors[start..start + block.width]);
            set.extend_from_slice(&self.set[start..start + block.width]);
        }
        (colors, set)
    }

    fn scatter(&mut self, rendered: &Rendered) {
        let block = &rendered.block;
        for row in 0..block.height {
            let start = (block.y + row) * self.width + block.x;
            let source = &rendered.colors[row * block.width..(row + 1) * block.width];
            self.colors[start..start + block.width].copy_from_slice(source);
            for s in &mut self.set[start..start + block.width] {
                *s = true;
            }
        }
    }
}

/// Render every unset pixel of `frame`.  Returns the number of pixels
/// actually computed.
pub fn render_frame(
    frame: &mut Frame,
    transform: &AffineTransform,
    params: &RenderParams,
    palette: &Palette,
    tables: &LogTables,
    block_size: usize,
    threads: usize,
) -> Result<usize, RenderError> {
    params.validate(palette)?;
    let threads = threads.max(1);

    // Blocks with nothing left to do never reach the workers.
    let work: Vec<(Block, Vec<u32>, Vec<bool>)> = frame
        .blocks(block_size)
        .into_iter()
        .map(|block| {
            let (colors, set) = frame.gather(&block);
            (block, colors, set)
        })
        .filter(|(_, _, set)| set.iter().any(|s| !s))
        .collect();
    debug!(
        "Rendering {}x{} frame: {} blocks pending on {} threads",
        frame.width,
        frame.height,
        work.len(),
        threads
    );

    let queue = Arc::new(Mutex::new(work.into_iter()));
    let mut rendered: Vec<Rendered> = vec![];
    let outcome = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Vec<Rendered>>> = (0..threads)
            .map(|_| {
                let queue = queue.clone();
                spawner.spawn(move |_| {
                    let mut done: Vec<Rendered> = vec![];
                    loop {
                        let next = match queue.lock() {
                            Ok(mut q) => q.next(),
                            Err(_) => None,
                        };
                        match next {
                            Some((block, mut colors, set)) => {
                                let computed = render_block(
                                    &block,
                                    transform,
                                    params,
                                    palette,
                                    tables,
                                    Some(&set[..]),
                                    &mut colors,
                                );
                                trace!("Block at {},{}: {} pixels", block.x, block.y, computed);
                                done.push(Rendered {
                                    block,
                                    colors,
                                    computed,
                                });
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    done
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(done) => rendered.extend(done),
                Err(_) => return Err(RenderError::WorkerPanicked),
            }
        }
        Ok(())
    });

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(e),
        Err(_) => return Err(RenderError::WorkerPanicked),
    }

    let mut computed = 0;
    for r in &rendered {
        frame.scatter(r);
        computed += r.computed;
    }
    debug!("Frame complete, {} pixels computed", computed);
    Ok(computed)
}
