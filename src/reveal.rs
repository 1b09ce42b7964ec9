// The painting game itself: a black canvas that turns white one pixel at a time,
// in a random order, for every unit of distance the pointer travels.
// Visual expectation: slow, even "snow" appearing across the whole window while
// you wiggle the mouse; the faster you move, the faster it fills.

use crate::input::PointerState;
use crate::stopwatch::Stopwatch;
use crate::types::{pack_rgb, FrameBuffer, BLACK};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

const UNREVEALED: Rgb<u8> = Rgb([0, 0, 0]);
const REVEALED: Rgb<u8> = Rgb([255, 255, 255]);

pub struct RevealState {
    image: RgbImage,       // the canvas, one RGB pixel per screen pixel
    texture: FrameBuffer,  // packed copy of `image` that gets blitted to the window
    order: Vec<u32>,       // permutation of pixel indices; order[..cursor] are white
    cursor: usize,
    traveled: f64,         // pointer travel not yet spent on reveals
    stopwatch: Stopwatch,
    rng: StdRng,
}

impl RevealState {
    /// Empty 0×0 canvas; call `reset` before use.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same as `new`, but shuffles with the given generator.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            image: RgbImage::new(0, 0),
            texture: FrameBuffer::filled(0, 0, BLACK),
            order: Vec::new(),
            cursor: 0,
            traveled: 0.0,
            stopwatch: Stopwatch::default(),
            rng,
        }
    }

    /// Start a new session on a `width`×`height` canvas.
    /// Visual: the window goes fully black again and a new random order is drawn.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.image = RgbImage::from_pixel(width, height, UNREVEALED);
        self.sync_texture();

        let count = self.pixel_count() as u32;
        self.order.clear();
        self.order.extend(0..count);
        self.order.shuffle(&mut self.rng);

        self.traveled = 0.0;
        self.cursor = 0;
        self.stopwatch.restart();
        log::debug!("canvas reset: {width}x{height}, {count} pixels to reveal");
    }

    /// Spend this frame's pointer travel on reveals. Returns how many pixels turned white.
    pub fn update(&mut self, pointer: &PointerState) -> usize {
        self.advance(pointer.travel())
    }

    /// Add `distance` to the accumulator and reveal one pixel per whole unit.
    /// Does nothing once every pixel is revealed.
    pub fn advance(&mut self, distance: f64) -> usize {
        if self.is_complete() {
            return 0;
        }

        self.traveled += distance;

        let width = self.image.width();
        let mut revealed = 0;
        while self.traveled >= 1.0 {
            self.traveled -= 1.0;

            let pixel = self.order[self.cursor];
            self.image.put_pixel(pixel % width, pixel / width, REVEALED);
            self.cursor += 1;
            revealed += 1;

            if self.is_complete() {
                self.stopwatch.pause();
                log::info!(
                    "all {} pixels revealed in {:.2}s",
                    self.pixel_count(),
                    self.elapsed().as_secs_f64()
                );
                break;
            }
        }

        if revealed > 0 {
            self.sync_texture();
        }
        revealed
    }

    /// Repack the RGB canvas into the 0x00RRGGBB texture.
    fn sync_texture(&mut self) {
        let (w, h) = self.image.dimensions();
        self.texture.width = w as usize;
        self.texture.height = h as usize;
        self.texture.pixels.clear();
        self.texture
            .pixels
            .extend(self.image.pixels().map(|p| pack_rgb(p[0], p[1], p[2])));
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel_count(&self) -> usize {
        let (w, h) = self.image.dimensions();
        w as usize * h as usize
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.pixel_count()
    }

    #[cfg(test)]
    pub fn traveled(&self) -> f64 {
        self.traveled
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.stopwatch.secs()
    }

    #[cfg(test)]
    pub fn is_timer_paused(&self) -> bool {
        self.stopwatch.is_paused()
    }

    #[cfg(test)]
    pub fn reveal_order(&self) -> &[u32] {
        &self.order
    }

    #[cfg(test)]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn texture(&self) -> &FrameBuffer {
        &self.texture
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new()
    }
}
