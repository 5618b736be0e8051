//! Frame buffer
//!
//! One [`Pixel`] per physical LED: the segment color plus the level the
//! animations left it at. Colors and levels are kept apart so that a segment
//! can be recolored without disturbing an animation in flight.

use crate::color::{Rgb, scale_color};
use crate::segment::LedRange;

/// Color and brightness of one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub color: Rgb,
    /// 0 = off, 255 = full color
    pub level: u8,
}

impl Pixel {
    pub const OFF: Self = Self {
        color: Rgb { r: 0, g: 0, b: 0 },
        level: 0,
    };

    pub const fn new(color: Rgb, level: u8) -> Self {
        Self { color, level }
    }

    /// Color actually emitted by the LED
    pub const fn output(self) -> Rgb {
        scale_color(self.color, self.level)
    }
}

/// Per-LED state of the whole strip
#[derive(Debug, Clone)]
pub struct FrameBuffer<const LEDS: usize> {
    pixels: [Pixel; LEDS],
}

impl<const LEDS: usize> Default for FrameBuffer<LEDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LEDS: usize> FrameBuffer<LEDS> {
    pub const fn new() -> Self {
        Self {
            pixels: [Pixel::OFF; LEDS],
        }
    }

    pub const fn pixels(&self) -> &[Pixel; LEDS] {
        &self.pixels
    }

    /// Pixel at `led`, `None` past the end of the strip
    pub fn get(&self, led: usize) -> Option<Pixel> {
        self.pixels.get(led).copied()
    }

    /// Pixels of `range`; empty if the range does not fit the strip
    pub fn range(&self, range: LedRange) -> &[Pixel] {
        self.pixels.get(range.indices()).unwrap_or(&[])
    }

    /// Mutable pixels of `range`; empty if the range does not fit the strip
    pub fn range_mut(&mut self, range: LedRange) -> &mut [Pixel] {
        self.pixels.get_mut(range.indices()).unwrap_or(&mut [])
    }

    /// Write a single pixel; out of range writes are ignored
    pub fn set(&mut self, led: usize, pixel: Pixel) {
        if let Some(slot) = self.pixels.get_mut(led) {
            *slot = pixel;
        }
    }

    pub fn fill(&mut self, range: LedRange, pixel: Pixel) {
        self.range_mut(range).fill(pixel);
    }

    /// Recolor `range`, keeping every LED's level
    pub fn recolor(&mut self, range: LedRange, color: Rgb) {
        for pixel in self.range_mut(range) {
            pixel.color = color;
        }
    }

    /// Set the level of `range`, keeping its colors
    pub fn set_level(&mut self, range: LedRange, level: u8) {
        for pixel in self.range_mut(range) {
            pixel.level = level;
        }
    }

    /// Turn every LED off
    pub fn clear(&mut self) {
        for pixel in &mut self.pixels {
            pixel.level = 0;
        }
    }

    /// Whether any LED of `range` is lit
    pub fn is_lit(&self, range: LedRange) -> bool {
        self.range(range).iter().any(|pixel| pixel.level > 0)
    }
}
