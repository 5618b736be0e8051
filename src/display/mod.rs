//! Display manager
//!
//! Owns the frame buffer and everything that decides what ends up on the
//! strip: segment colors, the global brightness and the flush rate limit.
//! Animations write levels through [`Display::animate`]; the manager turns
//! levels and colors into output colors when a frame is flushed.

mod brightness;
mod progress;

use embassy_time::{Duration, Instant};

pub use brightness::GlobalBrightness;
pub use progress::{DEFAULT_PROGRESS_SEGMENTS, MAX_PROGRESS_SEGMENTS, ProgressBar};

use crate::color::{Rgb, WHITE};
use crate::error::LayoutError;
use crate::frame::FrameBuffer;
use crate::segment::{Glyph, Layout, MAX_SEGMENTS, SegmentMap, SegmentRef, SegmentRole};
use crate::transform::{DEFAULT_AFTERGLOW, Transform};

/// Displays showing the minutes, lower digit first
pub const MINUTE_DISPLAYS: [u8; 2] = [0, 1];

/// Displays showing the hours, lower digit first
pub const HOUR_DISPLAYS: [u8; 2] = [2, 3];

/// Smallest interval between two flushes to the strip
pub const DEFAULT_MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(20);

pub const DEFAULT_BRIGHTNESS: u8 = 128;

pub const DEFAULT_BRIGHTNESS_INTERPOLATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    /// Soft edge of sliding fronts, as a fraction of a segment
    pub afterglow: f32,
    pub brightness: u8,
    pub brightness_interpolation: Duration,
    pub min_flush_interval: Duration,
    /// Number of segments on the progress bar
    pub progress_segments: usize,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        afterglow: DEFAULT_AFTERGLOW,
        brightness: DEFAULT_BRIGHTNESS,
        brightness_interpolation: DEFAULT_BRIGHTNESS_INTERPOLATION,
        min_flush_interval: DEFAULT_MIN_FLUSH_INTERVAL,
        progress_segments: DEFAULT_PROGRESS_SEGMENTS,
    };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Group of segments recolored together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// Every digit segment of the hour displays
    Hours,
    /// Every digit segment of the minute displays
    Minutes,
    /// Interior lighting; setting a color also turns it on
    Interior,
    SeparatorDots,
    /// Every digit segment
    AllSegments,
    /// Every digit segment of one display
    Display(u8),
}

pub struct Display<const LEDS: usize> {
    map: SegmentMap,
    frame: FrameBuffer<LEDS>,
    /// Color of each segment, indexed like the map
    colors: [Rgb; MAX_SEGMENTS],
    afterglow: f32,
    brightness: GlobalBrightness,
    progress: ProgressBar,
    output: [Rgb; LEDS],
    min_flush_interval: Duration,
    last_flush: Option<Instant>,
    /// Time of the last tick, `None` before the first
    now: Option<Instant>,
}

impl<const LEDS: usize> Display<LEDS> {
    pub fn new(layout: &Layout<'_>, config: &DisplayConfig) -> Result<Self, LayoutError> {
        let map = SegmentMap::new(layout, LEDS)?;
        let progress = ProgressBar::new(&map, config.progress_segments);
        Ok(Self {
            map,
            frame: FrameBuffer::new(),
            colors: [WHITE; MAX_SEGMENTS],
            afterglow: config.afterglow,
            brightness: GlobalBrightness::new(config.brightness, config.brightness_interpolation),
            progress,
            output: [Rgb::default(); LEDS],
            min_flush_interval: config.min_flush_interval,
            last_flush: None,
            now: None,
        })
    }

    pub const fn map(&self) -> &SegmentMap {
        &self.map
    }

    pub const fn frame(&self) -> &FrameBuffer<LEDS> {
        &self.frame
    }

    /// Colors of the last flushed frame
    pub const fn output(&self) -> &[Rgb; LEDS] {
        &self.output
    }

    pub const fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    /// Digit strokes of `display` with at least one LED lit
    pub fn lit_glyph(&self, display: u8) -> Glyph {
        SegmentRole::DIGIT
            .into_iter()
            .filter(|role| self.frame.is_lit(self.map.resolve(*role, display).range))
            .fold(Glyph::BLANK, Glyph::with)
    }

    /// Color of a segment, `None` if the layout does not define it
    pub fn segment_color(&self, segment: SegmentRef) -> Option<Rgb> {
        let resolved = self.map.resolve_ref(segment);
        if resolved.is_empty() {
            return None;
        }
        self.colors.get(usize::from(resolved.index)).copied()
    }

    /// Write `transform` at `progress` into one segment, in the segment's
    /// color. Undefined segments are ignored.
    pub fn animate(&mut self, segment: SegmentRef, transform: Transform, progress: f32) {
        let resolved = self.map.resolve_ref(segment);
        if resolved.is_empty() {
            return;
        }
        let color = self.colors[usize::from(resolved.index)];
        transform.apply(&mut self.frame, &resolved, color, progress, self.afterglow);
    }

    /// Recolor matching segments without touching their levels
    fn recolor(&mut self, color: Rgb, matches: impl Fn(SegmentRef) -> bool) {
        for (id, segment) in self.map.iter() {
            if matches(*id) {
                self.colors[usize::from(segment.index)] = color;
                self.frame.recolor(segment.range, color);
            }
        }
    }

    pub fn set_segment_color(&mut self, role: SegmentRole, display: u8, color: Rgb) {
        let target = SegmentRef::new(role, display);
        self.recolor(color, |id| id == target);
    }

    pub fn set_display_color(&mut self, display: u8, color: Rgb) {
        self.recolor(color, |id| id.display == display && !id.role.is_auxiliary());
    }

    pub fn set_all_segment_colors(&mut self, color: Rgb) {
        self.recolor(color, |id| !id.role.is_auxiliary());
    }

    pub fn set_color(&mut self, target: ColorTarget, color: Rgb) {
        match target {
            ColorTarget::Hours => {
                self.recolor(color, |id| {
                    !id.role.is_auxiliary() && HOUR_DISPLAYS.contains(&id.display)
                });
            }
            ColorTarget::Minutes => {
                self.recolor(color, |id| {
                    !id.role.is_auxiliary() && MINUTE_DISPLAYS.contains(&id.display)
                });
            }
            ColorTarget::Interior => {
                self.recolor(color, |id| id.role == SegmentRole::Interior);
                self.set_auxiliary_lit(SegmentRole::Interior, true);
            }
            ColorTarget::SeparatorDots => {
                self.recolor(color, |id| id.role == SegmentRole::SeparatorDots);
            }
            ColorTarget::AllSegments => self.set_all_segment_colors(color),
            ColorTarget::Display(display) => self.set_display_color(display, color),
        }
    }

    /// Switch every segment with an auxiliary role fully on or off
    pub fn set_auxiliary_lit(&mut self, role: SegmentRole, lit: bool) {
        let level = if lit { 255 } else { 0 };
        for segment in self.map.auxiliary_segments(role) {
            self.frame.set_level(segment.range, level);
        }
    }

    /// Change the global brightness, interpolated unless `immediately`
    pub fn set_global_brightness(&mut self, level: u8, immediately: bool) {
        self.brightness.set(level, immediately, self.now);
    }

    pub const fn brightness(&self) -> &GlobalBrightness {
        &self.brightness
    }

    /// Turn off every digit segment; auxiliary lights keep their state
    pub fn turn_all_segments_off(&mut self) {
        for segment in self.map.digit_segments() {
            self.frame.set_level(segment.range, 0);
        }
    }

    /// Turn off every LED
    pub fn turn_all_off(&mut self) {
        self.frame.clear();
    }

    /// Clear the digits and show an empty progress bar for `total` units
    pub fn display_progress(&mut self, total: u32) {
        self.turn_all_segments_off();
        self.progress.start(total);
        self.draw_progress();
    }

    pub fn update_progress(&mut self, done: u32) {
        self.progress.update(done);
        self.draw_progress();
    }

    fn draw_progress(&mut self) {
        for (segment, direction, fill) in self.progress.segments() {
            let resolved = self.map.resolve_ref(segment);
            if resolved.is_empty() {
                continue;
            }
            let color = self.colors[usize::from(resolved.index)];
            Transform::SlideIn(direction).apply(
                &mut self.frame,
                &resolved,
                color,
                fill,
                self.afterglow,
            );
        }
    }

    /// Advance time-based state to `now`
    pub fn tick(&mut self, now: Instant) {
        self.now = Some(now);
        self.brightness.tick(now);
    }

    /// Turn the frame buffer into output colors
    pub fn compose(&mut self) -> &[Rgb; LEDS] {
        for (out, pixel) in self.output.iter_mut().zip(self.frame.pixels()) {
            *out = self.brightness.apply(pixel.output());
        }
        &self.output
    }

    /// Compose a frame if the last flush is at least the minimum interval
    /// ago. The first call always flushes.
    pub fn flush(&mut self, now: Instant) -> Option<&[Rgb]> {
        let due = match self.last_flush {
            None => true,
            Some(last) => now < last || now - last >= self.min_flush_interval,
        };
        if !due {
            return None;
        }
        self.last_flush = Some(now);
        Some(self.compose())
    }
}
