//! Global brightness
//!
//! Scales every composed frame. Changes are interpolated over a configured
//! time unless requested to apply immediately.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::math8::scale8;
use crate::transition::ValueTransition;

#[derive(Debug, Clone)]
pub struct GlobalBrightness {
    level: ValueTransition,
    interpolation: Duration,
    /// Interpolated change requested before the first tick; starts on it
    pending: Option<u8>,
}

impl GlobalBrightness {
    pub const fn new(level: u8, interpolation: Duration) -> Self {
        Self {
            level: ValueTransition::new(level),
            interpolation,
            pending: None,
        }
    }

    /// Move towards `level`, either over the interpolation time or at once.
    ///
    /// With `now` unknown an interpolated change waits for the next tick.
    pub fn set(&mut self, level: u8, immediately: bool, now: Option<Instant>) {
        let duration = if immediately {
            Duration::from_millis(0)
        } else {
            self.interpolation
        };
        #[cfg(feature = "esp32-log")]
        println!(
            "[brightness] {} -> {} over {}ms",
            self.level.current(),
            level,
            duration.as_millis()
        );
        self.pending = None;
        match now {
            Some(now) => self.level.set(level, duration, now),
            None if immediately => self.level.set(level, duration, Instant::from_ticks(0)),
            None => self.pending = Some(level),
        }
    }

    pub const fn current(&self) -> u8 {
        self.level.current()
    }

    pub const fn target(&self) -> u8 {
        match self.pending {
            Some(level) => level,
            None => self.level.target(),
        }
    }

    pub const fn is_transitioning(&self) -> bool {
        self.pending.is_some() || self.level.is_transitioning()
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(level) = self.pending.take() {
            self.level.set(level, self.interpolation, now);
        }
        self.level.tick(now);
    }

    /// Scale a color by the current level
    pub const fn apply(&self, color: Rgb) -> Rgb {
        let level = self.level.current();
        match level {
            255 => color,
            0 => Rgb { r: 0, g: 0, b: 0 },
            _ => Rgb {
                r: scale8(color.r, level),
                g: scale8(color.g, level),
                b: scale8(color.b, level),
            },
        }
    }
}
