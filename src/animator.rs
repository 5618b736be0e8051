//! Animation playback
//!
//! The animator owns the catalog and one cursor per playing animation. Each
//! tick it turns the wall clock into a delta and advances every cursor,
//! retiring those that finish. Animations are advanced in the order they
//! were started, so where two touch the same segment the newer one wins.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{
    AnimationCatalog, AnimationId, CursorState, MAX_ANIMATIONS, PlaybackCursor, RepeatMode,
};
use crate::display::Display;
use crate::error::{AnimationError, ClockError};

/// Maximum number of animations playing at once: every catalog entry
pub const MAX_ACTIVE: usize = MAX_ANIMATIONS;

/// Smallest delta handed to cursors; repeated or backwards timestamps
/// advance by this much instead of zero
pub const MIN_DELTA: Duration = Duration::from_ticks(1);

pub struct Animator {
    catalog: AnimationCatalog,
    cursors: Vec<PlaybackCursor, MAX_ACTIVE>,
    last_tick: Option<Instant>,
}

impl Animator {
    pub const fn new(catalog: AnimationCatalog) -> Self {
        Self {
            catalog,
            cursors: Vec::new(),
            last_tick: None,
        }
    }

    pub const fn catalog(&self) -> &AnimationCatalog {
        &self.catalog
    }

    pub const fn catalog_mut(&mut self) -> &mut AnimationCatalog {
        &mut self.catalog
    }

    /// Start `id` from its first step, restarting it if already playing
    pub fn play(&mut self, id: AnimationId, repeat: RepeatMode) -> Result<(), ClockError> {
        if !self.catalog.contains(id) {
            return Err(AnimationError::UnknownAnimation(id).into());
        }
        self.stop(id);
        self.cursors
            .push(PlaybackCursor::new(id, repeat))
            .map_err(|_| ClockError::TooManyActiveAnimations)?;

        #[cfg(feature = "esp32-log")]
        println!("[animator] play {} ({:?})", id, repeat);

        Ok(())
    }

    /// Let a looping animation end after its current pass.
    ///
    /// Returns `false` if `id` is not playing.
    pub fn finish(&mut self, id: AnimationId) -> bool {
        match self.cursors.iter_mut().find(|cursor| cursor.id() == id) {
            Some(cursor) => {
                cursor.finish();
                true
            }
            None => false,
        }
    }

    /// Stop `id` where it is. The frame keeps whatever it last rendered.
    pub fn stop(&mut self, id: AnimationId) -> bool {
        let before = self.cursors.len();
        self.cursors.retain(|cursor| cursor.id() != id);
        before != self.cursors.len()
    }

    pub fn stop_all(&mut self) {
        self.cursors.clear();
    }

    pub fn is_playing(&self, id: AnimationId) -> bool {
        self.cursors.iter().any(|cursor| cursor.id() == id)
    }

    pub fn cursor(&self, id: AnimationId) -> Option<&PlaybackCursor> {
        self.cursors.iter().find(|cursor| cursor.id() == id)
    }

    /// Cursors in start order
    pub fn active(&self) -> &[PlaybackCursor] {
        &self.cursors
    }

    pub fn is_idle(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Time since the previous tick.
    ///
    /// The first tick and ticks that do not move forward yield
    /// [`MIN_DELTA`]; a clock that jumps backwards is followed from its new
    /// position.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let delta = match self.last_tick {
            Some(last) if now > last => now - last,
            _ => MIN_DELTA,
        };
        self.last_tick = Some(now);
        delta
    }

    /// Advance every cursor by `delta`, dropping the finished ones
    pub fn advance<const LEDS: usize>(&mut self, delta: Duration, display: &mut Display<LEDS>) {
        let catalog = &self.catalog;
        self.cursors
            .retain_mut(|cursor| match catalog.get(cursor.id()) {
                Some(animation) => match cursor.advance(delta, animation, display) {
                    CursorState::Playing => true,
                    CursorState::Finished => {
                        #[cfg(feature = "esp32-log")]
                        println!("[animator] finished {}", cursor.id());
                        false
                    }
                },
                None => false,
            });
    }

    /// Advance all playing animations to `now`
    pub fn tick<const LEDS: usize>(&mut self, now: Instant, display: &mut Display<LEDS>) {
        let delta = self.delta(now);
        self.advance(delta, display);
    }
}
