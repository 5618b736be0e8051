use embassy_time::Duration;

use super::AnimationId;
use super::complex::ComplexAnimation;
use crate::display::Display;

/// What happens when the last step completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop, leaving the last step's final state behind
    #[default]
    Once,
    /// Start over from the first step
    Loop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Playing,
    Finished,
}

/// Playback position within one animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCursor {
    id: AnimationId,
    step: usize,
    step_elapsed: Duration,
    repeat: RepeatMode,
    iterations: u32,
}

impl PlaybackCursor {
    pub const fn new(id: AnimationId, repeat: RepeatMode) -> Self {
        Self {
            id,
            step: 0,
            step_elapsed: Duration::from_ticks(0),
            repeat,
            iterations: 0,
        }
    }

    pub const fn id(&self) -> AnimationId {
        self.id
    }

    /// Index of the step currently playing
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Time spent in the current step
    pub const fn step_elapsed(&self) -> Duration {
        self.step_elapsed
    }

    pub const fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Number of completed passes of a looping animation
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Let a looping animation end after its current pass
    pub fn finish(&mut self) {
        self.repeat = RepeatMode::Once;
    }

    /// Advance by `delta` and render into `display`.
    ///
    /// Time left over when a step completes carries into the next one, so a
    /// large delta may complete several steps in one call. Each completed
    /// step is rendered at its final state before the next begins.
    pub fn advance<const LEDS: usize>(
        &mut self,
        delta: Duration,
        animation: &ComplexAnimation,
        display: &mut Display<LEDS>,
    ) -> CursorState {
        let per_step = animation.per_step();
        self.step_elapsed += delta;

        if self.repeat == RepeatMode::Loop {
            self.skip_whole_cycles(animation.cycle());
        }

        loop {
            let Some(step) = animation.step(self.step) else {
                return CursorState::Finished;
            };
            if !step.advance(self.step_elapsed, per_step, display) {
                return CursorState::Playing;
            }

            self.step_elapsed -= per_step;
            self.step += 1;
            if self.step < animation.step_count() {
                continue;
            }
            match self.repeat {
                RepeatMode::Once => return CursorState::Finished,
                RepeatMode::Loop => {
                    self.step = 0;
                    self.iterations = self.iterations.saturating_add(1);
                }
            }
        }
    }

    /// Drop whole passes of a looping animation so a long stall does not
    /// replay every step it missed
    fn skip_whole_cycles(&mut self, cycle: Duration) {
        let cycle_ticks = cycle.as_ticks();
        if cycle_ticks == 0 || self.step_elapsed.as_ticks() < cycle_ticks {
            return;
        }
        let skipped = self.step_elapsed.as_ticks() / cycle_ticks;
        self.step_elapsed = Duration::from_ticks(self.step_elapsed.as_ticks() % cycle_ticks);
        #[allow(clippy::cast_possible_truncation)]
        let skipped = skipped.min(u64::from(u32::MAX)) as u32;
        self.iterations = self.iterations.saturating_add(skipped);
    }
}
