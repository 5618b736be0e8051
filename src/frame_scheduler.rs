//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::clock::Clock;
use crate::intent::IntentReceiver;
use crate::OutputDriver;

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Whether a frame was written to the output driver.
    pub flushed: bool,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Drains queued intents into the clock
/// - Ticks the clock and writes due frames to the output driver
/// - Tracks frame timing with drift correction
///
/// # Usage
///
/// ```ignore
/// static INTENTS: IntentQueue<8> = IntentQueue::new();
///
/// let clock = Clock::<SHELF_12H_LEDS>::new(&ClockConfig::SHELF)?;
/// let mut scheduler = FrameScheduler::new(clock, driver, INTENTS.receiver());
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const LEDS: usize, const INTENT_QUEUE_SIZE: usize> {
    output: O,
    clock: Clock<LEDS>,
    intents: IntentReceiver<'a, INTENT_QUEUE_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const LEDS: usize, const INTENT_QUEUE_SIZE: usize>
    FrameScheduler<'a, O, LEDS, INTENT_QUEUE_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(
        clock: Clock<LEDS>,
        driver: O,
        intents: IntentReceiver<'a, INTENT_QUEUE_SIZE>,
    ) -> Self {
        Self::with_frame_duration(clock, driver, intents, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        clock: Clock<LEDS>,
        driver: O,
        intents: IntentReceiver<'a, INTENT_QUEUE_SIZE>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            clock,
            intents,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies queued intents and ticks the clock
    /// 3. Writes the frame to the output driver if the clock flushed one
    /// 4. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after a long stall instead of bursting to catch up
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.clock.process_intents(&self.intents);
        let flushed = match self.clock.tick(now) {
            Some(frame) => {
                self.output.write(frame);
                true
            }
            None => false,
        };

        self.next_frame += self.frame_duration;
        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            flushed,
        }
    }

    /// Get a reference to the clock.
    pub fn clock(&self) -> &Clock<LEDS> {
        &self.clock
    }

    /// Get a mutable reference to the clock.
    pub fn clock_mut(&mut self) -> &mut Clock<LEDS> {
        &mut self.clock
    }
}
