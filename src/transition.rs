use embassy_time::{Duration, Instant};

use crate::math8::{blend8, progress8};

/// Time-based interpolation of an 8-bit value.
///
/// Used for the global brightness: a new target is approached linearly over
/// the configured interpolation time, starting from whatever value is
/// currently shown.
#[derive(Debug, Clone)]
pub struct ValueTransition {
    current: u8,
    source: u8,
    /// `None` when no transition is running
    target: Option<u8>,
    duration: Duration,
    start_time: Instant,
}

impl ValueTransition {
    pub const fn new(initial: u8) -> Self {
        Self {
            current: initial,
            source: initial,
            target: None,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    pub const fn current(&self) -> u8 {
        self.current
    }

    /// Value the transition is heading to (the current value when idle)
    pub const fn target(&self) -> u8 {
        match self.target {
            Some(target) => target,
            None => self.current,
        }
    }

    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Start moving towards `value`.
    ///
    /// A zero `duration` applies the value immediately.
    pub fn set(&mut self, value: u8, duration: Duration, start_time: Instant) {
        self.start_time = start_time;
        if duration.as_millis() == 0 || value == self.current {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = Duration::from_millis(0);
        } else {
            self.source = self.current;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    /// Update the interpolated value for the frame at `now`
    pub fn tick(&mut self, now: Instant) {
        let Some(target) = self.target else {
            return;
        };

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.current = target;
            self.source = target;
            self.target = None;
            return;
        }

        let progress = progress8(elapsed, self.duration);
        self.current = blend8(self.source, target, progress);
    }
}
