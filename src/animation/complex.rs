use embassy_time::Duration;
use heapless::Vec;

use super::step::{AnimationStep, StepSlot};
use crate::error::AnimationError;
use crate::segment::SegmentMap;

/// Maximum number of steps in one animation
pub const MAX_STEPS: usize = 16;

/// Ordered list of steps sharing a total duration
///
/// Every step runs for `total / steps` (whole milliseconds, truncated). The
/// definition is immutable once built; playback state lives in a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexAnimation {
    steps: Vec<AnimationStep, MAX_STEPS>,
    total: Duration,
    per_step: Duration,
}

impl ComplexAnimation {
    /// Build an animation from prepared steps.
    ///
    /// Rejects an empty step list and any duration that leaves less than one
    /// millisecond per step.
    pub fn new(
        steps: Vec<AnimationStep, MAX_STEPS>,
        total: Duration,
    ) -> Result<Self, AnimationError> {
        if steps.is_empty() {
            return Err(AnimationError::NoSteps);
        }
        let total_ms = total.as_millis();
        if total_ms == 0 {
            return Err(AnimationError::ZeroDuration);
        }
        let per_step_ms = total_ms / steps.len() as u64;
        if per_step_ms == 0 {
            return Err(AnimationError::DurationTooShort {
                total_ms,
                steps: steps.len(),
            });
        }

        Ok(Self {
            steps,
            total,
            per_step: Duration::from_millis(per_step_ms),
        })
    }

    /// Build an animation from a declarative table, one row per step
    pub fn from_rows(rows: &[&[StepSlot]], total: Duration) -> Result<Self, AnimationError> {
        let mut steps = Vec::new();
        for row in rows {
            steps
                .push(AnimationStep::from_slots(row)?)
                .map_err(|_| AnimationError::TooManySteps)?;
        }
        Self::new(steps, total)
    }

    /// Check every step against the layout
    pub fn validate(&self, map: &SegmentMap) -> Result<(), AnimationError> {
        self.steps.iter().try_for_each(|step| step.validate(map))
    }

    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&AnimationStep> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Duration of each step
    pub const fn per_step(&self) -> Duration {
        self.per_step
    }

    /// Duration of one full pass over all steps
    #[allow(clippy::cast_possible_truncation)]
    pub fn cycle(&self) -> Duration {
        self.per_step * self.steps.len() as u32
    }
}
