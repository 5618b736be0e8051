use embassy_time::Duration;
use heapless::Vec;

use crate::display::Display;
use crate::easing::Easing;
use crate::error::AnimationError;
use crate::math8::fraction;
use crate::segment::{SegmentMap, SegmentRef, SegmentRole};
use crate::transform::Transform;

/// Maximum number of segments one step may animate
pub const MAX_STEP_SLOTS: usize = 8;

/// One segment animated by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSlot {
    /// `None` marks an empty slot, which is skipped
    pub segment: Option<SegmentRef>,
    pub transform: Transform,
    pub easing: Easing,
}

impl StepSlot {
    pub const EMPTY: Self = Self {
        segment: None,
        transform: Transform::None,
        easing: Easing::None,
    };

    pub const fn new(segment: SegmentRef, transform: Transform, easing: Easing) -> Self {
        Self {
            segment: Some(segment),
            transform,
            easing,
        }
    }

    /// Slot without easing
    pub const fn linear(role: SegmentRole, display: u8, transform: Transform) -> Self {
        Self::new(SegmentRef::new(role, display), transform, Easing::None)
    }

    pub const fn is_empty(&self) -> bool {
        self.segment.is_none() || matches!(self.transform, Transform::None)
    }
}

/// Set of slots advanced together
///
/// A step without slots is a pause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationStep {
    slots: Vec<StepSlot, MAX_STEP_SLOTS>,
}

impl AnimationStep {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Build a step from a slot table, dropping empty slots
    pub fn from_slots(slots: &[StepSlot]) -> Result<Self, AnimationError> {
        let mut step = Self::new();
        for slot in slots {
            step.push(*slot)?;
        }
        Ok(step)
    }

    /// Add a slot; empty slots are ignored
    pub fn push(&mut self, slot: StepSlot) -> Result<(), AnimationError> {
        if slot.is_empty() {
            return Ok(());
        }
        self.slots
            .push(slot)
            .map_err(|_| AnimationError::TooManySlots)
    }

    pub fn slots(&self) -> &[StepSlot] {
        &self.slots
    }

    pub fn is_pause(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check every slot against the layout: segments must exist and appear
    /// at most once per step
    pub fn validate(&self, map: &SegmentMap) -> Result<(), AnimationError> {
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(segment) = slot.segment else {
                continue;
            };
            if !map.contains(segment) {
                return Err(AnimationError::UndefinedSegment(segment));
            }
            if self.slots[i + 1..]
                .iter()
                .any(|other| other.segment == Some(segment))
            {
                return Err(AnimationError::DuplicateSlot(segment));
            }
        }
        Ok(())
    }

    /// Render the step `elapsed` into a slice of `duration` and report
    /// whether it is complete.
    ///
    /// The linear progress is clamped to `[0, 1]` before easing, so an
    /// `elapsed` past the end renders the final state.
    pub fn advance<const LEDS: usize>(
        &self,
        elapsed: Duration,
        duration: Duration,
        display: &mut Display<LEDS>,
    ) -> bool {
        let linear = fraction(elapsed, duration);
        for slot in &self.slots {
            if let Some(segment) = slot.segment {
                display.animate(segment, slot.transform, slot.easing.ease(linear));
            }
        }
        elapsed >= duration
    }
}
