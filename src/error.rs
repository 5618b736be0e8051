//! Error types
//!
//! Nothing in the engine is fatal: definitions are validated when they are
//! built, and runtime requests that cannot be honoured are reported back to
//! the caller.

use core::fmt;

use crate::animation::AnimationId;
use crate::segment::SegmentRef;

/// Invalid physical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    ZeroLedsPerSegment,
    TooManySegments,
    TooManyLeds,
    DisplayOutOfRange(u8),
    /// The same role is defined twice on one display
    Duplicate(SegmentRef),
    /// Digit role in the auxiliary table or the other way around
    RoleMismatch(SegmentRef),
    EmptyAuxiliary(SegmentRef),
    Overlap(SegmentRef, SegmentRef),
    /// The layout needs more LEDs than the frame provides
    OutOfBounds { required: usize, available: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLedsPerSegment => write!(f, "segments must have at least one LED"),
            Self::TooManySegments => write!(f, "too many segments"),
            Self::TooManyLeds => write!(f, "LED index out of addressable range"),
            Self::DisplayOutOfRange(display) => write!(f, "display {display} out of range"),
            Self::Duplicate(id) => {
                write!(f, "{:?} defined twice on display {}", id.role, id.display)
            }
            Self::RoleMismatch(id) => write!(f, "{:?} placed in the wrong table", id.role),
            Self::EmptyAuxiliary(id) => write!(f, "{:?} has no LEDs", id.role),
            Self::Overlap(a, b) => write!(
                f,
                "{:?}@{} overlaps {:?}@{}",
                a.role, a.display, b.role, b.display
            ),
            Self::OutOfBounds {
                required,
                available,
            } => write!(f, "layout needs {required} LEDs, frame has {available}"),
        }
    }
}

/// Invalid animation definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    NoSteps,
    ZeroDuration,
    /// Total duration is shorter than one millisecond per step
    DurationTooShort { total_ms: u64, steps: usize },
    TooManySteps,
    TooManySlots,
    UndefinedSegment(SegmentRef),
    /// Two slots of one step write the same segment
    DuplicateSlot(SegmentRef),
    CatalogFull,
    UnknownAnimation(AnimationId),
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSteps => write!(f, "animation has no steps"),
            Self::ZeroDuration => write!(f, "animation has zero duration"),
            Self::DurationTooShort { total_ms, steps } => {
                write!(f, "{total_ms}ms is too short for {steps} steps")
            }
            Self::TooManySteps => write!(f, "too many steps"),
            Self::TooManySlots => write!(f, "too many slots in one step"),
            Self::UndefinedSegment(id) => {
                write!(f, "{:?} is not defined on display {}", id.role, id.display)
            }
            Self::DuplicateSlot(id) => {
                write!(f, "{:?}@{} animated twice in one step", id.role, id.display)
            }
            Self::CatalogFull => write!(f, "animation catalog is full"),
            Self::UnknownAnimation(id) => write!(f, "animation {id} is not in the catalog"),
        }
    }
}

/// Errors reported by the clock context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    Layout(LayoutError),
    Animation(AnimationError),
    InvalidDigit(u8),
    DisplayOutOfRange(u8),
    TooManyActiveAnimations,
}

impl From<LayoutError> for ClockError {
    fn from(error: LayoutError) -> Self {
        Self::Layout(error)
    }
}

impl From<AnimationError> for ClockError {
    fn from(error: AnimationError) -> Self {
        Self::Animation(error)
    }
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(error) => write!(f, "layout: {error}"),
            Self::Animation(error) => write!(f, "animation: {error}"),
            Self::InvalidDigit(value) => write!(f, "{value} is not a decimal digit"),
            Self::DisplayOutOfRange(display) => write!(f, "display {display} out of range"),
            Self::TooManyActiveAnimations => write!(f, "too many animations playing"),
        }
    }
}
