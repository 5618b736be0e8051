//! Animation model
//!
//! A [`ComplexAnimation`] is an immutable list of [`AnimationStep`]s played
//! one after another, each for the same slice of the total duration. Which
//! step is playing, and for how long, lives in a [`PlaybackCursor`] owned by
//! the animator.

mod catalog;
mod complex;
mod cursor;
mod step;

use core::fmt;

pub use catalog::{AnimationCatalog, MAX_ANIMATIONS, MorphStyle, digit_morph, separator_flash};
pub use complex::{ComplexAnimation, MAX_STEPS};
pub use cursor::{CursorState, PlaybackCursor, RepeatMode};
pub use step::{AnimationStep, MAX_STEP_SLOTS, StepSlot};

use crate::segment::MAX_DISPLAYS;

const ANIMATION_NAME_LOADING: &str = "loading";
const ANIMATION_NAME_LOADING_PROGRESS: &str = "loading_progress";
const ANIMATION_NAME_SEPARATOR_FLASH: &str = "separator_flash";
const ANIMATION_NAME_DIGIT_PREFIX: &str = "digit_";

const DIGIT_ANIMATION_NAMES: [&str; MAX_DISPLAYS] = [
    "digit_0", "digit_1", "digit_2", "digit_3", "digit_4", "digit_5", "digit_6", "digit_7",
];

/// Name of a playable animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationId {
    /// Endless chase around the lower minute digit
    Loading,
    /// Writes "Sdh" stroke by stroke across the displays
    LoadingProgress,
    /// Fades the separator dots in and out once
    SeparatorFlash,
    /// Morph of one display to its next glyph
    Digit(u8),
}

impl AnimationId {
    /// Morph of `display`, `None` past [`MAX_DISPLAYS`]
    pub const fn digit(display: u8) -> Option<Self> {
        if (display as usize) < MAX_DISPLAYS {
            Some(Self::Digit(display))
        } else {
            None
        }
    }

    /// Static name. A `Digit` past [`MAX_DISPLAYS`] has none and yields the
    /// bare prefix; build digit ids with [`AnimationId::digit`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => ANIMATION_NAME_LOADING,
            Self::LoadingProgress => ANIMATION_NAME_LOADING_PROGRESS,
            Self::SeparatorFlash => ANIMATION_NAME_SEPARATOR_FLASH,
            Self::Digit(display) => {
                if (display as usize) < MAX_DISPLAYS {
                    DIGIT_ANIMATION_NAMES[display as usize]
                } else {
                    ANIMATION_NAME_DIGIT_PREFIX
                }
            }
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ANIMATION_NAME_LOADING => Some(Self::Loading),
            ANIMATION_NAME_LOADING_PROGRESS => Some(Self::LoadingProgress),
            ANIMATION_NAME_SEPARATOR_FLASH => Some(Self::SeparatorFlash),
            _ => {
                let display: u8 = s.strip_prefix(ANIMATION_NAME_DIGIT_PREFIX)?.parse().ok()?;
                (usize::from(display) < MAX_DISPLAYS).then_some(Self::Digit(display))
            }
        }
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(display) => write!(f, "{ANIMATION_NAME_DIGIT_PREFIX}{display}"),
            _ => f.write_str(self.as_str()),
        }
    }
}
