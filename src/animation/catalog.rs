use embassy_time::Duration;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::AnimationId;
use super::complex::ComplexAnimation;
use super::step::{AnimationStep, StepSlot};
use crate::easing::{EaseMode, Easing};
use crate::error::AnimationError;
use crate::segment::{Axis, Glyph, MAX_DISPLAYS, SegmentMap, SegmentRef, SegmentRole};
use crate::transform::{Direction, Transform};

use crate::segment::SegmentRole::{
    Bottom, BottomLeft, BottomRight, Center, Top, TopLeft, TopRight,
};
use crate::transform::Direction::{Down, Left, Right, Up};
use crate::transform::Transform::{SlideIn, SlideOut};

/// Built-in animations plus one morph slot per display
pub const MAX_ANIMATIONS: usize = 4 + MAX_DISPLAYS;

/// Chase around the lower minute digit
const LOADING: &[&[StepSlot]] = &[
    &[StepSlot::linear(Bottom, 0, SlideIn(Right))],
    &[
        StepSlot::linear(Bottom, 0, SlideOut(Right)),
        StepSlot::linear(BottomRight, 0, SlideIn(Up)),
    ],
    &[
        StepSlot::linear(BottomRight, 0, SlideOut(Up)),
        StepSlot::linear(TopRight, 0, SlideIn(Up)),
    ],
    &[
        StepSlot::linear(TopRight, 0, SlideOut(Up)),
        StepSlot::linear(Top, 0, SlideIn(Left)),
    ],
    &[
        StepSlot::linear(Top, 0, SlideOut(Left)),
        StepSlot::linear(TopLeft, 0, SlideIn(Down)),
    ],
    &[
        StepSlot::linear(TopLeft, 0, SlideOut(Down)),
        StepSlot::linear(BottomLeft, 0, SlideIn(Down)),
    ],
    &[StepSlot::linear(BottomLeft, 0, SlideOut(Down))],
];

/// "Sdh" written one stroke at a time over the three full digits
const LOADING_PROGRESS: &[&[StepSlot]] = &[
    &[StepSlot::linear(Top, 2, SlideIn(Left))],
    &[StepSlot::linear(TopLeft, 2, SlideIn(Down))],
    &[StepSlot::linear(Center, 2, SlideIn(Right))],
    &[StepSlot::linear(BottomRight, 2, SlideIn(Down))],
    &[StepSlot::linear(Bottom, 2, SlideIn(Left))],
    &[StepSlot::linear(TopRight, 1, SlideIn(Down))],
    &[StepSlot::linear(Center, 1, SlideIn(Left))],
    &[StepSlot::linear(BottomLeft, 1, SlideIn(Down))],
    &[StepSlot::linear(Bottom, 1, SlideIn(Right))],
    &[StepSlot::linear(BottomRight, 1, SlideIn(Up))],
    &[StepSlot::linear(TopLeft, 0, SlideIn(Down))],
    &[StepSlot::linear(BottomLeft, 0, SlideIn(Down))],
    &[StepSlot::linear(Center, 0, SlideIn(Right))],
    &[StepSlot::linear(BottomRight, 0, SlideIn(Down))],
];

/// Easings used when a display morphs between glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphStyle {
    pub slide_in: Easing,
    pub slide_out: Easing,
}

impl MorphStyle {
    pub const DEFAULT: Self = Self {
        slide_in: Easing::Sine(EaseMode::Out),
        slide_out: Easing::Sine(EaseMode::In),
    };
}

impl Default for MorphStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn morph_direction(role: SegmentRole) -> Direction {
    match role.axis() {
        Axis::Horizontal => Right,
        Axis::Vertical => Down,
    }
}

/// Build the morph of `display` from one glyph to another.
///
/// Strokes only in `from` slide out first while shared strokes are held lit
/// and unused strokes dark; strokes only in `to` slide in afterwards. When
/// nothing leaves or nothing enters, the morph is a single step. Strokes the
/// layout does not define on `display` are left out.
pub fn digit_morph(
    map: &SegmentMap,
    display: u8,
    from: Glyph,
    to: Glyph,
    duration: Duration,
    style: MorphStyle,
) -> Result<ComplexAnimation, AnimationError> {
    let mut exit = AnimationStep::new();
    let mut enter = AnimationStep::new();
    let mut leaving = false;

    for role in SegmentRole::DIGIT {
        let segment = SegmentRef::new(role, display);
        if !map.contains(segment) {
            continue;
        }
        let direction = morph_direction(role);
        match (from.contains(role), to.contains(role)) {
            (true, true) => exit.push(StepSlot::new(segment, Transform::Show, Easing::None))?,
            (false, false) => exit.push(StepSlot::new(segment, Transform::Hide, Easing::None))?,
            (true, false) => {
                leaving = true;
                exit.push(StepSlot::new(segment, SlideOut(direction), style.slide_out))?;
            }
            (false, true) => {
                enter.push(StepSlot::new(segment, SlideIn(direction), style.slide_in))?;
            }
        }
    }

    let mut steps = Vec::new();
    if leaving && !enter.is_pause() {
        steps.push(exit).map_err(|_| AnimationError::TooManySteps)?;
        steps.push(enter).map_err(|_| AnimationError::TooManySteps)?;
    } else {
        for slot in enter.slots() {
            exit.push(*slot)?;
        }
        steps.push(exit).map_err(|_| AnimationError::TooManySteps)?;
    }
    ComplexAnimation::new(steps, duration)
}

/// One fade in and out of the separator dots
pub fn separator_flash(
    display: u8,
    duration: Duration,
) -> Result<ComplexAnimation, AnimationError> {
    let dots = SegmentRef::new(SegmentRole::SeparatorDots, display);
    let easing = Easing::Sine(EaseMode::InOut);
    let fade_in: &[StepSlot] = &[StepSlot::new(dots, Transform::FadeIn, easing)];
    let fade_out: &[StepSlot] = &[StepSlot::new(dots, Transform::FadeOut, easing)];
    ComplexAnimation::from_rows(&[fade_in, fade_out], duration)
}

/// Named animation definitions
#[derive(Debug, Clone, Default)]
pub struct AnimationCatalog {
    entries: Vec<(AnimationId, ComplexAnimation), MAX_ANIMATIONS>,
}

impl AnimationCatalog {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Catalog with the built-in animations the layout can show.
    ///
    /// An animation whose segments the layout lacks is left out, so playing
    /// it later reports it as unknown.
    pub fn builtin(
        map: &SegmentMap,
        loading: Duration,
        separator: Option<(u8, Duration)>,
    ) -> Result<Self, AnimationError> {
        let mut catalog = Self::new();
        catalog.insert_if_valid(
            map,
            AnimationId::Loading,
            ComplexAnimation::from_rows(LOADING, loading)?,
        )?;
        catalog.insert_if_valid(
            map,
            AnimationId::LoadingProgress,
            ComplexAnimation::from_rows(LOADING_PROGRESS, loading)?,
        )?;
        if let Some((display, duration)) = separator {
            catalog.insert_if_valid(
                map,
                AnimationId::SeparatorFlash,
                separator_flash(display, duration)?,
            )?;
        }
        Ok(catalog)
    }

    fn insert_if_valid(
        &mut self,
        map: &SegmentMap,
        id: AnimationId,
        animation: ComplexAnimation,
    ) -> Result<(), AnimationError> {
        match animation.validate(map) {
            Ok(()) => self.insert(id, animation),
            Err(_error) => {
                #[cfg(feature = "esp32-log")]
                println!("[catalog] skipping {}: {}", id, _error);
                Ok(())
            }
        }
    }

    /// Add an animation, replacing any previous one with the same id
    pub fn insert(
        &mut self,
        id: AnimationId,
        animation: ComplexAnimation,
    ) -> Result<(), AnimationError> {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(entry, _)| *entry == id) {
            *existing = animation;
            return Ok(());
        }
        self.entries
            .push((id, animation))
            .map_err(|_| AnimationError::CatalogFull)
    }

    pub fn get(&self, id: AnimationId) -> Option<&ComplexAnimation> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, animation)| animation)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<ComplexAnimation> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.swap_remove(index).1)
    }

    pub fn ids(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
