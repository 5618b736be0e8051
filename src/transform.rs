//! Per-segment transforms
//!
//! A transform turns a progress value into a level for every LED of one
//! segment and writes `color` at that level into the frame buffer. Writing
//! is a pure function of its arguments, so applying the same transform twice
//! leaves the same buffer behind.

use crate::color::Rgb;
use crate::frame::{FrameBuffer, Pixel};
use crate::math8::level8;
use crate::segment::{LedOrder, Segment};

/// Default soft edge of sliding fronts, as a fraction of the segment length
pub const DEFAULT_AFTERGLOW: f32 = 0.2;

/// Direction of motion
///
/// On a segment whose axis does not match, `Right` moves like `Down` and
/// `Left` like `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Whether the motion runs with the natural (left to right, top to
    /// bottom) order of the segment
    const fn is_forward(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }
}

/// Animation function of a step slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    /// Leaves the segment untouched
    #[default]
    None,
    /// Light enters at the entry edge and fills the segment moving in
    /// `Direction`; the far edge lights last
    SlideIn(Direction),
    /// Light leaves the segment moving in `Direction`, going dark first at
    /// the entry edge
    SlideOut(Direction),
    FadeIn,
    FadeOut,
    /// Fully lit, whatever the progress
    Show,
    /// Fully dark, whatever the progress
    Hide,
}

impl Transform {
    /// Write the segment state at `progress` into `frame`.
    ///
    /// `progress` may lie outside `[0, 1]` when an overshooting easing is
    /// used; levels are clamped after they are computed. Empty segments are
    /// ignored.
    pub fn apply<const LEDS: usize>(
        self,
        frame: &mut FrameBuffer<LEDS>,
        segment: &Segment,
        color: Rgb,
        progress: f32,
        afterglow: f32,
    ) {
        if self == Self::None || segment.is_empty() {
            return;
        }

        let count = segment.len();
        for (offset, pixel) in frame.range_mut(segment.range).iter_mut().enumerate() {
            let intensity = self.intensity(segment, offset, count, progress, afterglow);
            *pixel = Pixel::new(color, level8(intensity));
        }
    }

    /// Unclamped intensity of the LED at `offset` within the segment
    fn intensity(
        self,
        segment: &Segment,
        offset: usize,
        count: usize,
        progress: f32,
        afterglow: f32,
    ) -> f32 {
        match self {
            Self::None | Self::Show => 1.0,
            Self::Hide => 0.0,
            Self::FadeIn => progress,
            Self::FadeOut => 1.0 - progress,
            Self::SlideIn(direction) => {
                let position = travel_position(segment, offset, count, direction);
                front_intensity(position, progress, afterglow)
            }
            Self::SlideOut(direction) => {
                let position = travel_position(segment, offset, count, direction);
                1.0 - front_intensity(position, progress, afterglow)
            }
        }
    }

    /// Level the segment is left at once the transform completes, `None` if
    /// untouched
    pub const fn final_level(self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::SlideIn(_) | Self::FadeIn | Self::Show => Some(255),
            Self::SlideOut(_) | Self::FadeOut | Self::Hide => Some(0),
        }
    }
}

/// Distance of an LED from the edge where motion starts, `(0, 1)`, measured
/// at the LED center
fn travel_position(segment: &Segment, offset: usize, count: usize, direction: Direction) -> f32 {
    let last = count.saturating_sub(1);
    let natural = match segment.order {
        LedOrder::Forward => offset,
        LedOrder::Reverse => last - offset.min(last),
    };
    let distance = if direction.is_forward() {
        natural
    } else {
        last - natural
    };
    (distance as f32 + 0.5) / count.max(1) as f32
}

/// Intensity behind a front that has travelled `progress` of the segment,
/// blended over `afterglow`
fn front_intensity(position: f32, progress: f32, afterglow: f32) -> f32 {
    if afterglow <= 0.0 {
        return if position <= progress { 1.0 } else { 0.0 };
    }
    let front = progress * (1.0 + afterglow);
    (front - position) / afterglow
}
