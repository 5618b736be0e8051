#![no_std]

pub mod animation;
pub mod animator;
pub mod clock;
pub mod color;
pub mod display;
pub mod easing;
pub mod error;
pub mod frame;
pub mod frame_scheduler;
pub mod intent;
pub mod math8;
pub mod segment;
pub mod transform;
pub mod transition;

pub use animation::{AnimationCatalog, AnimationId, ComplexAnimation, RepeatMode};
pub use animator::Animator;
pub use clock::{Clock, ClockColors, ClockConfig, ClockTimings, DotConfig};
pub use display::{ColorTarget, Display, DisplayConfig};
pub use easing::{EaseMode, Easing};
pub use error::{AnimationError, ClockError, LayoutError};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use intent::{ClockIntent, IntentQueue, IntentReceiver, IntentSender, TrySendError};
pub use segment::{
    Glyph, Layout, LedOrder, SHELF_12H, SHELF_12H_LEDS, SHELF_12H_WITH_EXTRAS,
    SHELF_12H_WITH_EXTRAS_LEDS, SegmentMap, SegmentRef, SegmentRole,
};
pub use transform::{Direction, Transform};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The clock is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
