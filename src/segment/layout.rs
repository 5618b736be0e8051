//! Declarative physical layouts

use super::{LedOrder, SegmentRef, SegmentRole};

/// One digit segment of a layout, in wiring order
#[derive(Debug, Clone, Copy)]
pub struct SegmentSpec {
    pub role: SegmentRole,
    pub display: u8,
    pub order: LedOrder,
}

impl SegmentSpec {
    pub const fn new(role: SegmentRole, display: u8, order: LedOrder) -> Self {
        Self {
            role,
            display,
            order,
        }
    }

    pub const fn segment_ref(&self) -> SegmentRef {
        SegmentRef::new(self.role, self.display)
    }
}

/// Auxiliary LEDs appended after the digit segments
#[derive(Debug, Clone, Copy)]
pub struct AuxSpec {
    pub role: SegmentRole,
    pub display: u8,
    pub count: u16,
    pub order: LedOrder,
}

impl AuxSpec {
    pub const fn segment_ref(&self) -> SegmentRef {
        SegmentRef::new(self.role, self.display)
    }
}

/// Physical layout of a clock
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub leds_per_segment: u16,
    pub segments: &'a [SegmentSpec],
    pub auxiliary: &'a [AuxSpec],
}

impl Layout<'_> {
    /// Number of LEDs the layout occupies
    pub const fn led_count(&self) -> usize {
        let mut count = self.segments.len() * self.leds_per_segment as usize;
        let mut i = 0;
        while i < self.auxiliary.len() {
            count += self.auxiliary[i].count as usize;
            i += 1;
        }
        count
    }
}

use super::LedOrder::{Forward, Reverse};
use super::SegmentRole::{Bottom, BottomLeft, BottomRight, Center, Top, TopLeft, TopRight};

const LEDS_PER_SEGMENT: u16 = 9;

/// Wiring of one full digit, starting at the bottom stroke
macro_rules! digit {
    ($display:expr) => {
        [
            SegmentSpec::new(Bottom, $display, Reverse),
            SegmentSpec::new(BottomLeft, $display, Reverse),
            SegmentSpec::new(TopLeft, $display, Reverse),
            SegmentSpec::new(Top, $display, Forward),
            SegmentSpec::new(TopRight, $display, Forward),
            SegmentSpec::new(BottomRight, $display, Forward),
            SegmentSpec::new(Center, $display, Reverse),
        ]
    };
}

const fn shelf_segments() -> [SegmentSpec; 23] {
    let minute_low = digit!(0);
    let minute_high = digit!(1);
    let hour_low = digit!(2);
    let mut all = [SegmentSpec::new(Top, 0, Forward); 23];
    let mut i = 0;
    while i < 7 {
        all[i] = minute_low[i];
        all[7 + i] = minute_high[i];
        all[14 + i] = hour_low[i];
        i += 1;
    }
    // A 12h clock only ever shows "1" on the leading hour digit
    all[21] = SegmentSpec::new(TopRight, 3, Forward);
    all[22] = SegmentSpec::new(BottomRight, 3, Forward);
    all
}

const SHELF_SEGMENTS: [SegmentSpec; 23] = shelf_segments();

const SHELF_EXTRAS: [AuxSpec; 2] = [
    AuxSpec {
        role: SegmentRole::Interior,
        display: 0,
        count: 12,
        order: Forward,
    },
    AuxSpec {
        role: SegmentRole::SeparatorDots,
        display: 2,
        count: 2,
        order: Forward,
    },
];

/// Shelf clock, 12h format: 23 segments of 9 LEDs on four displays.
///
/// Display 0 is the lower minute digit, 1 the higher minute digit, 2 the
/// lower hour digit and 3 the higher hour digit.
pub const SHELF_12H: Layout<'static> = Layout {
    leds_per_segment: LEDS_PER_SEGMENT,
    segments: &SHELF_SEGMENTS,
    auxiliary: &[],
};

/// LEDs driven by [`SHELF_12H`]
pub const SHELF_12H_LEDS: usize = SHELF_12H.led_count();

/// [`SHELF_12H`] with interior lights and separator dots on the same strip
pub const SHELF_12H_WITH_EXTRAS: Layout<'static> = Layout {
    leds_per_segment: LEDS_PER_SEGMENT,
    segments: &SHELF_SEGMENTS,
    auxiliary: &SHELF_EXTRAS,
};

/// LEDs driven by [`SHELF_12H_WITH_EXTRAS`]
pub const SHELF_12H_WITH_EXTRAS_LEDS: usize = SHELF_12H_WITH_EXTRAS.led_count();
