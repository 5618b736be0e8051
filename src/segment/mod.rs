//! Segment addressing
//!
//! Maps logical segments (a role on a display) to contiguous ranges of
//! physical LEDs. The map is built once from a declarative [`Layout`] and
//! validated; lookups of undefined segments yield [`Segment::EMPTY`], which
//! every writer treats as a no-op target.

mod glyph;
mod layout;

use core::ops::Range;

use heapless::Vec;

use crate::error::LayoutError;

pub use glyph::Glyph;
pub use layout::{
    AuxSpec, Layout, SHELF_12H, SHELF_12H_LEDS, SHELF_12H_WITH_EXTRAS, SHELF_12H_WITH_EXTRAS_LEDS,
    SegmentSpec,
};

/// Maximum number of displays a layout may address
pub const MAX_DISPLAYS: usize = 8;

/// Maximum number of segments (digit and auxiliary) in a layout
pub const MAX_SEGMENTS: usize = 40;

/// Number of distinct segment roles
pub const ROLE_COUNT: usize = 9;

const NO_SEGMENT: u8 = u8::MAX;

/// Logical role of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SegmentRole {
    Top = 0,
    TopLeft = 1,
    TopRight = 2,
    Center = 3,
    BottomLeft = 4,
    BottomRight = 5,
    Bottom = 6,
    /// Interior (down) lighting, not part of a digit
    Interior = 7,
    /// Separator dots between hours and minutes
    SeparatorDots = 8,
}

impl SegmentRole {
    /// The seven strokes of a digit
    pub const DIGIT: [Self; 7] = [
        Self::Top,
        Self::TopLeft,
        Self::TopRight,
        Self::Center,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Bottom,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Auxiliary roles are pseudo-segments with their own LED counts
    pub const fn is_auxiliary(self) -> bool {
        matches!(self, Self::Interior | Self::SeparatorDots)
    }

    /// Axis along which the segment's LEDs are laid out
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Center | Self::Bottom | Self::Interior => Axis::Horizontal,
            Self::TopLeft
            | Self::TopRight
            | Self::BottomLeft
            | Self::BottomRight
            | Self::SeparatorDots => Axis::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Physical wiring direction of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedOrder {
    /// LED indices grow left to right, or top to bottom
    Forward,
    /// LED indices grow right to left, or bottom to top
    Reverse,
}

/// Contiguous range of physical LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedRange {
    pub start: u16,
    pub count: u16,
}

impl LedRange {
    pub const EMPTY: Self = Self { start: 0, count: 0 };

    pub const fn new(start: u16, count: u16) -> Self {
        Self { start, count }
    }

    /// One past the last LED index
    pub const fn end(self) -> usize {
        self.start as usize + self.count as usize
    }

    pub const fn is_empty(self) -> bool {
        self.count == 0
    }

    pub const fn contains(self, led: usize) -> bool {
        led >= self.start as usize && led < self.end()
    }

    pub const fn overlaps(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && (self.start as usize) < other.end()
            && (other.start as usize) < self.end()
    }

    pub const fn indices(self) -> Range<usize> {
        self.start as usize..self.end()
    }
}

/// A segment reference: role on a display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRef {
    pub role: SegmentRole,
    pub display: u8,
}

impl SegmentRef {
    pub const fn new(role: SegmentRole, display: u8) -> Self {
        Self { role, display }
    }
}

/// Resolved segment geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Position of the segment in its map; `u8::MAX` for [`Segment::EMPTY`]
    pub index: u8,
    pub range: LedRange,
    pub axis: Axis,
    pub order: LedOrder,
}

impl Segment {
    /// Sentinel returned for undefined segments
    pub const EMPTY: Self = Self {
        index: NO_SEGMENT,
        range: LedRange::EMPTY,
        axis: Axis::Horizontal,
        order: LedOrder::Forward,
    };

    pub const fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.range.count as usize
    }
}

/// Validated lookup from (role, display) to segment geometry
#[derive(Debug, Clone)]
pub struct SegmentMap {
    segments: Vec<(SegmentRef, Segment), MAX_SEGMENTS>,
    lookup: [[u8; ROLE_COUNT]; MAX_DISPLAYS],
    leds_per_segment: u16,
    led_count: usize,
}

impl SegmentMap {
    /// Build the map for a layout driving a strip of `frame_len` LEDs.
    ///
    /// Digit segments are allocated back to back in table order, each
    /// `leds_per_segment` long; auxiliary ranges follow them.
    pub fn new(layout: &Layout<'_>, frame_len: usize) -> Result<Self, LayoutError> {
        if layout.leds_per_segment == 0 {
            return Err(LayoutError::ZeroLedsPerSegment);
        }

        let mut map = Self {
            segments: Vec::new(),
            lookup: [[NO_SEGMENT; ROLE_COUNT]; MAX_DISPLAYS],
            leds_per_segment: layout.leds_per_segment,
            led_count: 0,
        };

        let mut next: usize = 0;
        for spec in layout.segments {
            if spec.role.is_auxiliary() {
                return Err(LayoutError::RoleMismatch(spec.segment_ref()));
            }
            map.insert(spec.segment_ref(), next, layout.leds_per_segment, spec.order)?;
            next += usize::from(layout.leds_per_segment);
        }
        for aux in layout.auxiliary {
            if !aux.role.is_auxiliary() {
                return Err(LayoutError::RoleMismatch(aux.segment_ref()));
            }
            if aux.count == 0 {
                return Err(LayoutError::EmptyAuxiliary(aux.segment_ref()));
            }
            map.insert(aux.segment_ref(), next, aux.count, aux.order)?;
            next += usize::from(aux.count);
        }

        if next > frame_len {
            return Err(LayoutError::OutOfBounds {
                required: next,
                available: frame_len,
            });
        }
        map.led_count = next;
        map.check_disjoint()?;

        Ok(map)
    }

    fn insert(
        &mut self,
        id: SegmentRef,
        start: usize,
        count: u16,
        order: LedOrder,
    ) -> Result<(), LayoutError> {
        let display = usize::from(id.display);
        if display >= MAX_DISPLAYS {
            return Err(LayoutError::DisplayOutOfRange(id.display));
        }
        if self.lookup[display][id.role.index()] != NO_SEGMENT {
            return Err(LayoutError::Duplicate(id));
        }
        let start = u16::try_from(start).map_err(|_| LayoutError::TooManyLeds)?;
        if usize::from(start) + usize::from(count) > usize::from(u16::MAX) {
            return Err(LayoutError::TooManyLeds);
        }

        #[allow(clippy::cast_possible_truncation)]
        let index = self.segments.len() as u8;
        let segment = Segment {
            index,
            range: LedRange::new(start, count),
            axis: id.role.axis(),
            order,
        };
        self.segments
            .push((id, segment))
            .map_err(|_| LayoutError::TooManySegments)?;
        self.lookup[display][id.role.index()] = index;
        Ok(())
    }

    fn check_disjoint(&self) -> Result<(), LayoutError> {
        for (i, (id, a)) in self.segments.iter().enumerate() {
            for (other, b) in self.segments.iter().skip(i + 1) {
                if a.range.overlaps(b.range) {
                    return Err(LayoutError::Overlap(*id, *other));
                }
            }
        }
        Ok(())
    }

    /// Resolve a segment; undefined pairs yield [`Segment::EMPTY`]
    pub fn resolve(&self, role: SegmentRole, display: u8) -> Segment {
        self.lookup
            .get(usize::from(display))
            .map(|roles| roles[role.index()])
            .and_then(|index| self.segments.get(usize::from(index)))
            .map(|(_, segment)| *segment)
            .unwrap_or(Segment::EMPTY)
    }

    /// Resolve a segment reference
    pub fn resolve_ref(&self, id: SegmentRef) -> Segment {
        self.resolve(id.role, id.display)
    }

    /// Whether the layout defines the segment
    pub fn contains(&self, id: SegmentRef) -> bool {
        !self.resolve_ref(id).is_empty()
    }

    /// All segments in allocation order
    pub fn iter(&self) -> impl Iterator<Item = &(SegmentRef, Segment)> {
        self.segments.iter()
    }

    /// Digit segments belonging to `display`
    pub fn display_segments(&self, display: u8) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(move |(id, _)| id.display == display && !id.role.is_auxiliary())
            .map(|(_, segment)| segment)
    }

    /// Every digit segment of every display
    pub fn digit_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|(id, _)| !id.role.is_auxiliary())
            .map(|(_, segment)| segment)
    }

    /// Segments with the given auxiliary role, on any display
    pub fn auxiliary_segments(&self, role: SegmentRole) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(move |(id, _)| id.role == role)
            .map(|(_, segment)| segment)
    }

    /// Number of displays with at least one digit segment
    pub fn display_count(&self) -> u8 {
        self.segments
            .iter()
            .filter(|(id, _)| !id.role.is_auxiliary())
            .map(|(id, _)| id.display + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub const fn leds_per_segment(&self) -> u16 {
        self.leds_per_segment
    }

    /// Number of LEDs covered by the layout
    pub const fn led_count(&self) -> usize {
        self.led_count
    }
}
