use super::SegmentRole;

/// Set of lit digit strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph(u8);

const fn bit(role: SegmentRole) -> u8 {
    1 << role as u8
}

const fn strokes(roles: &[SegmentRole]) -> Glyph {
    let mut bits = 0;
    let mut i = 0;
    while i < roles.len() {
        bits |= bit(roles[i]);
        i += 1;
    }
    Glyph(bits)
}

use super::SegmentRole::{Bottom, BottomLeft, BottomRight, Center, Top, TopLeft, TopRight};

const DIGITS: [Glyph; 10] = [
    strokes(&[Top, TopLeft, TopRight, BottomLeft, BottomRight, Bottom]),
    strokes(&[TopRight, BottomRight]),
    strokes(&[Top, TopRight, Center, BottomLeft, Bottom]),
    strokes(&[Top, TopRight, Center, BottomRight, Bottom]),
    strokes(&[TopLeft, TopRight, Center, BottomRight]),
    strokes(&[Top, TopLeft, Center, BottomRight, Bottom]),
    strokes(&[Top, TopLeft, Center, BottomLeft, BottomRight, Bottom]),
    strokes(&[Top, TopRight, BottomRight]),
    strokes(&[Top, TopLeft, TopRight, Center, BottomLeft, BottomRight, Bottom]),
    strokes(&[Top, TopLeft, TopRight, Center, BottomRight, Bottom]),
];

impl Glyph {
    /// Nothing lit
    pub const BLANK: Self = Self(0);

    /// Glyph of a decimal digit, `None` above 9
    pub const fn digit(value: u8) -> Option<Self> {
        if value < 10 {
            Some(DIGITS[value as usize])
        } else {
            None
        }
    }

    pub const fn contains(self, role: SegmentRole) -> bool {
        !role.is_auxiliary() && self.0 & bit(role) != 0
    }

    /// The glyph with `role` lit; auxiliary roles are ignored
    #[must_use]
    pub const fn with(self, role: SegmentRole) -> Self {
        if role.is_auxiliary() {
            self
        } else {
            Self(self.0 | bit(role))
        }
    }

    #[must_use]
    pub const fn without(self, role: SegmentRole) -> Self {
        if role.is_auxiliary() {
            self
        } else {
            Self(self.0 & !bit(role))
        }
    }

    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Lit strokes in [`SegmentRole::DIGIT`] order
    pub fn roles(self) -> impl Iterator<Item = SegmentRole> {
        SegmentRole::DIGIT
            .into_iter()
            .filter(move |role| self.contains(*role))
    }
}
