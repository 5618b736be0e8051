//! Progress bar drawn with digit strokes
//!
//! The bar is an ordered path of segments. A fraction of the path is lit,
//! the boundary segment partially, each segment filling in the direction
//! given by the path.

use heapless::Vec;

use crate::segment::SegmentRole::{BottomLeft, BottomRight, Top, TopLeft, TopRight};
use crate::segment::{SegmentMap, SegmentRef, SegmentRole};
use crate::transform::Direction::{self, Down, Right, Up};

/// Default number of segments on the bar
pub const DEFAULT_PROGRESS_SEGMENTS: usize = 14;

pub const MAX_PROGRESS_SEGMENTS: usize = 16;

/// A square wave running from the leftmost display to the rightmost
const PROGRESS_PATH: [(SegmentRole, u8, Direction); DEFAULT_PROGRESS_SEGMENTS] = [
    (BottomRight, 3, Up),
    (TopRight, 3, Up),
    (BottomLeft, 2, Up),
    (TopLeft, 2, Up),
    (Top, 2, Right),
    (TopRight, 2, Down),
    (BottomLeft, 1, Up),
    (TopLeft, 1, Up),
    (Top, 1, Right),
    (TopRight, 1, Down),
    (BottomLeft, 0, Up),
    (TopLeft, 0, Up),
    (Top, 0, Right),
    (TopRight, 0, Down),
];

#[derive(Debug, Clone)]
pub struct ProgressBar {
    path: Vec<(SegmentRef, Direction), MAX_PROGRESS_SEGMENTS>,
    done: u32,
    total: u32,
}

impl ProgressBar {
    /// Bar over the first `segments` path entries the layout defines
    pub fn new(map: &SegmentMap, segments: usize) -> Self {
        let path = PROGRESS_PATH
            .into_iter()
            .map(|(role, display, direction)| (SegmentRef::new(role, display), direction))
            .filter(|(segment, _)| map.contains(*segment))
            .take(segments.min(MAX_PROGRESS_SEGMENTS))
            .collect();
        Self {
            path,
            done: 0,
            total: 0,
        }
    }

    /// Reset the bar for `total` units of work
    pub fn start(&mut self, total: u32) {
        self.total = total;
        self.done = 0;
    }

    pub fn update(&mut self, done: u32) {
        self.done = done.min(self.total);
    }

    pub const fn done(&self) -> u32 {
        self.done
    }

    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Completed fraction; zero while no work is announced
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f32 / self.total as f32
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Path entries with the fill of each, in `[0, 1]`
    pub fn segments(&self) -> impl Iterator<Item = (SegmentRef, Direction, f32)> + '_ {
        let filled = self.fraction() * self.path.len() as f32;
        self.path
            .iter()
            .enumerate()
            .map(move |(k, (segment, direction))| {
                (*segment, *direction, (filled - k as f32).clamp(0.0, 1.0))
            })
    }
}
