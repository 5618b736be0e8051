//! Named colors used by the clock defaults (HTML color values)

use super::{Rgb, rgb_from_u32};

pub const BLACK: Rgb = rgb_from_u32(0x00_0000);
pub const WHITE: Rgb = rgb_from_u32(0xFF_FFFF);
pub const RED: Rgb = rgb_from_u32(0xFF_0000);
pub const GREEN: Rgb = rgb_from_u32(0x00_8000);
pub const BLUE: Rgb = rgb_from_u32(0x00_00FF);
pub const YELLOW: Rgb = rgb_from_u32(0xFF_FF00);
pub const ORANGE: Rgb = rgb_from_u32(0xFF_A500);
pub const PURPLE: Rgb = rgb_from_u32(0x80_0080);
pub const DARK_BLUE: Rgb = rgb_from_u32(0x00_008B);
pub const DARK_ORANGE: Rgb = rgb_from_u32(0xFF_8C00);
pub const TAN: Rgb = rgb_from_u32(0xD2_B48C);

/// Default color of the hour digits
pub const HOUR_COLOR: Rgb = DARK_BLUE;
/// Default color of the minute digits
pub const MINUTE_COLOR: Rgb = DARK_ORANGE;
/// Default color of the interior (down) lights
pub const INTERIOR_COLOR: Rgb = TAN;
/// Default color of the separator dots
pub const SEPARATOR_DOT_COLOR: Rgb = BLUE;
/// Color shown while waiting for the network
pub const CONNECTING_COLOR: Rgb = BLUE;
/// Color of the progress bar during firmware updates
pub const UPDATE_COLOR: Rgb = ORANGE;
/// Color shown after an unrecoverable condition
pub const ERROR_COLOR: Rgb = RED;
