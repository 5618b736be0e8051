//! Easing curves
//!
//! Every curve maps a progress fraction in `[0, 1]` to an eased fraction.
//! The endpoints are fixed (`0 -> 0`, `1 -> 1`); back, bounce and elastic
//! curves leave `[0, 1]` on the way, so whatever consumes the eased value
//! has to clamp its own output.

use core::f32::consts::{FRAC_PI_2, PI};

const BACK_OVERSHOOT: f32 = 1.701_58;
const ELASTIC_PERIOD: f32 = 0.3;

/// Which end of the curve is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EaseMode {
    /// Slow start
    #[default]
    In,
    /// Slow end
    Out,
    /// Slow start and end
    InOut,
}

/// Easing function tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Identity; the default when a step slot does not specify an easing
    #[default]
    None,
    Linear,
    Quadratic(EaseMode),
    Cubic(EaseMode),
    Sine(EaseMode),
    Exponential(EaseMode),
    Circular(EaseMode),
    Back(EaseMode),
    Bounce(EaseMode),
    Elastic(EaseMode),
}

macro_rules! all_modes {
    ($($curve:ident),*) => {
        [
            Easing::None,
            Easing::Linear,
            $(
                Easing::$curve(EaseMode::In),
                Easing::$curve(EaseMode::Out),
                Easing::$curve(EaseMode::InOut),
            )*
        ]
    };
}

impl Easing {
    /// Every easing known to the engine
    pub const ALL: [Self; 26] = all_modes![
        Quadratic,
        Cubic,
        Sine,
        Exponential,
        Circular,
        Back,
        Bounce,
        Elastic
    ];

    /// Map `t` to the eased progress.
    ///
    /// `t` is clamped to `[0, 1]`; the result is not.
    pub fn ease(self, t: f32) -> f32 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let (curve, mode): (fn(f32) -> f32, EaseMode) = match self {
            Self::None | Self::Linear => return t,
            Self::Quadratic(mode) => (quadratic_in, mode),
            Self::Cubic(mode) => (cubic_in, mode),
            Self::Sine(mode) => (sine_in, mode),
            Self::Exponential(mode) => (exponential_in, mode),
            Self::Circular(mode) => (circular_in, mode),
            Self::Back(mode) => (back_in, mode),
            Self::Bounce(mode) => (bounce_in, mode),
            Self::Elastic(mode) => (elastic_in, mode),
        };

        match mode {
            EaseMode::In => curve(t),
            EaseMode::Out => 1.0 - curve(1.0 - t),
            EaseMode::InOut => {
                if t < 0.5 {
                    curve(2.0 * t) / 2.0
                } else {
                    1.0 - curve(2.0 - 2.0 * t) / 2.0
                }
            }
        }
    }

    /// Whether the curve may leave `[0, 1]` between the endpoints
    pub const fn overshoots(self) -> bool {
        matches!(self, Self::Back(_) | Self::Bounce(_) | Self::Elastic(_))
    }
}

fn quadratic_in(t: f32) -> f32 {
    t * t
}

fn cubic_in(t: f32) -> f32 {
    t * t * t
}

fn sine_in(t: f32) -> f32 {
    1.0 - libm::cosf(t * FRAC_PI_2)
}

fn exponential_in(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    libm::powf(2.0, 10.0 * (t - 1.0))
}

fn circular_in(t: f32) -> f32 {
    1.0 - libm::sqrtf((1.0 - t * t).max(0.0))
}

fn back_in(t: f32) -> f32 {
    t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT)
}

fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984_375
    }
}

fn elastic_in(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let shift = ELASTIC_PERIOD / 4.0;
    let t = t - 1.0;
    -libm::powf(2.0, 10.0 * t) * libm::sinf((t - shift) * 2.0 * PI / ELASTIC_PERIOD)
}
