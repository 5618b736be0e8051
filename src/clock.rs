use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationCatalog, AnimationId, MorphStyle, RepeatMode, digit_morph};
use crate::animator::Animator;
use crate::color::{HOUR_COLOR, INTERIOR_COLOR, MINUTE_COLOR, Rgb, SEPARATOR_DOT_COLOR};
use crate::display::{
    ColorTarget, DEFAULT_BRIGHTNESS, DEFAULT_BRIGHTNESS_INTERPOLATION,
    DEFAULT_MIN_FLUSH_INTERVAL, DEFAULT_PROGRESS_SEGMENTS, Display, DisplayConfig, HOUR_DISPLAYS,
};
use crate::error::ClockError;
use crate::intent::{ClockIntent, IntentReceiver};
use crate::segment::{
    Glyph, Layout, MAX_DISPLAYS, SHELF_12H, SHELF_12H_WITH_EXTRAS, SegmentRole,
};
use crate::transform::DEFAULT_AFTERGLOW;

/// Durations driving the clock
#[derive(Debug, Clone, Copy)]
pub struct ClockTimings {
    /// Morph of one display to its next digit
    pub digit_morph: Duration,
    /// Extra hold between two count-up steps
    pub count_up_pause: Duration,
    /// One pass of the loading animations
    pub loading: Duration,
    pub brightness_interpolation: Duration,
    /// Smallest interval between two frames sent to the strip
    pub min_flush_interval: Duration,
}

impl ClockTimings {
    pub const DEFAULT: Self = Self {
        digit_morph: Duration::from_millis(900),
        count_up_pause: Duration::from_millis(100),
        loading: Duration::from_millis(3000),
        brightness_interpolation: DEFAULT_BRIGHTNESS_INTERPOLATION,
        min_flush_interval: DEFAULT_MIN_FLUSH_INTERVAL,
    };
}

impl Default for ClockTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Separator dot flashing
#[derive(Debug, Clone, Copy)]
pub struct DotConfig {
    /// Display the dots are attached to
    pub display: u8,
    /// Duration of one fade in and out
    pub flash_speed: Duration,
    /// Time between two flashes
    pub flash_interval: Duration,
}

impl DotConfig {
    pub const fn new(display: u8) -> Self {
        Self {
            display,
            flash_speed: Duration::from_millis(2000),
            flash_interval: Duration::from_millis(4000),
        }
    }
}

/// Initial segment colors
#[derive(Debug, Clone, Copy)]
pub struct ClockColors {
    pub hours: Rgb,
    pub minutes: Rgb,
    pub interior: Rgb,
    pub separator_dots: Rgb,
}

impl ClockColors {
    pub const DEFAULT: Self = Self {
        hours: HOUR_COLOR,
        minutes: MINUTE_COLOR,
        interior: INTERIOR_COLOR,
        separator_dots: SEPARATOR_DOT_COLOR,
    };
}

impl Default for ClockColors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the clock
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig<'a> {
    pub layout: Layout<'a>,
    pub timings: ClockTimings,
    pub colors: ClockColors,
    pub morph: MorphStyle,
    /// Soft edge of sliding fronts, as a fraction of a segment
    pub afterglow: f32,
    pub brightness: u8,
    pub use_24_hour_format: bool,
    /// Leave the higher hour digit dark instead of showing a zero
    pub blank_leading_zero: bool,
    /// `None` disables separator dot flashing
    pub separator_dots: Option<DotConfig>,
    pub progress_segments: usize,
}

impl ClockConfig<'static> {
    /// The 12 hour shelf clock without interior lights or dots
    pub const SHELF: Self = Self {
        layout: SHELF_12H,
        timings: ClockTimings::DEFAULT,
        colors: ClockColors::DEFAULT,
        morph: MorphStyle::DEFAULT,
        afterglow: DEFAULT_AFTERGLOW,
        brightness: DEFAULT_BRIGHTNESS,
        use_24_hour_format: false,
        blank_leading_zero: true,
        separator_dots: None,
        progress_segments: DEFAULT_PROGRESS_SEGMENTS,
    };

    /// The 12 hour shelf clock with interior lights and flashing dots
    pub const SHELF_WITH_EXTRAS: Self = Self {
        layout: SHELF_12H_WITH_EXTRAS,
        separator_dots: Some(DotConfig::new(2)),
        ..Self::SHELF
    };
}

impl ClockConfig<'_> {
    fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            afterglow: self.afterglow,
            brightness: self.brightness,
            brightness_interpolation: self.timings.brightness_interpolation,
            min_flush_interval: self.timings.min_flush_interval,
            progress_segments: self.progress_segments,
        }
    }
}

/// Digits counting up towards a time, one morph at a time
#[derive(Debug, Clone, Copy)]
struct CountUp {
    current: [u8; 4],
    target: [u8; 4],
    /// `None` until the first tick after the count-up started
    next_step: Option<Instant>,
}

/// The clock: segment layout, animations and frame output in one context
///
/// Nothing here is shared: every operation takes `&mut self`, and other
/// contexts reach the clock through an intent queue drained on the render
/// loop.
pub struct Clock<const LEDS: usize> {
    display: Display<LEDS>,
    animator: Animator,
    /// What each display shows, or is morphing to
    glyphs: [Glyph; MAX_DISPLAYS],
    timings: ClockTimings,
    morph: MorphStyle,
    use_24_hour_format: bool,
    blank_leading_zero: bool,
    dots: Option<DotConfig>,
    dots_flashing: bool,
    next_dot_flash: Option<Instant>,
    count_up: Option<CountUp>,
    /// Time of the last tick, `None` before the first
    now: Option<Instant>,
}

impl<const LEDS: usize> Clock<LEDS> {
    pub fn new(config: &ClockConfig<'_>) -> Result<Self, ClockError> {
        let mut display = Display::new(&config.layout, &config.display_config())?;
        let separator = config
            .separator_dots
            .map(|dots| (dots.display, dots.flash_speed));
        let catalog = AnimationCatalog::builtin(display.map(), config.timings.loading, separator)?;

        display.set_color(ColorTarget::Hours, config.colors.hours);
        display.set_color(ColorTarget::Minutes, config.colors.minutes);
        display.set_color(ColorTarget::SeparatorDots, config.colors.separator_dots);
        display.set_color(ColorTarget::Interior, config.colors.interior);

        Ok(Self {
            display,
            animator: Animator::new(catalog),
            glyphs: [Glyph::BLANK; MAX_DISPLAYS],
            timings: config.timings,
            morph: config.morph,
            use_24_hour_format: config.use_24_hour_format,
            blank_leading_zero: config.blank_leading_zero,
            dots: config.separator_dots,
            dots_flashing: config.separator_dots.is_some(),
            next_dot_flash: None,
            count_up: None,
            now: None,
        })
    }

    pub const fn display(&self) -> &Display<LEDS> {
        &self.display
    }

    pub const fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Glyph shown on `display`, or the one it is morphing to
    pub fn glyph(&self, display: u8) -> Option<Glyph> {
        self.glyphs.get(usize::from(display)).copied()
    }

    /// Time of the last tick, `None` before the first
    pub const fn now(&self) -> Option<Instant> {
        self.now
    }

    // Animation playback

    pub fn play_animation(&mut self, id: AnimationId) -> Result<(), ClockError> {
        self.start(id, RepeatMode::Once)
    }

    /// Play `id` over and over until finished or stopped
    pub fn loop_animation(&mut self, id: AnimationId) -> Result<(), ClockError> {
        self.start(id, RepeatMode::Loop)
    }

    /// Let a looping animation end after its current pass
    pub fn finish_animation(&mut self, id: AnimationId) -> bool {
        self.animator.finish(id)
    }

    /// Stop `id` immediately, leaving its segments as they are
    pub fn stop_animation(&mut self, id: AnimationId) -> bool {
        let stopped = self.animator.stop(id);
        if stopped {
            self.resync_glyphs(id);
        }
        stopped
    }

    pub fn is_playing(&self, id: AnimationId) -> bool {
        self.animator.is_playing(id)
    }

    pub fn show_loading_animation(&mut self) -> Result<(), ClockError> {
        self.loop_animation(AnimationId::Loading)
    }

    /// End the loading animation once its current pass completes
    pub fn stop_loading_animation(&mut self) -> bool {
        self.finish_animation(AnimationId::Loading)
    }

    pub fn is_loading_animation_finished(&self) -> bool {
        !self.is_playing(AnimationId::Loading)
    }

    fn start(&mut self, id: AnimationId, repeat: RepeatMode) -> Result<(), ClockError> {
        self.animator.play(id, repeat)?;
        if !matches!(id, AnimationId::Digit(_)) {
            self.settle_glyphs(id);
        }
        Ok(())
    }

    /// Record the strokes `id` leaves lit once it completes
    fn settle_glyphs(&mut self, id: AnimationId) {
        let Some(animation) = self.animator.catalog().get(id) else {
            return;
        };
        for slot in animation.steps().iter().flat_map(|step| step.slots()) {
            let Some(segment) = slot.segment else {
                continue;
            };
            let Some(glyph) = self.glyphs.get_mut(usize::from(segment.display)) else {
                continue;
            };
            match slot.transform.final_level() {
                Some(0) => *glyph = glyph.without(segment.role),
                Some(_) => *glyph = glyph.with(segment.role),
                None => {}
            }
        }
    }

    /// Record what the frame shows on every display `id` draws on.
    ///
    /// A stopped animation leaves its strokes wherever they were, which
    /// need not be the glyph recorded when it started.
    fn resync_glyphs(&mut self, id: AnimationId) {
        let Some(animation) = self.animator.catalog().get(id) else {
            return;
        };
        let mut touched = [false; MAX_DISPLAYS];
        for slot in animation.steps().iter().flat_map(|step| step.slots()) {
            if let Some(flag) = slot
                .segment
                .and_then(|segment| touched.get_mut(usize::from(segment.display)))
            {
                *flag = true;
            }
        }
        for (display, (glyph, drawn)) in (0..).zip(self.glyphs.iter_mut().zip(touched)) {
            if drawn {
                *glyph = self.display.lit_glyph(display);
            }
        }
    }

    // Digits

    /// Morph `display` to a decimal digit
    pub fn display_digit(&mut self, display: u8, value: u8) -> Result<(), ClockError> {
        let glyph = Glyph::digit(value).ok_or(ClockError::InvalidDigit(value))?;
        self.show_glyph(display, glyph)
    }

    /// Morph `display` to dark
    pub fn blank_display(&mut self, display: u8) -> Result<(), ClockError> {
        self.show_glyph(display, Glyph::BLANK)
    }

    /// Show a time, morphing only the digits that change
    pub fn display_time(&mut self, hours: u8, minutes: u8) -> Result<(), ClockError> {
        self.count_up = None;
        let digits = self.time_digits(hours, minutes);
        self.show_digits(digits)
    }

    /// Count every digit up from zero to the given time in lock-step
    pub fn start_count_up(&mut self, hours: u8, minutes: u8) -> Result<(), ClockError> {
        let target = self.time_digits(hours, minutes);
        let current = [0; 4];
        self.count_up = (current != target).then_some(CountUp {
            current,
            target,
            next_step: self.now.map(|now| now + self.count_up_period()),
        });
        self.show_digits(current)
    }

    pub fn is_counting_up(&self) -> bool {
        self.count_up.is_some()
    }

    /// Show the same digit on every display
    pub fn show_test_digit(&mut self, value: u8) -> Result<(), ClockError> {
        self.count_up = None;
        for display in 0..self.display.map().display_count() {
            self.display_digit(display, value)?;
        }
        Ok(())
    }

    /// Digits of a time, lower minute first
    fn time_digits(&self, hours: u8, minutes: u8) -> [u8; 4] {
        let hours = if self.use_24_hour_format {
            hours % 24
        } else {
            match hours % 12 {
                0 => 12,
                hours => hours,
            }
        };
        let minutes = minutes % 60;
        [minutes % 10, minutes / 10, hours % 10, hours / 10]
    }

    fn show_digits(&mut self, digits: [u8; 4]) -> Result<(), ClockError> {
        let displays = self.display.map().display_count();
        for (display, value) in (0..displays).zip(digits) {
            if display == HOUR_DISPLAYS[1] && value == 0 && self.blank_leading_zero {
                self.blank_display(display)?;
            } else {
                self.display_digit(display, value)?;
            }
        }
        Ok(())
    }

    fn show_glyph(&mut self, display: u8, glyph: Glyph) -> Result<(), ClockError> {
        if display >= self.display.map().display_count() {
            return Err(ClockError::DisplayOutOfRange(display));
        }
        let index = usize::from(display);
        let from = self.glyphs[index];
        if from == glyph {
            return Ok(());
        }

        let id = AnimationId::digit(display).ok_or(ClockError::DisplayOutOfRange(display))?;
        let morph = digit_morph(
            self.display.map(),
            display,
            from,
            glyph,
            self.timings.digit_morph,
            self.morph,
        )?;
        self.animator.catalog_mut().insert(id, morph)?;
        self.animator.play(id, RepeatMode::Once)?;
        self.glyphs[index] = glyph;
        Ok(())
    }

    fn count_up_period(&self) -> Duration {
        self.timings.digit_morph + self.timings.count_up_pause
    }

    fn run_count_up(&mut self, now: Instant) -> Result<(), ClockError> {
        let Some(mut count_up) = self.count_up else {
            return Ok(());
        };
        let Some(next_step) = count_up.next_step else {
            count_up.next_step = Some(now + self.count_up_period());
            self.count_up = Some(count_up);
            return Ok(());
        };
        if now < next_step {
            return Ok(());
        }

        for (current, target) in count_up.current.iter_mut().zip(count_up.target) {
            if *current < target {
                *current += 1;
            }
        }
        count_up.next_step = Some(now + self.count_up_period());
        self.count_up = (count_up.current != count_up.target).then_some(count_up);
        self.show_digits(count_up.current)
    }

    // Colors and brightness

    pub fn set_color(&mut self, target: ColorTarget, color: Rgb) {
        self.display.set_color(target, color);
    }

    pub fn set_segment_color(&mut self, role: SegmentRole, display: u8, color: Rgb) {
        self.display.set_segment_color(role, display, color);
    }

    pub fn set_display_color(&mut self, display: u8, color: Rgb) {
        self.display.set_display_color(display, color);
    }

    pub fn set_all_segment_colors(&mut self, color: Rgb) {
        self.display.set_all_segment_colors(color);
    }

    pub fn set_global_brightness(&mut self, level: u8, immediately: bool) {
        self.display.set_global_brightness(level, immediately);
    }

    /// Turn off every digit segment, stopping what animates them
    pub fn turn_all_segments_off(&mut self) {
        self.count_up = None;
        self.animator.stop(AnimationId::Loading);
        self.animator.stop(AnimationId::LoadingProgress);
        for id in (0..=u8::MAX).map_while(AnimationId::digit) {
            self.animator.stop(id);
        }
        self.glyphs = [Glyph::BLANK; MAX_DISPLAYS];
        self.display.turn_all_segments_off();
    }

    /// Stop every animation and turn off every LED
    pub fn turn_all_off(&mut self) {
        self.count_up = None;
        self.animator.stop_all();
        self.glyphs = [Glyph::BLANK; MAX_DISPLAYS];
        self.display.turn_all_off();
    }

    // Separator dots

    /// Enable or disable the periodic dot flash. Disabling turns the dots
    /// off.
    pub fn set_separator_flashing(&mut self, enabled: bool) {
        self.dots_flashing = enabled && self.dots.is_some();
        self.next_dot_flash = None;
        if !self.dots_flashing {
            self.animator.stop(AnimationId::SeparatorFlash);
            self.display
                .set_auxiliary_lit(SegmentRole::SeparatorDots, false);
        }
    }

    fn run_separator(&mut self, now: Instant) {
        let Some(dots) = self.dots else {
            return;
        };
        if !self.dots_flashing {
            return;
        }
        if self.next_dot_flash.is_some_and(|next| now < next) {
            return;
        }
        self.next_dot_flash = Some(now + dots.flash_interval);
        if let Err(_error) = self.animator.play(AnimationId::SeparatorFlash, RepeatMode::Once) {
            #[cfg(feature = "esp32-log")]
            println!("[clock] separator flash failed: {}", _error);
            self.dots_flashing = false;
        }
    }

    // Progress

    /// Replace the digits with an empty progress bar for `total` units
    pub fn display_progress(&mut self, total: u32) {
        self.turn_all_segments_off();
        self.display.display_progress(total);
    }

    pub fn update_progress(&mut self, done: u32) {
        self.display.update_progress(done);
    }

    // Intents

    /// Apply one queued request
    pub fn apply_intent(&mut self, intent: ClockIntent) -> Result<(), ClockError> {
        match intent {
            ClockIntent::Play(id) => self.play_animation(id)?,
            ClockIntent::Loop(id) => self.loop_animation(id)?,
            ClockIntent::Finish(id) => {
                self.finish_animation(id);
            }
            ClockIntent::Stop(id) => {
                self.stop_animation(id);
            }
            ClockIntent::DisplayTime { hours, minutes } => self.display_time(hours, minutes)?,
            ClockIntent::CountUp { hours, minutes } => self.start_count_up(hours, minutes)?,
            ClockIntent::DisplayDigit { display, value } => self.display_digit(display, value)?,
            ClockIntent::BlankDisplay(display) => self.blank_display(display)?,
            ClockIntent::SetColor { target, color } => self.set_color(target, color),
            ClockIntent::SetBrightness { level, immediately } => {
                self.set_global_brightness(level, immediately);
            }
            ClockIntent::StartProgress { total } => self.display_progress(total),
            ClockIntent::UpdateProgress { done } => self.update_progress(done),
            ClockIntent::TurnAllSegmentsOff => self.turn_all_segments_off(),
            ClockIntent::TurnAllOff => self.turn_all_off(),
        }
        Ok(())
    }

    /// Apply every queued intent, oldest first. Intents that fail are
    /// dropped.
    pub fn process_intents<const SIZE: usize>(&mut self, intents: &IntentReceiver<'_, SIZE>) {
        for intent in intents.drain() {
            if let Err(_error) = self.apply_intent(intent) {
                #[cfg(feature = "esp32-log")]
                println!("[clock] dropped {:?}: {}", intent, _error);
            }
        }
    }

    // Frame loop

    /// Advance the clock to `now`.
    ///
    /// Returns the composed frame when one is due for the strip, `None` when
    /// the last flush was too recent. State advances either way.
    ///
    /// Animations the clock starts on its own (count-up steps, dot flashes)
    /// begin after the running ones have advanced, so they start from zero.
    pub fn tick(&mut self, now: Instant) -> Option<&[Rgb]> {
        self.now = Some(now);
        self.display.tick(now);
        self.animator.tick(now, &mut self.display);

        if let Err(_error) = self.run_count_up(now) {
            #[cfg(feature = "esp32-log")]
            println!("[clock] count up stopped: {}", _error);
            self.count_up = None;
        }
        self.run_separator(now);

        self.display.flush(now)
    }
}
