//! Desktop preview app for the segment clock
//!
//! Draws the shelf layout in a window and drives the clock through its
//! intent queue, the same way firmware tasks do.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_segment_clock::{
    AnimationId, Clock, ClockConfig, ClockIntent, ColorTarget, Instant, IntentQueue,
    IntentSender, LedOrder, Rgb, SHELF_12H_WITH_EXTRAS_LEDS, SegmentMap, SegmentRole,
};

/// Size of each LED square in pixels
const LED_SIZE: f32 = 8.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Empty columns between two digits, in LED pitches
const DIGIT_GAP: f32 = 4.0;

const INTENT_QUEUE_SIZE: usize = 16;

static INTENTS: IntentQueue<INTENT_QUEUE_SIZE> = IntentQueue::new();

type PreviewClock = Clock<SHELF_12H_WITH_EXTRAS_LEDS>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 620.0])
            .with_title("Segment Clock Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-segment-clock-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()?))),
    )
}

struct PreviewApp {
    clock: PreviewClock,
    intent_sender: IntentSender<'static, INTENT_QUEUE_SIZE>,
    /// Last frame handed out by the clock
    frame: Vec<Rgb>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    last_frame: StdInstant,
    playing: bool,
    time_scale: f32,

    hours: u8,
    minutes: u8,
    brightness: u8,
    hour_color: [u8; 3],
    minute_color: [u8; 3],
    progress_total: u32,
    progress_done: u32,
    test_digit: u8,
    led_size: f32,
    last_error: Option<String>,
}

impl PreviewApp {
    fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let config = ClockConfig::SHELF_WITH_EXTRAS;
        let clock = PreviewClock::new(&config).map_err(|error| error.to_string())?;

        Ok(Self {
            clock,
            intent_sender: INTENTS.sender(),
            frame: vec![Rgb::default(); SHELF_12H_WITH_EXTRAS_LEDS],
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            hours: 12,
            minutes: 34,
            brightness: config.brightness,
            hour_color: rgb_array(config.colors.hours),
            minute_color: rgb_array(config.colors.minutes),
            progress_total: 100,
            progress_done: 0,
            test_digit: 8,
            led_size: LED_SIZE,
            last_error: None,
        })
    }

    fn send(&mut self, intent: ClockIntent) {
        if let Err(error) = self.intent_sender.try_send(intent) {
            self.last_error = Some(format!("queue full, dropped {:?}", error.0));
        }
    }

    fn reset_time(&mut self) {
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
    }

    /// Advance synthetic time from the wall clock and the speed slider
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = if delta_ms.is_finite() {
                delta_ms.max(0.0) as u64
            } else {
                0
            };
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    fn render(&mut self) {
        self.clock.process_intents(&INTENTS.receiver());
        if let Some(frame) = self.clock.tick(Instant::from_millis(self.t_ms)) {
            self.frame.clear();
            self.frame.extend_from_slice(frame);
        }
    }

    fn playback_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("⏮ Reset").clicked() {
                self.reset_time();
            }
            if ui
                .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                .clicked()
            {
                self.playing = !self.playing;
            }
            let secs = self.t_ms / 1000;
            let ms = self.t_ms % 1000;
            ui.label(format!("Time: {secs}.{ms:03}s"));
        });
        ui.horizontal(|ui| {
            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
            ui.label("Size:");
            ui.add(egui::Slider::new(&mut self.led_size, 2.0..=16.0));
        });
    }

    fn time_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Time:");
            ui.add(egui::DragValue::new(&mut self.hours).range(0u8..=23u8));
            ui.label(":");
            ui.add(egui::DragValue::new(&mut self.minutes).range(0u8..=59u8));
            if ui.button("Show").clicked() {
                self.send(ClockIntent::DisplayTime {
                    hours: self.hours,
                    minutes: self.minutes,
                });
            }
            if ui.button("Count up").clicked() {
                self.send(ClockIntent::CountUp {
                    hours: self.hours,
                    minutes: self.minutes,
                });
            }
        });
        ui.horizontal(|ui| {
            ui.label("Test digit:");
            ui.add(egui::DragValue::new(&mut self.test_digit).range(0u8..=9u8));
            if ui.button("Show on all").clicked()
                && let Err(error) = self.clock.show_test_digit(self.test_digit)
            {
                self.last_error = Some(error.to_string());
            }
        });
    }

    fn animation_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Loading:");
            if ui.button("Once").clicked() {
                self.send(ClockIntent::Play(AnimationId::Loading));
            }
            if ui.button("Loop").clicked() {
                self.send(ClockIntent::Loop(AnimationId::Loading));
            }
            if ui.button("Finish").clicked() {
                self.send(ClockIntent::Finish(AnimationId::Loading));
            }
            if ui.button("Loading progress").clicked() {
                self.send(ClockIntent::Loop(AnimationId::LoadingProgress));
            }
        });
        ui.horizontal(|ui| {
            ui.label("Progress:");
            ui.add(egui::DragValue::new(&mut self.progress_total).range(0u32..=1000u32));
            if ui.button("Start").clicked() {
                self.progress_done = 0;
                self.send(ClockIntent::StartProgress {
                    total: self.progress_total,
                });
            }
            let old_done = self.progress_done;
            ui.add(egui::Slider::new(
                &mut self.progress_done,
                0..=self.progress_total,
            ));
            if self.progress_done != old_done {
                self.send(ClockIntent::UpdateProgress {
                    done: self.progress_done,
                });
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Segments off").clicked() {
                self.send(ClockIntent::TurnAllSegmentsOff);
            }
            if ui.button("All off").clicked() {
                self.send(ClockIntent::TurnAllOff);
            }
        });
    }

    fn color_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Brightness:");
            let old_brightness = self.brightness;
            ui.add(egui::Slider::new(&mut self.brightness, 0u8..=255u8));
            if self.brightness != old_brightness {
                self.send(ClockIntent::SetBrightness {
                    level: self.brightness,
                    immediately: true,
                });
            }

            ui.add_space(8.0);
            ui.label("Hours:");
            if ui.color_edit_button_srgb(&mut self.hour_color).changed() {
                self.send(ClockIntent::SetColor {
                    target: ColorTarget::Hours,
                    color: rgb(self.hour_color),
                });
            }
            ui.label("Minutes:");
            if ui.color_edit_button_srgb(&mut self.minute_color).changed() {
                self.send(ClockIntent::SetColor {
                    target: ColorTarget::Minutes,
                    color: rgb(self.minute_color),
                });
            }
        });
    }

    fn paint_shelf(&self, ui: &mut egui::Ui) {
        let map = self.clock.display().map();
        let pitch = self.led_size + LED_GAP;
        let per_segment = f32::from(map.leds_per_segment());
        let cell = per_segment + 2.0 + DIGIT_GAP;
        let columns = f32::from(map.display_count().max(1));

        let size = egui::vec2(
            columns * cell * pitch,
            (2.0 * per_segment + 6.0) * pitch,
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let origin = response.rect.min;

        for (id, segment) in map.iter() {
            let count = segment.len();
            for (offset, led) in segment.range.indices().enumerate() {
                let Some(pixel) = self.frame.get(led) else {
                    continue;
                };
                let along = match segment.order {
                    LedOrder::Forward => offset,
                    LedOrder::Reverse => count - 1 - offset,
                };
                #[allow(clippy::cast_precision_loss)]
                let (x, y) = led_position(map, id.role, id.display, along as f32, cell);
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(x * pitch, y * pitch),
                    egui::vec2(self.led_size, self.led_size),
                );
                painter.rect_filled(rect, 2.0, egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b));
            }
        }
    }
}

/// Grid position of one LED, in LED pitches from the top left corner.
/// Digits run right to left: display 0 is the rightmost.
fn led_position(
    map: &SegmentMap,
    role: SegmentRole,
    display: u8,
    along: f32,
    cell: f32,
) -> (f32, f32) {
    let n = f32::from(map.leds_per_segment());
    let column = f32::from(map.display_count().saturating_sub(1).saturating_sub(display));
    let left = column * cell;
    let right = left + n + 1.0;

    match role {
        SegmentRole::Top => (left + 1.0 + along, 0.0),
        SegmentRole::Center => (left + 1.0 + along, n + 1.0),
        SegmentRole::Bottom => (left + 1.0 + along, 2.0 * n + 2.0),
        SegmentRole::TopLeft => (left, 1.0 + along),
        SegmentRole::TopRight => (right, 1.0 + along),
        SegmentRole::BottomLeft => (left, n + 2.0 + along),
        SegmentRole::BottomRight => (right, n + 2.0 + along),
        SegmentRole::Interior => (left + 1.0 + along, 2.0 * n + 4.0),
        SegmentRole::SeparatorDots => {
            (right + DIGIT_GAP / 2.0 + 1.0, (n + 1.0) * (1.0 + along) / 1.5)
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Rgb {
    Rgb { r, g, b }
}

fn rgb_array(color: Rgb) -> [u8; 3] {
    [color.r, color.g, color.b]
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.render();
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.playback_controls(ui);
            ui.add_space(8.0);
            self.time_controls(ui);
            ui.add_space(4.0);
            self.animation_controls(ui);
            ui.add_space(4.0);
            self.color_controls(ui);
            if let Some(error) = &self.last_error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
            ui.add_space(16.0);
            self.paint_shelf(ui);
        });
    }
}
