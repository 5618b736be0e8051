mod tests {
    use embassy_time::Instant;
    use myrtio_segment_clock::color::{BLACK, RED, Rgb, TAN, WHITE};
    use myrtio_segment_clock::display::{ColorTarget, Display, DisplayConfig, ProgressBar};
    use myrtio_segment_clock::segment::{
        Glyph, SHELF_12H, SHELF_12H_LEDS, SHELF_12H_WITH_EXTRAS, SHELF_12H_WITH_EXTRAS_LEDS,
        SegmentRef, SegmentRole,
    };
    use myrtio_segment_clock::transform::Transform;

    type ShelfDisplay = Display<SHELF_12H_LEDS>;

    fn shelf() -> ShelfDisplay {
        ShelfDisplay::new(&SHELF_12H, &DisplayConfig::DEFAULT).unwrap()
    }

    fn lit(display: &ShelfDisplay, role: SegmentRole, index: u8) -> bool {
        let segment = display.map().resolve(role, index);
        display.frame().is_lit(segment.range)
    }

    #[test]
    fn test_frame_must_fit_layout() {
        assert!(Display::<100>::new(&SHELF_12H, &DisplayConfig::DEFAULT).is_err());
    }

    #[test]
    fn test_color_targets() {
        let mut display = shelf();
        display.set_color(ColorTarget::Hours, RED);
        let top = |index| SegmentRef::new(SegmentRole::Top, index);

        assert_eq!(display.segment_color(top(2)), Some(RED));
        assert_eq!(
            display.segment_color(SegmentRef::new(SegmentRole::TopRight, 3)),
            Some(RED)
        );
        assert_eq!(display.segment_color(top(0)), Some(WHITE));
        assert_eq!(display.segment_color(top(3)), None);

        display.set_color(ColorTarget::Minutes, TAN);
        assert_eq!(display.segment_color(top(1)), Some(TAN));
        assert_eq!(display.segment_color(top(2)), Some(RED));

        display.set_display_color(1, BLACK);
        assert_eq!(display.segment_color(top(1)), Some(BLACK));
        assert_eq!(display.segment_color(top(0)), Some(TAN));

        display.set_segment_color(SegmentRole::Center, 0, RED);
        assert_eq!(
            display.segment_color(SegmentRef::new(SegmentRole::Center, 0)),
            Some(RED)
        );

        display.set_all_segment_colors(WHITE);
        assert_eq!(display.segment_color(top(2)), Some(WHITE));
    }

    #[test]
    fn test_recolor_keeps_levels() {
        let mut display = shelf();
        let top = SegmentRef::new(SegmentRole::Top, 0);
        display.animate(top, Transform::Show, 1.0);
        display.set_segment_color(SegmentRole::Top, 0, RED);

        let range = display.map().resolve_ref(top).range;
        for pixel in display.frame().range(range) {
            assert_eq!(pixel.color, RED);
            assert_eq!(pixel.level, 255);
        }
    }

    #[test]
    fn test_undefined_segment_is_ignored() {
        let mut display = shelf();
        display.animate(SegmentRef::new(SegmentRole::Top, 3), Transform::Show, 1.0);
        display.set_segment_color(SegmentRole::Center, 3, RED);
        assert!(display.frame().pixels().iter().all(|pixel| pixel.level == 0));
    }

    #[test]
    fn test_interior_lights_on_color() {
        let config = DisplayConfig::DEFAULT;
        let mut display =
            Display::<SHELF_12H_WITH_EXTRAS_LEDS>::new(&SHELF_12H_WITH_EXTRAS, &config).unwrap();
        let interior = display.map().resolve(SegmentRole::Interior, 0).range;
        assert!(!display.frame().is_lit(interior));

        display.set_color(ColorTarget::Interior, TAN);
        assert!(display.frame().is_lit(interior));

        display.turn_all_segments_off();
        assert!(display.frame().is_lit(interior));

        display.turn_all_off();
        assert!(!display.frame().is_lit(interior));
    }

    #[test]
    fn test_compose_applies_brightness() {
        let mut display = shelf();
        display.animate(SegmentRef::new(SegmentRole::Top, 0), Transform::Show, 1.0);
        let led = display.map().resolve(SegmentRole::Top, 0).range.indices().start;

        display.set_global_brightness(255, true);
        assert_eq!(display.compose()[led], WHITE);
        assert_eq!(display.compose()[0], BLACK);

        display.set_global_brightness(128, true);
        assert_eq!(
            display.compose()[led],
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );

        display.set_global_brightness(0, true);
        assert_eq!(display.compose()[led], BLACK);
    }

    #[test]
    fn test_brightness_is_interpolated() {
        let mut display = shelf();
        display.tick(Instant::from_millis(0));
        assert_eq!(display.brightness().current(), 128);

        display.set_global_brightness(0, false);
        assert!(display.brightness().is_transitioning());
        assert_eq!(display.brightness().target(), 0);

        display.tick(Instant::from_millis(1500));
        let halfway = display.brightness().current();
        assert!(halfway > 0 && halfway < 128, "{halfway}");

        display.tick(Instant::from_millis(3000));
        assert_eq!(display.brightness().current(), 0);
        assert!(!display.brightness().is_transitioning());
    }

    #[test]
    fn test_flush_rate_limit() {
        let mut display = shelf();
        assert!(display.flush(Instant::from_millis(0)).is_some());
        assert!(display.flush(Instant::from_millis(10)).is_none());
        assert!(display.flush(Instant::from_millis(20)).is_some());
        assert!(display.flush(Instant::from_millis(25)).is_none());
        assert!(display.flush(Instant::from_millis(5)).is_some());
        assert_eq!(
            display.flush(Instant::from_millis(100)).map(<[Rgb]>::len),
            Some(SHELF_12H_LEDS)
        );
    }

    #[test]
    fn test_progress_bar() {
        let mut display = shelf();
        display.animate(SegmentRef::new(SegmentRole::Center, 0), Transform::Show, 1.0);
        display.display_progress(100);
        assert_eq!(display.progress().len(), 14);
        assert!(display.frame().pixels().iter().all(|pixel| pixel.level == 0));

        display.update_progress(50);
        assert!(lit(&display, SegmentRole::BottomRight, 3));
        assert!(lit(&display, SegmentRole::TopRight, 2));
        assert!(lit(&display, SegmentRole::BottomLeft, 1));
        assert!(!lit(&display, SegmentRole::TopLeft, 1));
        assert!(!lit(&display, SegmentRole::TopRight, 0));
        assert!(!lit(&display, SegmentRole::Center, 2));

        display.update_progress(250);
        assert_eq!(display.progress().done(), 100);
        assert!(lit(&display, SegmentRole::TopRight, 0));

        display.update_progress(0);
        assert!(!lit(&display, SegmentRole::BottomRight, 3));
    }

    #[test]
    fn test_brightness_change_waits_for_first_tick() {
        let mut display = shelf();
        display.set_global_brightness(0, false);
        assert!(display.brightness().is_transitioning());
        assert_eq!(display.brightness().target(), 0);

        display.tick(Instant::from_millis(5000));
        assert_eq!(display.brightness().current(), 128);

        display.tick(Instant::from_millis(8000));
        assert_eq!(display.brightness().current(), 0);
    }

    #[test]
    fn test_lit_glyph_follows_frame() {
        let mut display = shelf();
        assert_eq!(display.lit_glyph(1), Glyph::BLANK);
        display.animate(SegmentRef::new(SegmentRole::Top, 1), Transform::Show, 1.0);
        display.animate(SegmentRef::new(SegmentRole::Center, 1), Transform::FadeIn, 0.5);
        assert_eq!(
            display.lit_glyph(1),
            Glyph::BLANK
                .with(SegmentRole::Top)
                .with(SegmentRole::Center)
        );
        assert_eq!(display.lit_glyph(0), Glyph::BLANK);
    }

    #[test]
    fn test_progress_path_length() {
        let display = shelf();
        assert_eq!(display.progress().len(), 14);
        assert_eq!(ProgressBar::new(display.map(), 3).len(), 3);
        assert_eq!(ProgressBar::new(display.map(), 40).len(), 14);
        assert!(ProgressBar::new(display.map(), 0).is_empty());
    }
}
