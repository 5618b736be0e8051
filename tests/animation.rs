mod tests {
    use embassy_time::Duration;
    use heapless::Vec;
    use myrtio_segment_clock::animation::{
        AnimationCatalog, AnimationStep, ComplexAnimation, MorphStyle, StepSlot, digit_morph,
        separator_flash,
    };
    use myrtio_segment_clock::error::AnimationError;
    use myrtio_segment_clock::segment::{
        Glyph, SHELF_12H, SHELF_12H_LEDS, SHELF_12H_WITH_EXTRAS, SHELF_12H_WITH_EXTRAS_LEDS,
        SegmentMap, SegmentRef, SegmentRole,
    };
    use myrtio_segment_clock::transform::{Direction, Transform};
    use myrtio_segment_clock::AnimationId;

    fn shelf() -> SegmentMap {
        SegmentMap::new(&SHELF_12H, SHELF_12H_LEDS).unwrap()
    }

    fn pauses(count: usize) -> Vec<AnimationStep, 16> {
        let mut steps = Vec::new();
        for _ in 0..count {
            steps.push(AnimationStep::new()).unwrap();
        }
        steps
    }

    #[test]
    fn test_per_step_is_truncated() {
        let animation = ComplexAnimation::new(pauses(7), Duration::from_millis(3000)).unwrap();
        assert_eq!(animation.per_step(), Duration::from_millis(428));
        assert_eq!(animation.cycle(), Duration::from_millis(2996));
        assert_eq!(animation.step_count(), 7);
    }

    #[test]
    fn test_per_step_remainder_is_below_step_count() {
        for steps in 1..=16 {
            for total in [1000_u64, 2999, 3000, 4321] {
                let animation =
                    ComplexAnimation::new(pauses(steps), Duration::from_millis(total)).unwrap();
                let remainder = total - animation.per_step().as_millis() * steps as u64;
                assert!(remainder < steps as u64);
            }
        }
    }

    #[test]
    fn test_invalid_definitions_are_rejected() {
        assert_eq!(
            ComplexAnimation::new(Vec::new(), Duration::from_millis(100)),
            Err(AnimationError::NoSteps)
        );
        assert_eq!(
            ComplexAnimation::new(pauses(2), Duration::from_millis(0)),
            Err(AnimationError::ZeroDuration)
        );
        assert_eq!(
            ComplexAnimation::new(pauses(4), Duration::from_millis(3)),
            Err(AnimationError::DurationTooShort {
                total_ms: 3,
                steps: 4
            })
        );
        let empty: &[StepSlot] = &[];
        let rows = [empty; 17];
        assert_eq!(
            ComplexAnimation::from_rows(&rows, Duration::from_millis(1000)),
            Err(AnimationError::TooManySteps)
        );
    }

    #[test]
    fn test_step_slots() {
        let top = StepSlot::linear(SegmentRole::Top, 0, Transform::SlideIn(Direction::Right));
        let step = AnimationStep::from_slots(&[top, StepSlot::EMPTY]).unwrap();
        assert_eq!(step.slots(), &[top]);
        assert!(!step.is_pause());
        assert!(AnimationStep::from_slots(&[StepSlot::EMPTY]).unwrap().is_pause());

        let full = [top; 9];
        assert_eq!(
            AnimationStep::from_slots(&full),
            Err(AnimationError::TooManySlots)
        );
    }

    #[test]
    fn test_validation_against_layout() {
        let map = shelf();
        let missing = StepSlot::linear(SegmentRole::Top, 3, Transform::FadeIn);
        let step = AnimationStep::from_slots(&[missing]).unwrap();
        assert_eq!(
            step.validate(&map),
            Err(AnimationError::UndefinedSegment(SegmentRef::new(
                SegmentRole::Top,
                3
            )))
        );

        let twice = StepSlot::linear(SegmentRole::Top, 0, Transform::FadeIn);
        let step = AnimationStep::from_slots(&[twice, twice]).unwrap();
        assert_eq!(
            step.validate(&map),
            Err(AnimationError::DuplicateSlot(SegmentRef::new(
                SegmentRole::Top,
                0
            )))
        );
    }

    #[test]
    fn test_builtin_catalog() {
        let map = shelf();
        let catalog = AnimationCatalog::builtin(&map, Duration::from_millis(3000), None).unwrap();

        let loading = catalog.get(AnimationId::Loading).unwrap();
        assert_eq!(loading.step_count(), 7);
        assert_eq!(loading.per_step(), Duration::from_millis(428));

        let progress = catalog.get(AnimationId::LoadingProgress).unwrap();
        assert_eq!(progress.step_count(), 14);
        assert!(progress.steps().iter().all(|step| step.slots().len() == 1));

        assert!(!catalog.contains(AnimationId::SeparatorFlash));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_separator_flash_needs_dots() {
        let map = shelf();
        let catalog = AnimationCatalog::builtin(
            &map,
            Duration::from_millis(3000),
            Some((2, Duration::from_millis(2000))),
        )
        .unwrap();
        assert!(!catalog.contains(AnimationId::SeparatorFlash));

        let map = SegmentMap::new(&SHELF_12H_WITH_EXTRAS, SHELF_12H_WITH_EXTRAS_LEDS).unwrap();
        let catalog = AnimationCatalog::builtin(
            &map,
            Duration::from_millis(3000),
            Some((2, Duration::from_millis(2000))),
        )
        .unwrap();
        let flash = catalog.get(AnimationId::SeparatorFlash).unwrap();
        assert_eq!(flash.step_count(), 2);
        assert_eq!(flash.per_step(), Duration::from_millis(1000));
    }

    #[test]
    fn test_catalog_insert_replaces() {
        let mut catalog = AnimationCatalog::new();
        let first = separator_flash(2, Duration::from_millis(2000)).unwrap();
        let second = separator_flash(2, Duration::from_millis(4000)).unwrap();
        catalog.insert(AnimationId::SeparatorFlash, first).unwrap();
        catalog.insert(AnimationId::SeparatorFlash, second).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(AnimationId::SeparatorFlash).map(ComplexAnimation::total),
            Some(Duration::from_millis(4000))
        );
        assert!(catalog.remove(AnimationId::SeparatorFlash).is_some());
        assert!(catalog.is_empty());
    }

    fn transform_of(
        animation: &ComplexAnimation,
        step: usize,
        role: SegmentRole,
    ) -> Option<Transform> {
        animation.step(step)?.slots().iter().find_map(|slot| {
            let segment = slot.segment?;
            (segment.role == role).then_some(slot.transform)
        })
    }

    #[test]
    fn test_morph_slides_out_then_in() {
        let map = shelf();
        let one = Glyph::digit(1).unwrap();
        let morph = digit_morph(
            &map,
            0,
            one,
            Glyph::digit(2).unwrap(),
            Duration::from_millis(900),
            MorphStyle::DEFAULT,
        )
        .unwrap();
        // 1 -> 2: bottom right leaves, top right stays
        assert_eq!(morph.step_count(), 2);
        assert_eq!(morph.per_step(), Duration::from_millis(450));
        assert_eq!(
            transform_of(&morph, 0, SegmentRole::BottomRight),
            Some(Transform::SlideOut(Direction::Down))
        );
        assert_eq!(transform_of(&morph, 0, SegmentRole::TopRight), Some(Transform::Show));
        assert_eq!(transform_of(&morph, 0, SegmentRole::TopLeft), Some(Transform::Hide));
        assert_eq!(
            transform_of(&morph, 1, SegmentRole::Top),
            Some(Transform::SlideIn(Direction::Right))
        );

        // 1 -> 7: nothing leaves, a single step
        let seven = Glyph::digit(7).unwrap();
        let duration = Duration::from_millis(900);
        let morph = digit_morph(&map, 0, one, seven, duration, MorphStyle::DEFAULT).unwrap();
        assert_eq!(morph.step_count(), 1);
        assert_eq!(morph.per_step(), Duration::from_millis(900));
        assert_eq!(
            transform_of(&morph, 0, SegmentRole::Top),
            Some(Transform::SlideIn(Direction::Right))
        );
    }

    #[test]
    fn test_morph_skips_undefined_strokes() {
        let map = shelf();
        let morph = digit_morph(
            &map,
            3,
            Glyph::BLANK,
            Glyph::digit(1).unwrap(),
            Duration::from_millis(900),
            MorphStyle::DEFAULT,
        )
        .unwrap();
        assert_eq!(morph.step_count(), 1);
        assert_eq!(morph.steps()[0].slots().len(), 2);
        assert!(morph.validate(&map).is_ok());
    }
}
