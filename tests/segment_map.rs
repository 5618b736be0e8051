mod tests {
    use myrtio_segment_clock::error::LayoutError;
    use myrtio_segment_clock::segment::{
        AuxSpec, Axis, Glyph, Layout, LedOrder, LedRange, SHELF_12H, SHELF_12H_LEDS,
        SHELF_12H_WITH_EXTRAS, SHELF_12H_WITH_EXTRAS_LEDS, Segment, SegmentMap, SegmentRef,
        SegmentRole, SegmentSpec,
    };

    fn shelf() -> SegmentMap {
        SegmentMap::new(&SHELF_12H, SHELF_12H_LEDS).unwrap()
    }

    #[test]
    fn test_shelf_layout_size() {
        assert_eq!(SHELF_12H_LEDS, 207);
        assert_eq!(SHELF_12H_WITH_EXTRAS_LEDS, 221);

        let map = shelf();
        assert_eq!(map.len(), 23);
        assert_eq!(map.led_count(), 207);
        assert_eq!(map.display_count(), 4);
        assert_eq!(map.leds_per_segment(), 9);
    }

    #[test]
    fn test_resolve_top_left_of_lower_hour_digit() {
        let map = shelf();
        let segment = map.resolve(SegmentRole::TopLeft, 2);
        assert_eq!(segment.range, LedRange::new(144, 9));
        assert_eq!(segment.len(), 9);
        assert_eq!(segment.axis, Axis::Vertical);
        assert_eq!(segment.order, LedOrder::Reverse);

        for (id, other) in map.iter() {
            if *id == SegmentRef::new(SegmentRole::TopLeft, 2) {
                continue;
            }
            assert!(!segment.range.overlaps(other.range), "overlaps {id:?}");
        }
    }

    #[test]
    fn test_segments_cover_the_strip_without_gaps() {
        let map = shelf();
        let mut covered = [false; SHELF_12H_LEDS];
        for (_, segment) in map.iter() {
            for led in segment.range.indices() {
                assert!(!covered[led]);
                covered[led] = true;
            }
        }
        assert!(covered.iter().all(|led| *led));
    }

    #[test]
    fn test_undefined_segment_resolves_empty() {
        let map = shelf();
        assert_eq!(map.resolve(SegmentRole::Top, 3), Segment::EMPTY);
        assert_eq!(map.resolve(SegmentRole::Top, 7), Segment::EMPTY);
        assert_eq!(map.resolve(SegmentRole::Top, 200), Segment::EMPTY);
        assert!(map.resolve(SegmentRole::Interior, 0).is_empty());
        assert!(!map.contains(SegmentRef::new(SegmentRole::Center, 3)));
        assert!(map.contains(SegmentRef::new(SegmentRole::TopRight, 3)));
    }

    #[test]
    fn test_higher_hour_digit_only_has_right_strokes() {
        let map = shelf();
        assert_eq!(map.display_segments(3).count(), 2);
        assert_eq!(map.display_segments(0).count(), 7);
        assert_eq!(map.digit_segments().count(), 23);
    }

    #[test]
    fn test_auxiliary_segments_follow_digits() {
        let map = SegmentMap::new(&SHELF_12H_WITH_EXTRAS, SHELF_12H_WITH_EXTRAS_LEDS).unwrap();
        assert_eq!(
            map.resolve(SegmentRole::Interior, 0).range,
            LedRange::new(207, 12)
        );
        assert_eq!(
            map.resolve(SegmentRole::SeparatorDots, 2).range,
            LedRange::new(219, 2)
        );
        assert_eq!(map.auxiliary_segments(SegmentRole::Interior).count(), 1);
        assert_eq!(map.display_count(), 4);
    }

    #[test]
    fn test_frame_too_short() {
        assert_eq!(
            SegmentMap::new(&SHELF_12H, 100).unwrap_err(),
            LayoutError::OutOfBounds {
                required: 207,
                available: 100
            }
        );
    }

    #[test]
    fn test_duplicate_segment() {
        let segments = [
            SegmentSpec::new(SegmentRole::Top, 0, LedOrder::Forward),
            SegmentSpec::new(SegmentRole::Top, 0, LedOrder::Reverse),
        ];
        let layout = Layout {
            leds_per_segment: 3,
            segments: &segments,
            auxiliary: &[],
        };
        assert_eq!(
            SegmentMap::new(&layout, 6).unwrap_err(),
            LayoutError::Duplicate(SegmentRef::new(SegmentRole::Top, 0))
        );
    }

    #[test]
    fn test_invalid_layouts() {
        let segments = [SegmentSpec::new(SegmentRole::Top, 0, LedOrder::Forward)];
        let zero = Layout {
            leds_per_segment: 0,
            segments: &segments,
            auxiliary: &[],
        };
        assert_eq!(
            SegmentMap::new(&zero, 10).unwrap_err(),
            LayoutError::ZeroLedsPerSegment
        );

        let misplaced = [SegmentSpec::new(SegmentRole::Interior, 0, LedOrder::Forward)];
        let layout = Layout {
            leds_per_segment: 3,
            segments: &misplaced,
            auxiliary: &[],
        };
        assert_eq!(
            SegmentMap::new(&layout, 10).unwrap_err(),
            LayoutError::RoleMismatch(SegmentRef::new(SegmentRole::Interior, 0))
        );

        let far = [SegmentSpec::new(SegmentRole::Top, 9, LedOrder::Forward)];
        let layout = Layout {
            leds_per_segment: 3,
            segments: &far,
            auxiliary: &[],
        };
        assert_eq!(
            SegmentMap::new(&layout, 10).unwrap_err(),
            LayoutError::DisplayOutOfRange(9)
        );

        let empty_aux = [AuxSpec {
            role: SegmentRole::SeparatorDots,
            display: 0,
            count: 0,
            order: LedOrder::Forward,
        }];
        let layout = Layout {
            leds_per_segment: 3,
            segments: &segments,
            auxiliary: &empty_aux,
        };
        assert_eq!(
            SegmentMap::new(&layout, 10).unwrap_err(),
            LayoutError::EmptyAuxiliary(SegmentRef::new(SegmentRole::SeparatorDots, 0))
        );
    }

    #[test]
    fn test_digit_glyphs() {
        let eight = Glyph::digit(8).unwrap();
        assert_eq!(eight.roles().count(), 7);

        let one = Glyph::digit(1).unwrap();
        assert!(one.contains(SegmentRole::TopRight));
        assert!(one.contains(SegmentRole::BottomRight));
        assert!(!one.contains(SegmentRole::Top));
        assert!(!one.contains(SegmentRole::Interior));

        assert_eq!(Glyph::digit(0).unwrap().roles().count(), 6);
        assert!(!Glyph::digit(0).unwrap().contains(SegmentRole::Center));
        assert_eq!(Glyph::digit(10), None);
        assert!(Glyph::BLANK.is_blank());
        let built = Glyph::BLANK
            .with(SegmentRole::TopRight)
            .with(SegmentRole::BottomRight);
        assert_eq!(built, one);
        let cleared = one
            .without(SegmentRole::TopRight)
            .without(SegmentRole::BottomRight);
        assert_eq!(cleared, Glyph::BLANK);
    }
}
