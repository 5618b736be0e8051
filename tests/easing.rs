mod tests {
    use myrtio_segment_clock::easing::{EaseMode, Easing};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_every_easing_keeps_its_endpoints() {
        for easing in Easing::ALL {
            assert_eq!(easing.ease(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.ease(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for easing in Easing::ALL {
            assert_eq!(easing.ease(-0.5), 0.0, "{easing:?} below 0");
            assert_eq!(easing.ease(1.5), 1.0, "{easing:?} above 1");
            assert_eq!(easing.ease(f32::NAN), 0.0, "{easing:?} at NaN");
        }
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(Easing::default(), Easing::None);
        assert_eq!(Easing::None.ease(0.3), 0.3);
        assert_eq!(Easing::Linear.ease(0.7), 0.7);
    }

    #[test]
    fn test_quadratic_modes() {
        assert!((Easing::Quadratic(EaseMode::In).ease(0.5) - 0.25).abs() < EPSILON);
        assert!((Easing::Quadratic(EaseMode::Out).ease(0.5) - 0.75).abs() < EPSILON);
        assert!((Easing::Quadratic(EaseMode::InOut).ease(0.5) - 0.5).abs() < EPSILON);
        assert!((Easing::Quadratic(EaseMode::InOut).ease(0.25) - 0.125).abs() < EPSILON);
    }

    #[test]
    fn test_sine_in_out_is_symmetric() {
        let easing = Easing::Sine(EaseMode::InOut);
        assert!((easing.ease(0.5) - 0.5).abs() < EPSILON);
        let early = easing.ease(0.2);
        let late = easing.ease(0.8);
        assert!((early + late - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_back_overshoots_below_zero() {
        let easing = Easing::Back(EaseMode::In);
        assert!(easing.overshoots());
        assert!(easing.ease(0.2) < 0.0);
        assert!(Easing::Back(EaseMode::Out).ease(0.8) > 1.0);
    }

    #[test]
    fn test_elastic_leaves_unit_range() {
        let easing = Easing::Elastic(EaseMode::Out);
        assert!(easing.overshoots());
        assert!((1..100).any(|i| easing.ease(i as f32 / 100.0) > 1.0));
    }

    #[test]
    fn test_monotonic_curves_stay_in_range() {
        for easing in Easing::ALL.into_iter().filter(|easing| !easing.overshoots()) {
            let mut previous = 0.0;
            for i in 0..=100 {
                let value = easing.ease(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&value), "{easing:?} left [0, 1]");
                assert!(value + EPSILON >= previous, "{easing:?} is not monotonic");
                previous = value;
            }
        }
    }
}
