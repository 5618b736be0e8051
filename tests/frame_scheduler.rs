mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_segment_clock::clock::{Clock, ClockConfig};
    use myrtio_segment_clock::color::Rgb;
    use myrtio_segment_clock::frame_scheduler::{DEFAULT_FRAME_DURATION, FrameScheduler};
    use myrtio_segment_clock::intent::{ClockIntent, IntentQueue};
    use myrtio_segment_clock::segment::SHELF_12H_LEDS;
    use myrtio_segment_clock::OutputDriver;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        last_len: usize,
    }

    impl OutputDriver for Recorder {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames += 1;
            self.last_len = colors.len();
        }
    }

    fn scheduler(queue: &IntentQueue<4>) -> FrameScheduler<'_, Recorder, SHELF_12H_LEDS, 4> {
        let clock = Clock::new(&ClockConfig::SHELF).unwrap();
        FrameScheduler::new(clock, Recorder::default(), queue.receiver())
    }

    #[test]
    fn test_default_frame_rate() {
        assert_eq!(DEFAULT_FRAME_DURATION, Duration::from_millis(16));
    }

    #[test]
    fn test_frames_are_paced() {
        let queue = IntentQueue::new();
        let mut scheduler = scheduler(&queue);

        let first = scheduler.tick(Instant::from_millis(0));
        assert!(first.flushed);
        assert_eq!(first.next_deadline, Instant::from_millis(16));
        assert_eq!(first.sleep_duration, Duration::from_millis(16));

        let second = scheduler.tick(Instant::from_millis(16));
        assert!(!second.flushed);
        assert_eq!(second.next_deadline, Instant::from_millis(32));

        let third = scheduler.tick(Instant::from_millis(32));
        assert!(third.flushed);
    }

    #[test]
    fn test_stall_skips_backlog() {
        let queue = IntentQueue::new();
        let mut scheduler = scheduler(&queue);
        scheduler.tick(Instant::from_millis(0));

        let result = scheduler.tick(Instant::from_millis(1000));
        assert_eq!(result.next_deadline, Instant::from_millis(1016));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));
    }

    #[test]
    fn test_intents_reach_the_clock() {
        let queue = IntentQueue::new();
        let mut scheduler = scheduler(&queue);
        queue
            .sender()
            .try_send(ClockIntent::DisplayDigit {
                display: 0,
                value: 7,
            })
            .unwrap();

        scheduler.tick(Instant::from_millis(0));
        assert!(queue.is_empty());
        assert!(
            scheduler
                .clock()
                .is_playing(myrtio_segment_clock::AnimationId::Digit(0))
        );
    }
}
