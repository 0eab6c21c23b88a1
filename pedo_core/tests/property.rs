use pedo_core::StepDetector;
use pedo_traits::{Clock, ManualClock};
use proptest::prelude::*;

prop_compose! {
    // (clock advance in ms, ax, ay, az)
    fn sample_stream()(
        v in prop::collection::vec((0u64..400, -30.0f32..30.0, -30.0f32..30.0, -30.0f32..30.0), 1..400)
    ) -> Vec<(u64, f32, f32, f32)> {
        v
    }
}

proptest! {
    #[test]
    fn step_count_is_monotonic_and_moves_by_at_most_one(stream in sample_stream()) {
        let clock = ManualClock::new(0);
        let mut d = StepDetector::builder().with_clock(clock.clone()).build().unwrap();
        let mut prev = 0u64;
        for (dt, ax, ay, az) in stream {
            clock.advance(dt);
            let n = d.process(clock.now_ms(), ax, ay, az).unwrap();
            prop_assert!(n >= prev, "count went backwards: {} -> {}", prev, n);
            prop_assert!(n - prev <= 1, "count jumped: {} -> {}", prev, n);
            prev = n;
        }
    }

    #[test]
    fn accepted_steps_are_more_than_debounce_apart(stream in sample_stream()) {
        let clock = ManualClock::new(0);
        let mut d = StepDetector::builder().with_clock(clock.clone()).build().unwrap();
        let debounce = d.cfg().debounce_ms;
        let mut prev_count = 0u64;
        let mut step_times: Vec<u64> = Vec::new();
        for (dt, ax, ay, az) in stream {
            clock.advance(dt);
            let n = d.process(0, ax, ay, az).unwrap();
            if n > prev_count {
                step_times.push(clock.now_ms());
                prev_count = n;
            }
        }
        prop_assert!(step_times.first().map_or(true, |&t| t > debounce));
        for w in step_times.windows(2) {
            prop_assert!(w[1] - w[0] > debounce, "steps at {} and {}", w[0], w[1]);
        }
    }

    #[test]
    fn non_finite_input_never_changes_state(
        finite in prop::collection::vec((0u64..400, -30.0f32..30.0), 0..50),
        which in 0usize..3,
    ) {
        let clock = ManualClock::new(0);
        let mut d = StepDetector::builder().with_clock(clock.clone()).build().unwrap();
        for (dt, az) in finite {
            clock.advance(dt);
            d.process(0, 0.0, 0.0, az).unwrap();
        }
        let before = d.state();
        let mut axes = [0.0f32; 3];
        axes[which] = f32::NAN;
        prop_assert!(d.process(0, axes[0], axes[1], axes[2]).is_err());
        prop_assert_eq!(d.state(), before);
    }
}
