#![no_main]
use libfuzzer_sys::fuzz_target;
use pedo_core::{DetectorCfg, StepDetector, TimeBase};
use pedo_traits::ManualClock;

fuzz_target!(|data: &[u8]| {
    // Arbitrary CSV text: the parser may reject it, but accepted rows must
    // never panic the detector or make the count go backwards.
    let Ok(samples) = pedo_config::parse_accel_csv(data) else {
        return;
    };
    let Ok(mut det) = StepDetector::builder()
        .with_cfg(DetectorCfg {
            time_base: TimeBase::Sample,
            ..DetectorCfg::default()
        })
        .with_clock(ManualClock::new(0))
        .build()
    else {
        return;
    };
    let mut last = 0;
    for s in &samples {
        if let Ok(count) = det.process_sample(s) {
            assert!(count >= last && count <= last + 1);
            last = count;
        }
    }
});
