#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    if let Ok(cfg) = pedo_config::load_toml(data) {
        if cfg.validate().is_ok() {
            // A validated detector table must always build.
            let built = pedo_core::StepDetector::builder()
                .with_cfg((&cfg.detector).into())
                .with_clock(pedo_traits::ManualClock::new(0))
                .build();
            assert!(built.is_ok(), "validated config rejected by builder");
        }
    }
});
