use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use pedo_core::mocks::{idle_samples, walking_samples};
use pedo_core::{DetectorCfg, StepDetector, TimeBase};
use pedo_traits::ManualClock;

fn detector() -> StepDetector {
    StepDetector::builder()
        .with_cfg(DetectorCfg {
            time_base: TimeBase::Sample,
            ..DetectorCfg::default()
        })
        .with_clock(ManualClock::new(0))
        .build()
        .expect("build detector")
}

pub fn bench_detector(c: &mut Criterion) {
    let mut g = c.benchmark_group("detector");
    // Allow quick tweaking without CLI flags (Criterion 0.5):
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p pedo_core --bench detector
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let traces = [
        ("walk_1000_steps_50hz", walking_samples(1_000, 1_000, 50, 2.0)),
        ("idle_50k_samples", idle_samples(50_000, 1_000, 50, 0xC0FFEE)),
    ];

    for (name, trace) in &traces {
        g.bench_function(*name, |b| {
            b.iter_batched(
                detector,
                |mut d| {
                    for s in trace {
                        let _ = d.process_sample(black_box(s));
                    }
                    black_box(d.step_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    g.finish();
}

criterion_group!(detector_benches, bench_detector);
criterion_main!(detector_benches);
