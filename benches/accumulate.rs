use criterion::{criterion_group, criterion_main, Criterion};
use tcd1304::{SensorConfig, Tcd1304};
use utilities::{ramp_frame, relaxed_port};

fn bench_frame_captured(c: &mut Criterion) {
    let mut sensor = Tcd1304::new(relaxed_port());
    sensor.init(SensorConfig::default()).expect("init failed");
    sensor.start().expect("start failed");
    *sensor.raw_frame_mut() = ramp_frame();

    // Interrupt-context budget: must stay well under the 3.8 ms ICG period
    c.bench_function("frame_captured", |b| b.iter(|| sensor.frame_captured()));
}

criterion_group!(benches, bench_frame_captured);
criterion_main!(benches);
