//! Benchmarks for the inner integration loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use galleria_core::integrator::{step, DT};
use galleria_core::noise::{GaussianNoise, ZeroNoise};
use galleria_core::steady::{settle, SettleSettings};
use galleria_core::types::{DetuningPair, DrivingTerms, FieldState};

fn bench_euler_step(c: &mut Criterion) {
    let state = FieldState::seed();
    let drive = DrivingTerms::from_pump_powers(1.4, 1.4);
    let detuning = DetuningPair::symmetric(2.0);
    let mut noise = GaussianNoise::from_seed(1);

    c.bench_function("euler_step", |b| {
        b.iter(|| {
            black_box(step(
                black_box(&state),
                &drive,
                &detuning,
                DT,
                1e-9,
                &mut noise,
            ))
        })
    });
}

fn bench_settle(c: &mut Criterion) {
    let drive = DrivingTerms::from_pump_powers(1.4, 1.4);
    let detuning = DetuningPair::symmetric(2.0);
    let settings = SettleSettings {
        tolerance: 1e-6,
        noise_amplitude: 0.0,
        ..SettleSettings::default()
    };

    c.bench_function("settle_from_seed", |b| {
        b.iter(|| {
            settle(
                black_box(FieldState::seed()),
                &drive,
                &detuning,
                &settings,
                &mut ZeroNoise,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_euler_step, bench_settle);
criterion_main!(benches);
