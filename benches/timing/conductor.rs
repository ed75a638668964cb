//! Benchmarks for full tick delivery.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::{clock::ManualClock, conductor::Discard, Conductor, MetronomeConfig};

use crate::TICK_COUNTS;

pub fn bench_conductor(c: &mut Criterion) {
    let mut group = c.benchmark_group("conductor");

    for &ticks in TICK_COUNTS {
        let clock = ManualClock::new();
        let config = MetronomeConfig::new().tempo(240).beats_per_bar(7);
        let mut conductor = Conductor::new(&config, clock.clone(), Discard, Discard);
        conductor.start();

        group.bench_with_input(BenchmarkId::new("pump", ticks), &ticks, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    clock.advance(Duration::from_millis(250));
                    black_box(conductor.pump());
                }
            })
        });
    }

    group.finish();
}
