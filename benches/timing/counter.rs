//! Benchmarks for BeatCounter transitions.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::{BeatCounter, TimeSignature};

use crate::TICK_COUNTS;

pub fn bench_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter");

    for &ticks in TICK_COUNTS {
        // Fixed bar
        let mut counter = BeatCounter::new();
        group.bench_with_input(BenchmarkId::new("four_four", ticks), &ticks, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    black_box(counter.tick(black_box(TimeSignature::FOUR_FOUR)));
                }
            })
        });

        // Signature changing every tick
        let mut counter = BeatCounter::new();
        group.bench_with_input(BenchmarkId::new("shifting_bar", ticks), &ticks, |b, &n| {
            b.iter(|| {
                for i in 0..n {
                    let signature = TimeSignature::clamped(2 + (i % 7) as u32);
                    black_box(counter.tick(black_box(signature)));
                }
            })
        });
    }

    group.finish();
}
