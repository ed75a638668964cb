//! Benchmarks for scheduler polling and cadence swaps.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::{
    clock::ManualClock, scheduler::SchedulerConfig, TempoRange, TickScheduler, TimeSignature,
};

use crate::TICK_COUNTS;

fn scheduler(clock: &ManualClock) -> TickScheduler {
    TickScheduler::new(
        clock.clone(),
        SchedulerConfig::default(),
        TempoRange::DEFAULT,
        120,
        TimeSignature::FOUR_FOUR,
    )
}

pub fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheduler");

    for &ticks in TICK_COUNTS {
        // Clock jumps straight to each deadline
        let clock = ManualClock::new();
        let mut sched = scheduler(&clock);
        sched.start();
        group.bench_with_input(BenchmarkId::new("poll_due", ticks), &ticks, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    clock.advance(Duration::from_millis(500));
                    black_box(sched.poll());
                }
            })
        });

        // Retune before every tick
        let clock = ManualClock::new();
        let mut sched = scheduler(&clock);
        sched.start();
        group.bench_with_input(BenchmarkId::new("retune", ticks), &ticks, |b, &n| {
            b.iter(|| {
                for i in 0..n {
                    black_box(sched.retune(black_box(60 + (i % 200) as u32)));
                }
            })
        });
    }

    group.finish();
}
