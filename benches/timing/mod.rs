//! Benchmarks for the timing core.

mod conductor;
mod counter;
mod scheduler;

pub use conductor::bench_conductor;
pub use counter::bench_counter;
pub use scheduler::bench_scheduler;
