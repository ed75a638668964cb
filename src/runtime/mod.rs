//! Ticker thread that drives a [`Conductor`] on wall-clock time.
//!
//! # Example
//!
//! ```ignore
//! use saavy_metronome::{
//!     clock::MonotonicClock, conductor::Discard, runtime::Runtime, Conductor, MetronomeConfig,
//! };
//!
//! fn main() -> Result<(), saavy_metronome::runtime::RuntimeError> {
//!     let config = MetronomeConfig::new().tempo(96).beats_per_bar(3);
//!     let conductor = Conductor::new(&config, MonotonicClock::new(), Discard, Discard);
//!     let runtime = Runtime::spawn(conductor)?;
//!     runtime.toggle();
//!     std::thread::sleep(std::time::Duration::from_secs(4));
//!     runtime.shutdown()
//! }
//! ```
//!
//! One thread owns the timeline. It pumps the conductor, then sleeps on a
//! condvar until the next tick is due or a control call wakes it. Control
//! calls and tick delivery take the same lock, so once `toggle()` has stopped
//! playback no further beat can be delivered.

mod error;

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::info;

use crate::conductor::{Conductor, ConductorStats, DisplaySnapshot};
use crate::scheduler::PlaybackState;
use crate::timing::{Tempo, TimeSignature};

pub use error::RuntimeError;

const THREAD_NAME: &str = "metronome-ticker";

struct Shared {
    state: Mutex<TickerState>,
    wake: Condvar,
}

struct TickerState {
    conductor: Conductor,
    shutdown: bool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, TickerState> {
        // The conductor holds plain data; a panic elsewhere can't leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a running ticker thread
///
/// Dropping it shuts the thread down.
pub struct Runtime {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Move `conductor` onto a new ticker thread
    pub fn spawn(conductor: Conductor) -> Result<Self, RuntimeError> {
        let shared = Arc::new(Shared {
            state: Mutex::new(TickerState {
                conductor,
                shutdown: false,
            }),
            wake: Condvar::new(),
        });

        let ticker = shared.clone();
        let thread = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || run_ticker(&ticker))
            .map_err(RuntimeError::Spawn)?;

        info!("{THREAD_NAME} spawned");
        Ok(Self {
            shared,
            thread: Some(thread),
        })
    }

    /// Start or stop playback; returns the new state
    pub fn toggle(&self) -> PlaybackState {
        self.control(Conductor::toggle)
    }

    pub fn set_tempo(&self, bpm: u32) -> Tempo {
        self.control(|c| c.set_tempo(bpm))
    }

    pub fn nudge_tempo(&self, delta: i32) -> Tempo {
        self.control(|c| c.nudge_tempo(delta))
    }

    pub fn set_time_signature(&self, beats_per_bar: u32) -> TimeSignature {
        self.control(|c| c.set_time_signature(beats_per_bar))
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.shared.lock().conductor.snapshot()
    }

    pub fn stats(&self) -> ConductorStats {
        self.shared.lock().conductor.stats()
    }

    /// Stop the ticker thread and wait for it to exit
    pub fn shutdown(mut self) -> Result<(), RuntimeError> {
        self.join()
    }

    /// Apply a change under the lock, then wake the ticker so it re-plans
    /// its sleep around the new cadence
    fn control<T>(&self, f: impl FnOnce(&mut Conductor) -> T) -> T {
        let out = f(&mut self.shared.lock().conductor);
        self.shared.wake.notify_one();
        out
    }

    fn join(&mut self) -> Result<(), RuntimeError> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        {
            let mut state = self.shared.lock();
            state.shutdown = true;
            state.conductor.stop();
        }
        self.shared.wake.notify_one();

        thread.join().map_err(|_| RuntimeError::TickerPanicked)?;
        info!("{THREAD_NAME} joined");
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Err(err) = self.join() {
            log::error!("{err}");
        }
    }
}

fn run_ticker(shared: &Shared) {
    let mut state = shared.lock();
    while !state.shutdown {
        state.conductor.pump();

        let wait = state.conductor.time_until_next_tick();
        state = match wait {
            Some(wait) => {
                shared
                    .wake
                    .wait_timeout(state, wait)
                    .unwrap_or_else(PoisonError::into_inner)
                    .0
            }
            None => shared.wake.wait(state).unwrap_or_else(PoisonError::into_inner),
        };
    }
}
