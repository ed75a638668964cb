use std::time::Duration;

use log::{debug, info};

use crate::clock::Clock;
use crate::timing::{Tempo, TempoRange, TimeSignature};

pub mod cadence;

pub use cadence::{Cadence, Generation, TickEvent};

/*
Tick Scheduler
==============

Turns a tempo into a stream of evenly spaced ticks and keeps that stream
coherent while tempo and signature change underneath it.

Vocabulary
----------

  cadence     One run of evenly spaced ticks at a fixed interval. Lives from
              start (or a retune) until the next retune or stop.

  generation  Id stamped on every tick. Each new cadence gets a fresh one;
              stop retires the current one. Consumers only act on ticks whose
              generation is still current.

  due         Scheduler time a tick should sound at. Deadlines chain from
              the previous deadline so late wake-ups don't accumulate drift.


Swapping Cadences
-----------------

    tempo 60                          retune(120)
    ──┬─────────┬─────────┬──────────────┼──────────┬────────┬───→ time
     g1        g1        g1              │ pause    g2       g2
                                         │←────────→│
                                         cancel g1,  first g2 tick
                                         arm g2      after pause + 500ms

The old cadence is dropped and the new one armed inside the same `&mut self`
call, so there is never more than one pending cadence. A tick from g1 that
was already handed out before the swap is rejected downstream by its
generation; no timer cancellation latency can leak it through.

The scheduler is driven by polling: a driver calls `poll()` until it returns
`None`, then sleeps for `time_until_next_tick()`.
*/

/// Running or stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

/// When the first tick of a fresh start sounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FirstTick {
    /// One full interval after start (count-in feel)
    #[default]
    AfterInterval,
    /// Right at start
    Immediate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    pub first_tick: FirstTick,
    /// Extra delay before a swapped cadence starts counting its first
    /// interval. Zero by default; generations already make the swap
    /// race-free.
    pub retune_pause: Duration,
}

pub struct TickScheduler {
    clock: Box<dyn Clock>,
    config: SchedulerConfig,
    range: TempoRange,
    tempo: Tempo,
    signature: TimeSignature,
    /// Some exactly while Running
    cadence: Option<Cadence>,
    /// Last generation handed out
    generation: Generation,
}

impl TickScheduler {
    /// Create a stopped scheduler; `tempo` is clamped into `range`
    pub fn new<C: Clock + 'static>(
        clock: C,
        config: SchedulerConfig,
        range: TempoRange,
        tempo: u32,
        signature: TimeSignature,
    ) -> Self {
        Self {
            clock: Box::new(clock),
            config,
            range,
            tempo: range.clamp(tempo),
            signature,
            cadence: None,
            generation: Generation::default(),
        }
    }

    /// Begin ticking
    ///
    /// Returns the new cadence's generation, or `None` if already running.
    pub fn start(&mut self) -> Option<Generation> {
        if self.cadence.is_some() {
            return None;
        }

        let now = self.clock.now();
        let interval = self.interval();
        let first_due = match self.config.first_tick {
            FirstTick::AfterInterval => now + interval,
            FirstTick::Immediate => now,
        };
        let generation = self.arm(first_due);
        info!("started at {} ({}), generation {}", self.tempo, self.signature, generation.get());
        Some(generation)
    }

    /// Cancel the cadence
    ///
    /// Returns false if already stopped. The current generation is retired,
    /// so any tick handed out before this call is stale once it returns.
    pub fn stop(&mut self) -> bool {
        if self.cadence.take().is_none() {
            return false;
        }
        self.generation = self.generation.next();
        info!("stopped");
        true
    }

    /// Change tempo, clamped to the configured range
    ///
    /// While running this swaps in a fresh cadence at the new interval.
    /// A request that lands on the current tempo leaves the cadence alone.
    pub fn retune(&mut self, bpm: u32) -> Tempo {
        let tempo = self.range.clamp(bpm);
        if bpm != tempo.bpm() {
            debug!("tempo request {bpm} clamped to {}", tempo.bpm());
        }
        if tempo == self.tempo {
            return tempo;
        }
        self.tempo = tempo;
        self.swap_cadence();
        tempo
    }

    /// Change the time signature
    ///
    /// Swaps the cadence like [`retune`](Self::retune) while running.
    pub fn resignature(&mut self, signature: TimeSignature) -> TimeSignature {
        if signature == self.signature {
            return signature;
        }
        self.signature = signature;
        self.swap_cadence();
        signature
    }

    /// Hand out the next tick if it is due
    ///
    /// Returns at most one tick; call until `None` to drain.
    pub fn poll(&mut self) -> Option<TickEvent> {
        let now = self.clock.now();
        self.cadence.as_mut()?.fire(now)
    }

    /// How long until the next tick is due; `None` while stopped
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        let cadence = self.cadence.as_ref()?;
        Some(cadence.next_due().saturating_sub(self.clock.now()))
    }

    /// True if `event` belongs to the live cadence
    pub fn is_current(&self, event: &TickEvent) -> bool {
        self.cadence
            .as_ref()
            .is_some_and(|cadence| cadence.generation() == event.generation)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> PlaybackState {
        if self.cadence.is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.cadence.is_some()
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn signature(&self) -> TimeSignature {
        self.signature
    }

    pub fn range(&self) -> TempoRange {
        self.range
    }

    /// Current tick interval, always derived from the tempo
    pub fn interval(&self) -> Duration {
        self.tempo.interval()
    }

    /// Current scheduler time
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    fn swap_cadence(&mut self) {
        if self.cadence.is_none() {
            return;
        }
        let first_due = self.clock.now() + self.config.retune_pause + self.interval();
        let retired = self.generation;
        let generation = self.arm(first_due);
        debug!(
            "cadence swap {} -> {} at {:?} interval",
            retired.get(),
            generation.get(),
            self.interval()
        );
    }

    fn arm(&mut self, first_due: Duration) -> Generation {
        self.generation = self.generation.next();
        self.cadence = Some(Cadence::new(self.generation, self.interval(), first_due));
        self.generation
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("tempo", &self.tempo)
            .field("signature", &self.signature)
            .field("cadence", &self.cadence)
            .field("generation", &self.generation)
            .finish()
    }
}
