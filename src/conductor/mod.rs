//! Conductor - ties the scheduler to the beat counter
//!
//! The only place that knows about both. Each tick from the scheduler runs
//! through the beat counter of the live session and the result goes out to
//! the click and display sinks.

use std::time::Duration;

use log::{debug, trace};

use crate::clock::Clock;
use crate::config::MetronomeConfig;
use crate::counter::{Beat, BeatCounter};
use crate::scheduler::{Generation, PlaybackState, TickEvent, TickScheduler};
use crate::timing::{Tempo, TimeSignature};

pub mod sink;

pub use sink::{Click, ClickSink, Discard, DisplaySink, DisplaySnapshot};

/// State of one playback session, from start to stop
#[derive(Debug, Clone, Copy)]
pub struct Session {
    /// Cadence this session currently listens to
    generation: Generation,
    counter: BeatCounter,
}

impl Session {
    fn begin(generation: Generation) -> Self {
        Self {
            generation,
            counter: BeatCounter::new(),
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn counter(&self) -> &BeatCounter {
        &self.counter
    }
}

/// Delivery counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConductorStats {
    /// Ticks turned into beats
    pub delivered: u64,
    /// Ticks rejected for belonging to a superseded cadence
    pub stale: u64,
}

pub struct Conductor {
    scheduler: TickScheduler,
    session: Option<Session>,
    clicks: Box<dyn ClickSink + Send>,
    display: Box<dyn DisplaySink + Send>,
    stats: ConductorStats,
}

impl Conductor {
    pub fn new<C, A, D>(config: &MetronomeConfig, clock: C, clicks: A, display: D) -> Self
    where
        C: Clock + 'static,
        A: ClickSink + Send + 'static,
        D: DisplaySink + Send + 'static,
    {
        let scheduler = TickScheduler::new(
            clock,
            config.scheduler,
            config.tempo_range,
            config.tempo,
            config.time_signature(),
        );

        Self {
            scheduler,
            session: None,
            clicks: Box::new(clicks),
            display: Box::new(display),
            stats: ConductorStats::default(),
        }
    }

    /// Start if stopped, stop if running; returns the new state
    pub fn toggle(&mut self) -> PlaybackState {
        match self.scheduler.state() {
            PlaybackState::Stopped => self.start(),
            PlaybackState::Running => self.stop(),
        }
        self.scheduler.state()
    }

    /// Start a fresh session; no-op while running
    pub fn start(&mut self) {
        if let Some(generation) = self.scheduler.start() {
            self.session = Some(Session::begin(generation));
        }
    }

    /// End the session; no-op while stopped
    ///
    /// No beat is delivered after this returns.
    pub fn stop(&mut self) {
        if self.scheduler.stop() {
            self.session = None;
            let snapshot = self.snapshot();
            self.display.show(snapshot);
        }
    }

    /// Set the tempo; returns the applied (clamped) value
    pub fn set_tempo(&mut self, bpm: u32) -> Tempo {
        let tempo = self.scheduler.retune(bpm);
        self.follow_cadence();
        tempo
    }

    /// Move the tempo by `delta` BPM
    pub fn nudge_tempo(&mut self, delta: i32) -> Tempo {
        let target = self.scheduler.tempo().bpm().saturating_add_signed(delta);
        self.set_tempo(target)
    }

    /// Set beats per bar, clamped to the supported range
    pub fn set_time_signature(&mut self, beats_per_bar: u32) -> TimeSignature {
        let signature = TimeSignature::clamped(beats_per_bar);
        if signature.beats_per_bar() as u32 != beats_per_bar {
            debug!("time signature request {beats_per_bar} clamped to {signature}");
        }
        let applied = self.scheduler.resignature(signature);
        self.follow_cadence();
        applied
    }

    /// Deliver every tick that is due; returns how many beats resulted
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.scheduler.poll() {
            if self.deliver(event).is_some() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Turn one tick into a beat
    ///
    /// Ticks from a superseded cadence, or arriving while stopped, are
    /// dropped and `None` is returned.
    pub fn deliver(&mut self, event: TickEvent) -> Option<Beat> {
        let current = self.scheduler.is_current(&event);
        let session = match self.session.as_mut() {
            Some(session) if current && session.generation == event.generation => session,
            _ => {
                debug!(
                    "dropping stale tick #{} of generation {} (current {})",
                    event.index,
                    event.generation.get(),
                    self.scheduler.generation().get()
                );
                self.stats.stale += 1;
                return None;
            }
        };

        let beat = session.counter.tick(self.scheduler.signature());
        self.stats.delivered += 1;
        trace!("beat {} bar {} at {:?}", beat.position, beat.bar, event.due);

        self.clicks.trigger(Click { accent: beat.accent });
        let snapshot = self.snapshot();
        self.display.show(snapshot);
        Some(beat)
    }

    /// What a display should show right now
    pub fn snapshot(&self) -> DisplaySnapshot {
        let (beat_position, bar_count) = self
            .session
            .map(|s| (s.counter.position(), s.counter.bars()))
            .unwrap_or((0, 0));

        DisplaySnapshot {
            beat_position,
            bar_count,
            time_signature: self.scheduler.signature(),
            tempo: self.scheduler.tempo(),
            playing: self.scheduler.is_running(),
        }
    }

    /// How long a driver may sleep before calling `pump` again
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.scheduler.time_until_next_tick()
    }

    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> ConductorStats {
        self.stats
    }

    /// Keep the session on the scheduler's cadence after a swap
    fn follow_cadence(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.generation = self.scheduler.generation();
        }
    }
}

impl std::fmt::Debug for Conductor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conductor")
            .field("scheduler", &self.scheduler)
            .field("session", &self.session)
            .field("stats", &self.stats)
            .finish()
    }
}
