use std::time::Duration;

use crate::scheduler::{FirstTick, SchedulerConfig};
use crate::timing::{TempoRange, TimeSignature};

/// Everything needed to set up a metronome session
///
/// Values are requests: tempo and beats per bar are clamped when applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetronomeConfig {
    pub tempo_range: TempoRange,
    /// Starting tempo in BPM
    pub tempo: u32,
    pub beats_per_bar: u32,
    pub scheduler: SchedulerConfig,
    /// Capacity of the click ring feeding the audio thread
    pub click_queue: usize,
    /// Capacity of the snapshot ring feeding the display
    pub display_queue: usize,
}

impl MetronomeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tempo(mut self, bpm: u32) -> Self {
        self.tempo = bpm;
        self
    }

    pub fn beats_per_bar(mut self, beats: u32) -> Self {
        self.beats_per_bar = beats;
        self
    }

    pub fn tempo_range(mut self, min: u32, max: u32) -> Self {
        self.tempo_range = TempoRange::new(min, max);
        self
    }

    pub fn first_tick(mut self, first_tick: FirstTick) -> Self {
        self.scheduler.first_tick = first_tick;
        self
    }

    pub fn retune_pause(mut self, pause: Duration) -> Self {
        self.scheduler.retune_pause = pause;
        self
    }

    pub fn click_queue(mut self, capacity: usize) -> Self {
        self.click_queue = capacity.max(1);
        self
    }

    pub fn display_queue(mut self, capacity: usize) -> Self {
        self.display_queue = capacity.max(1);
        self
    }

    /// Time signature this config starts with, after clamping
    pub fn time_signature(&self) -> TimeSignature {
        TimeSignature::clamped(self.beats_per_bar)
    }
}

impl Default for MetronomeConfig {
    fn default() -> Self {
        Self {
            tempo_range: TempoRange::DEFAULT,
            tempo: 120,
            beats_per_bar: 4,
            scheduler: SchedulerConfig::default(),
            click_queue: 64,
            display_queue: 64,
        }
    }
}
