//! Beat and bar bookkeeping.
//!
//! `BeatCounter` is a plain state machine: it knows nothing about time, only
//! that a tick happened and how many beats the bar has right now.
//!
//! ```text
//!   position   0 ──tick──→ 1 ──tick──→ 2 ── … ──→ S ──tick──→ 1   (bar += 1)
//!              ↑
//!            reset
//! ```
//!
//! Position 0 means "no beat yet", so the first tick of a session always
//! lands on beat 1. The wrap test is `position >= S` against the signature
//! passed to *this* tick, which makes a signature change apply on the very
//! next tick and also handles a bar that shrank below the current position.

use crate::timing::TimeSignature;

/// What one tick turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// Beat within the bar, 1-based
    pub position: u8,
    /// Bars completed since the session started
    pub bar: u64,
    /// First beat of a bar
    pub accent: bool,
    /// This tick wrapped into a new bar
    pub new_bar: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeatCounter {
    position: u8,
    bars: u64,
}

impl BeatCounter {
    /// Counter in the "not yet started" state
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the "not yet started" state
    pub fn reset(&mut self) {
        self.position = 0;
        self.bars = 0;
    }

    /// Advance by one tick under `signature`
    pub fn tick(&mut self, signature: TimeSignature) -> Beat {
        let new_bar = self.position >= signature.beats_per_bar();
        if new_bar {
            self.position = 1;
            self.bars += 1;
        } else {
            self.position += 1;
        }

        Beat {
            position: self.position,
            bar: self.bars,
            accent: self.position == 1,
            new_bar,
        }
    }

    /// Current beat, 0 before the first tick
    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn bars(&self) -> u64 {
        self.bars
    }
}
