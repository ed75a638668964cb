//! Outputs to the collaborators that make ticks audible and visible.
//!
//! Both are fire-and-forget: the tick path never waits on an audio device or
//! a renderer.

#[cfg(feature = "rtrb")]
use log::warn;
#[cfg(feature = "rtrb")]
use rtrb::Producer;

use crate::timing::{Tempo, TimeSignature};

/// Request to play one click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Click {
    /// Play the accent sound (first beat of the bar)
    pub accent: bool,
}

/// What the display should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplaySnapshot {
    /// Current beat, 1-based; 0 while stopped or before the first tick
    pub beat_position: u8,
    /// Bars completed this session
    pub bar_count: u64,
    pub time_signature: TimeSignature,
    pub tempo: Tempo,
    pub playing: bool,
}

pub trait ClickSink {
    fn trigger(&mut self, click: Click);
}

pub trait DisplaySink {
    fn show(&mut self, snapshot: DisplaySnapshot);
}

/// Discards everything, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ClickSink for Discard {
    fn trigger(&mut self, _click: Click) {}
}

impl DisplaySink for Discard {
    fn show(&mut self, _snapshot: DisplaySnapshot) {}
}

#[cfg(feature = "rtrb")]
impl ClickSink for Producer<Click> {
    fn trigger(&mut self, click: Click) {
        if self.push(click).is_err() {
            warn!("click ring full, dropping {click:?}");
        }
    }
}

#[cfg(feature = "rtrb")]
impl DisplaySink for Producer<DisplaySnapshot> {
    fn show(&mut self, snapshot: DisplaySnapshot) {
        if self.push(snapshot).is_err() {
            warn!("display ring full, dropping snapshot");
        }
    }
}
