//! Metronome - application builder and runner

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rtrb::RingBuffer;

use saavy_metronome::{
    clock::MonotonicClock, runtime::Runtime, Click, Conductor, DisplaySnapshot, MetronomeConfig,
};

use super::audio;
use super::logging;
use super::ui::UiApp;

/// Main application builder
pub struct Metronome {
    config: MetronomeConfig,
}

impl Metronome {
    pub fn new() -> Self {
        Self {
            config: MetronomeConfig::default(),
        }
    }

    /// Starting tempo in beats per minute
    pub fn tempo(mut self, bpm: u32) -> Self {
        self.config = self.config.tempo(bpm);
        self
    }

    /// Starting beats per bar
    pub fn beats_per_bar(mut self, beats: u32) -> Self {
        self.config = self.config.beats_per_bar(beats);
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let (click_tx, click_rx) = RingBuffer::<Click>::new(self.config.click_queue.max(1));
        let (display_tx, display_rx) = RingBuffer::<DisplaySnapshot>::new(self.config.display_queue.max(1));

        let conductor = Conductor::new(&self.config, MonotonicClock::new(), click_tx, display_tx);
        let runtime = Runtime::spawn(conductor).wrap_err("failed to start ticker")?;

        // Keep the stream alive for the whole UI session
        let _stream = audio::start_output(click_rx)?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(&runtime, display_rx).run(&mut terminal);
        ratatui::restore();

        runtime.shutdown()?;
        println!("log written to {}", logging::log_path().display());
        result
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new()
    }
}
