//! metronome - terminal metronome
//!
//! Run with: cargo run --bin metronome

mod app;
mod audio;
mod logging;
mod ui;

use app::Metronome;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;

    Metronome::new().tempo(120).beats_per_bar(4).run()
}
