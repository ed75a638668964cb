pub mod clock; // Time sources (wall clock, manual)
pub mod conductor; // Scheduler + counter composition, output sinks
pub mod config;
pub mod counter; // Beat/bar state machine
pub mod runtime; // Ticker thread
pub mod scheduler; // Tempo -> tick stream, cadence swaps
pub mod timing; // Tempo and time signature values

pub use conductor::{Click, Conductor, DisplaySnapshot};
pub use config::MetronomeConfig;
pub use counter::{Beat, BeatCounter};
pub use scheduler::{PlaybackState, TickEvent, TickScheduler};
pub use timing::{Tempo, TempoRange, TimeSignature};
