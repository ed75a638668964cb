pub mod tempo;
pub mod time_signature;

pub use tempo::{Tempo, TempoRange};
pub use time_signature::TimeSignature;
