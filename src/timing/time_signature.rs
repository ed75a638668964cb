/// Time signature, reduced to what a click track needs: beats per bar
///
/// The beat unit (quarter, eighth) only changes how a bar is notated, not
/// how often the metronome clicks, so it isn't modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u32", into = "u32")
)]
pub struct TimeSignature {
    beats_per_bar: u8,
}

impl TimeSignature {
    /// Smallest supported bar
    pub const MIN_BEATS: u8 = 2;
    /// Largest supported bar
    pub const MAX_BEATS: u8 = 8;

    /// 2/4 time (march)
    pub const TWO_FOUR: TimeSignature = TimeSignature { beats_per_bar: 2 };

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature { beats_per_bar: 3 };

    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature { beats_per_bar: 4 };

    /// 5/4 time
    pub const FIVE_FOUR: TimeSignature = TimeSignature { beats_per_bar: 5 };

    /// 6/8 time, counted in six
    pub const SIX_EIGHT: TimeSignature = TimeSignature { beats_per_bar: 6 };

    /// 7/8 time, counted in seven
    pub const SEVEN_EIGHT: TimeSignature = TimeSignature { beats_per_bar: 7 };

    /// 8/8 time, counted in eight
    pub const EIGHT_EIGHT: TimeSignature = TimeSignature { beats_per_bar: 8 };

    /// Create a time signature, clamping into [`MIN_BEATS`, `MAX_BEATS`]
    ///
    /// Controls are expected to offer only valid values; programmatic callers
    /// that pass anything else get the nearest supported bar.
    ///
    /// [`MIN_BEATS`]: Self::MIN_BEATS
    /// [`MAX_BEATS`]: Self::MAX_BEATS
    pub fn clamped(beats_per_bar: u32) -> Self {
        let beats = beats_per_bar.clamp(Self::MIN_BEATS as u32, Self::MAX_BEATS as u32);
        Self {
            beats_per_bar: beats as u8,
        }
    }

    /// Number of beats in one bar
    pub fn beats_per_bar(&self) -> u8 {
        self.beats_per_bar
    }
}

impl From<u32> for TimeSignature {
    fn from(beats_per_bar: u32) -> Self {
        Self::clamped(beats_per_bar)
    }
}

impl From<TimeSignature> for u32 {
    fn from(signature: TimeSignature) -> Self {
        signature.beats_per_bar as u32
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} beats/bar", self.beats_per_bar)
    }
}
