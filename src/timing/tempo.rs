use std::time::Duration;

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

/// Tempo in whole beats per minute
///
/// Never zero. The tick interval is always derived from this value and never
/// stored on its own, so the two cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u32", into = "u32")
)]
pub struct Tempo(u32);

impl Tempo {
    /// 120 BPM, the tempo a fresh session starts at
    pub const DEFAULT: Tempo = Tempo(120);

    /// Create a tempo; zero is raised to 1 BPM
    pub const fn new(bpm: u32) -> Self {
        if bpm == 0 {
            Tempo(1)
        } else {
            Tempo(bpm)
        }
    }

    pub const fn bpm(self) -> u32 {
        self.0
    }

    /// Time between two ticks: 60000 / bpm milliseconds
    ///
    /// Computed in nanoseconds so tempos that don't divide a minute evenly
    /// (e.g. 70 BPM) stay accurate over long sessions.
    pub fn interval(self) -> Duration {
        Duration::from_nanos(NANOS_PER_MINUTE / self.0 as u64)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for Tempo {
    fn from(bpm: u32) -> Self {
        Self::new(bpm)
    }
}

impl From<Tempo> for u32 {
    fn from(tempo: Tempo) -> Self {
        tempo.0
    }
}

impl std::fmt::Display for Tempo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} BPM", self.0)
    }
}

/// Inclusive tempo bounds applied to every tempo request
///
/// Requests outside the range are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawTempoRange", into = "RawTempoRange")
)]
pub struct TempoRange {
    min: Tempo,
    max: Tempo,
}

impl TempoRange {
    /// 20 to 320 BPM, the range of the tempo slider
    pub const DEFAULT: TempoRange = TempoRange {
        min: Tempo(20),
        max: Tempo(320),
    };

    /// Create a range; bounds given in the wrong order are swapped
    pub fn new(min: u32, max: u32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: Tempo::new(lo),
            max: Tempo::new(hi),
        }
    }

    pub fn min(&self) -> Tempo {
        self.min
    }

    pub fn max(&self) -> Tempo {
        self.max
    }

    /// Clamp a requested BPM into this range
    pub fn clamp(&self, bpm: u32) -> Tempo {
        Tempo(bpm.clamp(self.min.0, self.max.0))
    }

    /// Apply a relative change to `tempo`, saturating, then clamp
    pub fn nudge(&self, tempo: Tempo, delta: i32) -> Tempo {
        self.clamp(tempo.0.saturating_add_signed(delta))
    }

    pub fn contains(&self, tempo: Tempo) -> bool {
        tempo >= self.min && tempo <= self.max
    }
}

impl Default for TempoRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bounds as written in a config file, before ordering and zero checks
#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawTempoRange {
    min: u32,
    max: u32,
}

#[cfg(feature = "serde")]
impl From<RawTempoRange> for TempoRange {
    fn from(raw: RawTempoRange) -> Self {
        Self::new(raw.min, raw.max)
    }
}

#[cfg(feature = "serde")]
impl From<TempoRange> for RawTempoRange {
    fn from(range: TempoRange) -> Self {
        Self {
            min: range.min.0,
            max: range.max.0,
        }
    }
}
