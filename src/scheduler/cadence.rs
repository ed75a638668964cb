use std::time::Duration;

/// Identity of one cadence
///
/// Strictly increasing over the lifetime of a scheduler. A tick is only acted
/// on when its generation is the scheduler's current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub(crate) fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// One pulse from the scheduler
///
/// Carries no musical meaning; beat and accent are decided by whoever
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Cadence that produced this tick
    pub generation: Generation,
    /// Scheduler time the tick was due at
    pub due: Duration,
    /// 0-based index of this tick within its cadence
    pub index: u64,
}

/// Evenly spaced ticks at a fixed interval
///
/// Deadlines advance from the previous deadline, not from when the tick was
/// observed, so a late wake-up doesn't push every following tick back.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    generation: Generation,
    interval: Duration,
    next_due: Duration,
    emitted: u64,
}

impl Cadence {
    pub fn new(generation: Generation, interval: Duration, first_due: Duration) -> Self {
        Self {
            generation,
            interval,
            next_due: first_due,
            emitted: 0,
        }
    }

    /// Emit the tick due at or before `now`, if any
    ///
    /// At most one tick per call. When more than a whole interval has been
    /// missed, the late tick is emitted once and the cadence re-anchors at
    /// `now + interval` instead of bursting out the backlog.
    pub fn fire(&mut self, now: Duration) -> Option<TickEvent> {
        if now < self.next_due {
            return None;
        }

        let event = TickEvent {
            generation: self.generation,
            due: self.next_due,
            index: self.emitted,
        };
        self.emitted += 1;

        let following = self.next_due + self.interval;
        self.next_due = if now > following { now + self.interval } else { following };

        Some(event)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }
}
