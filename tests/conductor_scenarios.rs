//! Conductor behaviour on a hand-driven clock: exact tick times, beat
//! numbering, and what happens when tempo or signature change mid-bar.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use saavy_metronome::{
    clock::{Clock, ManualClock},
    conductor::{ClickSink, DisplaySink},
    Click, Conductor, DisplaySnapshot, MetronomeConfig, PlaybackState,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// One delivered beat, as the collaborators saw it
#[derive(Debug, Clone, Copy, PartialEq)]
struct Seen {
    at: Duration,
    click: Click,
    snapshot: DisplaySnapshot,
}

#[derive(Clone, Default)]
struct Recorder {
    clicks: Arc<Mutex<Vec<Click>>>,
    snapshots: Arc<Mutex<Vec<DisplaySnapshot>>>,
}

impl ClickSink for Recorder {
    fn trigger(&mut self, click: Click) {
        self.clicks.lock().unwrap().push(click);
    }
}

impl DisplaySink for Recorder {
    fn show(&mut self, snapshot: DisplaySnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }
}

struct Rig {
    conductor: Conductor,
    clock: ManualClock,
    recorder: Recorder,
    seen: Vec<Seen>,
}

impl Rig {
    fn new(config: MetronomeConfig) -> Self {
        let clock = ManualClock::new();
        let recorder = Recorder::default();
        let conductor = Conductor::new(&config, clock.clone(), recorder.clone(), recorder.clone());
        Self {
            conductor,
            clock,
            recorder,
            seen: Vec::new(),
        }
    }

    /// Advance in 1ms steps up to `until`, pumping after every step
    fn run_until(&mut self, until: Duration) {
        while self.clock.now() < until {
            self.clock.advance(ms(1));
            for _ in 0..self.conductor.pump() {
                let click = *self.recorder.clicks.lock().unwrap().last().unwrap();
                let snapshot = *self.recorder.snapshots.lock().unwrap().last().unwrap();
                self.seen.push(Seen {
                    at: self.clock.now(),
                    click,
                    snapshot,
                });
            }
        }
    }

    fn run_for(&mut self, span: Duration) {
        let until = self.clock.now() + span;
        self.run_until(until);
    }

    fn positions(&self) -> Vec<u8> {
        self.seen.iter().map(|s| s.snapshot.beat_position).collect()
    }

    fn gaps(&self) -> Vec<Duration> {
        self.seen.windows(2).map(|w| w[1].at - w[0].at).collect()
    }
}

#[test]
fn four_four_at_120_bpm() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(120).beats_per_bar(4));
    rig.conductor.toggle();
    rig.run_until(ms(2500));

    let times: Vec<Duration> = rig.seen.iter().map(|s| s.at).collect();
    assert_eq!(times, vec![ms(500), ms(1000), ms(1500), ms(2000), ms(2500)]);
    assert_eq!(rig.positions(), vec![1, 2, 3, 4, 1]);

    let accents: Vec<bool> = rig.seen.iter().map(|s| s.click.accent).collect();
    assert_eq!(accents, vec![true, false, false, false, true]);

    let bars: Vec<u64> = rig.seen.iter().map(|s| s.snapshot.bar_count).collect();
    assert_eq!(bars, vec![0, 0, 0, 0, 1]);
}

#[test]
fn retune_mid_interval_keeps_counting() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(60).beats_per_bar(4));
    rig.conductor.toggle();

    // Beats 1..3 at 1000ms spacing
    rig.run_until(ms(3000));
    assert_eq!(rig.positions(), vec![1, 2, 3]);

    // Halfway to beat 4, double the tempo
    rig.run_until(ms(3400));
    assert_eq!(rig.conductor.set_tempo(120).bpm(), 120);

    rig.run_until(ms(4400));
    assert_eq!(rig.seen.len(), 5);

    let fourth = rig.seen[3];
    assert_eq!(fourth.snapshot.beat_position, 4);
    assert!(!fourth.click.accent);
    assert_eq!(fourth.at, ms(3900));

    let fifth = rig.seen[4];
    assert_eq!(fifth.snapshot.beat_position, 1);
    assert!(fifth.click.accent);
    assert_eq!(fifth.snapshot.bar_count, 1);
    assert_eq!(fifth.at - fourth.at, ms(500));
}

#[test]
fn tempo_changes_never_crowd_or_stall_ticks() {
    let pause = ms(25);
    let changes: [(u32, u32, u64); 6] = [
        (60, 120, 1),
        (120, 60, 37),
        (200, 45, 150),
        (45, 320, 990),
        (320, 20, 100),
        (97, 98, 333),
    ];

    for (old, new, offset) in changes {
        let config = MetronomeConfig::new().tempo(old).retune_pause(pause);
        let mut rig = Rig::new(config);
        let old_interval = saavy_metronome::Tempo::new(old).interval();
        let new_interval = saavy_metronome::Tempo::new(new).interval();

        rig.conductor.toggle();
        // Land the change `offset` ms after some tick of the old cadence
        rig.run_for(old_interval * 2);
        rig.run_for(ms(offset).min(old_interval - ms(1)));
        rig.conductor.set_tempo(new);
        rig.run_for(old_interval + new_interval * 4 + pause);

        let floor = old_interval.min(new_interval);
        let ceiling = old_interval + new_interval + pause;
        for gap in rig.gaps() {
            assert!(gap >= floor.saturating_sub(ms(1)), "{old}->{new}: gap {gap:?} < {floor:?}");
            assert!(gap <= ceiling + ms(1), "{old}->{new}: gap {gap:?} > {ceiling:?}");
        }
    }
}

#[test]
fn repeated_unchanged_settings_leave_the_cadence_alone() {
    let config = MetronomeConfig::new().tempo(320).beats_per_bar(4);
    let mut steady = Rig::new(config.clone());
    let mut busy = Rig::new(config);
    steady.conductor.toggle();
    busy.conductor.toggle();

    // Faster than one 187.5ms interval, so a swap on each call would starve the ticks
    for _ in 0..30 {
        steady.run_for(ms(100));
        busy.run_for(ms(100));
        assert_eq!(busy.conductor.nudge_tempo(5).bpm(), 320);
        assert_eq!(busy.conductor.set_tempo(320).bpm(), 320);
        assert_eq!(busy.conductor.set_time_signature(4).beats_per_bar(), 4);
    }

    let times = |rig: &Rig| rig.seen.iter().map(|s| s.at).collect::<Vec<_>>();
    assert_eq!(steady.seen.len(), 16);
    assert_eq!(times(&busy), times(&steady));
    assert_eq!(busy.positions(), steady.positions());
    assert_eq!(busy.conductor.scheduler().generation(), steady.conductor.scheduler().generation());
}

#[test]
fn signature_change_applies_on_the_next_tick() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(120).beats_per_bar(4));
    rig.conductor.toggle();
    rig.run_until(ms(1500));
    assert_eq!(rig.positions(), vec![1, 2, 3]);

    rig.conductor.set_time_signature(3);
    rig.run_for(ms(2000));

    assert_eq!(rig.positions(), vec![1, 2, 3, 1, 2, 3, 1]);
    assert!(rig.seen[3].click.accent);
    assert_eq!(rig.seen[3].snapshot.bar_count, 1);
    assert_eq!(rig.seen[3].snapshot.time_signature.beats_per_bar(), 3);
}

#[test]
fn shrinking_signature_below_position_wraps_cleanly() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(240).beats_per_bar(7));
    rig.conductor.toggle();
    rig.run_until(ms(1500));
    assert_eq!(rig.positions(), vec![1, 2, 3, 4, 5, 6]);

    rig.conductor.set_time_signature(4);
    rig.run_for(ms(1000));

    assert_eq!(&rig.positions()[6..], &[1, 2, 3, 4]);
    assert_eq!(rig.seen[6].snapshot.bar_count, 1);
}

#[test]
fn restart_begins_a_fresh_session() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(300).beats_per_bar(3));
    rig.conductor.toggle();
    rig.run_until(ms(2000));
    assert!(rig.seen.last().unwrap().snapshot.bar_count >= 2);

    assert_eq!(rig.conductor.toggle(), PlaybackState::Stopped);
    rig.run_for(ms(1000));
    let before = rig.seen.len();

    assert_eq!(rig.conductor.toggle(), PlaybackState::Running);
    rig.run_for(ms(200));

    let first = rig.seen[before];
    assert_eq!(first.snapshot.beat_position, 1);
    assert_eq!(first.snapshot.bar_count, 0);
    assert!(first.click.accent);
}

#[test]
fn stopping_twice_equals_stopping_once() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(120));
    rig.conductor.toggle();
    rig.run_until(ms(1200));

    rig.conductor.stop();
    let snapshots = rig.recorder.snapshots.lock().unwrap().len();
    rig.conductor.stop();

    assert_eq!(rig.conductor.state(), PlaybackState::Stopped);
    assert_eq!(rig.recorder.snapshots.lock().unwrap().len(), snapshots);

    let beats = rig.seen.len();
    rig.run_for(ms(3000));
    assert_eq!(rig.seen.len(), beats);
    assert!(rig.conductor.time_until_next_tick().is_none());
}

#[test]
fn redundant_start_keeps_the_cadence() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(120));
    rig.conductor.start();
    rig.run_until(ms(700));
    rig.conductor.start();
    rig.run_until(ms(1500));

    let times: Vec<Duration> = rig.seen.iter().map(|s| s.at).collect();
    assert_eq!(times, vec![ms(500), ms(1000), ms(1500)]);
    assert_eq!(rig.positions(), vec![1, 2, 3]);
}

#[test]
fn settings_change_while_stopped_fires_nothing() {
    let mut rig = Rig::new(MetronomeConfig::new());
    rig.conductor.set_tempo(200);
    rig.conductor.set_time_signature(6);
    rig.run_for(ms(3000));

    assert!(rig.seen.is_empty());
    assert!(rig.recorder.clicks.lock().unwrap().is_empty());

    let snapshot = rig.conductor.snapshot();
    assert_eq!(snapshot.tempo.bpm(), 200);
    assert_eq!(snapshot.time_signature.beats_per_bar(), 6);
    assert!(!snapshot.playing);
}

#[test]
fn no_stale_tick_is_ever_acted_on() {
    let mut rig = Rig::new(MetronomeConfig::new().tempo(100));
    rig.conductor.toggle();

    for step in 0..40u32 {
        rig.run_for(ms(137));
        match step % 4 {
            0 => {
                rig.conductor.set_tempo(80 + step * 5);
            }
            1 => {
                rig.conductor.set_time_signature(2 + step % 7);
            }
            2 => {
                rig.conductor.nudge_tempo(-3);
            }
            _ => {}
        }
    }

    let stats = rig.conductor.stats();
    assert_eq!(stats.stale, 0);
    assert_eq!(stats.delivered as usize, rig.seen.len());
}
