//! Click output on the default audio device
//!
//! Clicks arrive over an rtrb ring from the ticker thread. The callback only
//! pops and renders; it never locks and never waits on the ticker.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::Consumer;
use std::f32::consts::PI;

use saavy_metronome::Click;

/// Length of one click
const CLICK_MS: f32 = 30.0;

/// Two pre-rendered sine bursts, started by incoming clicks
pub struct ClickVoice {
    accent: Vec<f32>,
    regular: Vec<f32>,
    /// (accent?, position in the burst)
    playing: Option<(bool, usize)>,
    volume: f32,
}

impl ClickVoice {
    pub fn new(sample_rate: f32) -> Self {
        let len = (CLICK_MS / 1000.0 * sample_rate) as usize;
        Self {
            accent: burst(sample_rate, len, 1600.0, 0.8),
            regular: burst(sample_rate, len, 1000.0, 0.5),
            playing: None,
            volume: 0.8,
        }
    }

    /// Restart from the top of the matching burst
    pub fn trigger(&mut self, click: Click) {
        self.playing = Some((click.accent, 0));
    }

    pub fn next_sample(&mut self) -> f32 {
        let Some((accent, pos)) = self.playing.as_mut() else {
            return 0.0;
        };
        let samples = if *accent { &self.accent } else { &self.regular };

        match samples.get(*pos) {
            Some(&s) => {
                *pos += 1;
                s * self.volume
            }
            None => {
                self.playing = None;
                0.0
            }
        }
    }
}

/// Sine at `freq` under a fast exponential decay
fn burst(sample_rate: f32, len: usize, freq: f32, amplitude: f32) -> Vec<f32> {
    let step = 2.0 * PI * freq / sample_rate;
    (0..len)
        .map(|i| {
            let t = i as f32 / len as f32;
            (i as f32 * step).sin() * (-t * 8.0).exp() * amplitude
        })
        .collect()
}

/// Open the default output and play clicks from `clicks` until the stream
/// is dropped
pub fn start_output(mut clicks: Consumer<Click>) -> EyreResult<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    log::info!("audio output at {sample_rate} Hz, {channels} channels");

    let mut voice = ClickVoice::new(sample_rate);

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            // A click landing mid-buffer starts at the top of the next one;
            // at typical buffer sizes that's a few ms late and steady.
            while let Ok(click) = clicks.pop() {
                voice.trigger(click);
            }

            for frame in data.chunks_mut(channels) {
                let s = voice.next_sample();
                frame.fill(s);
            }
        },
        |err| log::error!("audio error: {err}"),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}
