//! TUI module for the metronome
//!
//! Renders the beat position, a pendulum and the transport, and turns key
//! presses into control calls on the runtime.

mod beats;
mod pendulum;
mod transport;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::{Duration, Instant};

use saavy_metronome::{runtime::Runtime, DisplaySnapshot};

use beats::render_beats;
use pendulum::render_pendulum;
use transport::render_transport;

/// Portion of the tick interval the beat light stays lit
const FLASH_FRACTION: f64 = 0.25;

/// Where the last beat landed, as seen by the UI
#[derive(Clone, Copy, Debug)]
pub struct LastBeat {
    pub at: Instant,
    pub accent: bool,
    /// Beats seen this session, 1 for the first
    pub count: u64,
}

/// UI application state
pub struct UiApp<'a> {
    runtime: &'a Runtime,
    /// Ring buffer receiver for per-beat snapshots
    display_rx: Consumer<DisplaySnapshot>,
    /// Latest state read from the runtime
    current: DisplaySnapshot,
    last_beat: Option<LastBeat>,
    should_quit: bool,
}

impl<'a> UiApp<'a> {
    pub fn new(runtime: &'a Runtime, display_rx: Consumer<DisplaySnapshot>) -> Self {
        Self {
            runtime,
            display_rx,
            current: runtime.snapshot(),
            last_beat: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_beats();
            self.current = self.runtime.snapshot();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain beat snapshots, remembering when the latest one landed
    fn poll_beats(&mut self) {
        while let Ok(snapshot) = self.display_rx.pop() {
            if !snapshot.playing {
                self.last_beat = None;
                continue;
            }
            let count = self.last_beat.map_or(1, |b| b.count + 1);
            self.last_beat = Some(LastBeat {
                at: Instant::now(),
                accent: snapshot.beat_position == 1,
                count,
            });
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.runtime.toggle();
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.runtime.nudge_tempo(1);
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.runtime.nudge_tempo(-1);
            }
            KeyCode::Char(']') | KeyCode::Right => {
                self.runtime.nudge_tempo(5);
            }
            KeyCode::Char('[') | KeyCode::Left => {
                self.runtime.nudge_tempo(-5);
            }
            KeyCode::Char(c @ '2'..='8') => {
                if let Some(beats) = c.to_digit(10) {
                    self.runtime.set_time_signature(beats);
                }
            }
            _ => {}
        }
    }

    /// True while the light for the latest beat should still be on
    fn flash_on(&self) -> bool {
        let Some(beat) = self.last_beat else {
            return false;
        };
        let window = self.current.tempo.interval().mul_f64(FLASH_FRACTION);
        self.current.playing && beat.at.elapsed() < window
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, beat lights, pendulum, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Length(3), // Beat lights
                Constraint::Min(8),    // Pendulum
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.current, self.flash_on());
        render_beats(frame, chunks[1], &self.current, self.flash_on());
        render_pendulum(frame, chunks[2], &self.current, self.last_beat);

        let help = Paragraph::new(
            " [Space] Start/Stop  [-/+] ±1 BPM  [[/]] ±5 BPM  [2-8] Beats/bar  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
