//! Pendulum widget
//!
//! Swings from one extreme to the other on every beat. The swing period is
//! derived from the snapshot's tempo; the scheduler knows nothing about it.

use ratatui::{
    layout::Rect,
    style::Color,
    widgets::{
        canvas::{Canvas, Circle, Line},
        Block, Borders,
    },
    Frame,
};
use std::f64::consts::PI;

use saavy_metronome::DisplaySnapshot;

use super::LastBeat;

/// Maximum deflection either side of vertical
const MAX_ANGLE: f64 = 20.0 * PI / 180.0;

/// Deflection in [-1, 1]; beats land on alternating extremes
fn swing(state: &DisplaySnapshot, last_beat: Option<LastBeat>) -> f64 {
    let Some(beat) = last_beat.filter(|_| state.playing) else {
        return 0.0;
    };
    let progress =
        (beat.at.elapsed().as_secs_f64() / state.tempo.interval().as_secs_f64()).min(1.0);
    let phase = (beat.count - 1) as f64 + progress;
    -(PI * phase).cos()
}

pub fn render_pendulum(
    frame: &mut Frame,
    area: Rect,
    state: &DisplaySnapshot,
    last_beat: Option<LastBeat>,
) {
    let angle = swing(state, last_beat) * MAX_ANGLE;
    let (tip_x, tip_y) = (angle.sin(), angle.cos());
    let accent = last_beat.is_some_and(|b| b.accent);

    let canvas = Canvas::default()
        .block(Block::default().title(" Pendulum ").borders(Borders::ALL))
        .x_bounds([-1.0, 1.0])
        .y_bounds([0.0, 1.1])
        .paint(move |ctx| {
            ctx.draw(&Line {
                x1: 0.0,
                y1: 0.0,
                x2: tip_x,
                y2: tip_y,
                color: Color::Gray,
            });
            ctx.draw(&Circle {
                x: tip_x * 0.7,
                y: tip_y * 0.7,
                radius: 0.06,
                color: if accent { Color::Magenta } else { Color::Red },
            });
        });

    frame.render_widget(canvas, area);
}
