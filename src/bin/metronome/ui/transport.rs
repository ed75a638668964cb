//! Transport bar widget - shows tempo, signature, play state and bar count

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_metronome::{DisplaySnapshot, TimeSignature};

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, state: &DisplaySnapshot, flash: bool) {
    let block = Block::default()
        .title(" metronome ")
        .borders(Borders::ALL);

    let play_symbol = if state.playing { "▶" } else { "■" };
    let play_state_str = if state.playing { "Playing" } else { "Stopped" };
    let tick_symbol = if flash { "●" } else { "○" };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {}  ", state.tempo.bpm()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}  ", signature_label(state.time_signature)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if state.playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("Bars: {}  ", state.bar_count),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{} ", tick_symbol),
            Style::default().fg(if state.beat_position == 1 {
                Color::Magenta
            } else {
                Color::Red
            }),
        ),
        Span::styled(
            format!("{:.0}ms/beat", state.tempo.interval().as_secs_f64() * 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

/// Bars up to five beats are shown in quarters, longer ones in eighths
fn signature_label(signature: TimeSignature) -> String {
    let beats = signature.beats_per_bar();
    let unit = if beats <= 5 { 4 } else { 8 };
    format!("{beats}/{unit}")
}
