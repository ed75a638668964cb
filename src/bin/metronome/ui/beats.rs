//! Beat lights - one cell per beat in the bar, current one lit

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_metronome::DisplaySnapshot;

pub fn render_beats(frame: &mut Frame, area: Rect, state: &DisplaySnapshot, flash: bool) {
    let block = Block::default().title(" Beats ").borders(Borders::ALL);

    let beats = state.time_signature.beats_per_bar();
    let spans: Vec<Span> = (1..=beats)
        .map(|beat| {
            let current = state.playing && beat == state.beat_position;
            let style = match (current, beat == 1) {
                (true, true) => Style::default().bg(Color::Magenta).fg(Color::White),
                (true, false) => Style::default().bg(Color::Red).fg(Color::White),
                (false, _) => Style::default().bg(Color::DarkGray).fg(Color::Gray),
            };
            let style = if current && flash {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            Span::styled(format!(" {beat} "), style)
        })
        .flat_map(|cell| [cell, Span::raw(" ")])
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
