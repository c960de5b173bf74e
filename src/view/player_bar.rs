//! The player bar: now playing, transport icons, volume

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::model::{PlayerBarState, TrackInfo};

const NO_SONG: &str = "No song playing";

pub fn render_player_bar(frame: &mut Frame, area: Rect, state: &PlayerBarState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33), // Now playing
            Constraint::Percentage(34), // Transport
            Constraint::Percentage(33), // Volume
        ])
        .split(inner);

    render_now_playing(frame, columns[0], state.track.as_ref());
    render_transport(frame, columns[1], state.is_playing);
    render_volume(frame, columns[2], state.volume);
}

fn render_now_playing(frame: &mut Frame, area: Rect, track: Option<&TrackInfo>) {
    let heart = Span::styled("♡ ", Style::default().fg(Color::Gray));

    let lines = match track {
        Some(track) => vec![
            Line::from(vec![
                heart,
                Span::styled(track.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(format!("  {}", track.primary_artist().unwrap_or_default())),
            Line::from(Span::styled(
                format!("  {}", track.artwork_url().unwrap_or_default()),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![
            Line::from(vec![
                heart,
                Span::styled(NO_SONG, Style::default().fg(Color::DarkGray)),
            ]),
        ],
    };

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_transport(frame: &mut Frame, area: Rect, is_playing: bool) {
    let play_pause = if is_playing { "⏸" } else { "▶" };
    let dim = Style::default().fg(Color::Gray);

    // only play/pause responds to input; the rest mirror the full control set
    let controls = Line::from(vec![
        Span::styled("⇄", dim),
        Span::raw("   "),
        Span::styled("⏮", dim),
        Span::raw("   "),
        Span::styled(play_pause, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("⏭", dim),
        Span::raw("   "),
        Span::styled("↻", dim),
    ]);

    let paragraph = Paragraph::new(vec![Line::default(), controls]).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_volume(frame: &mut Frame, area: Rect, volume: u8) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3), // Volume down
            Constraint::Min(0),    // Slider
            Constraint::Length(3), // Volume up
        ])
        .split(rows[1]);

    frame.render_widget(Paragraph::new(" - ").alignment(Alignment::Center), parts[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .percent(u16::from(volume.min(100)))
        .label(format!("{}%", volume));
    frame.render_widget(gauge, parts[1]);

    frame.render_widget(Paragraph::new(" + ").alignment(Alignment::Center), parts[2]);
}
