//! View module - UI rendering
//!
//! - `player_bar`: The player bar itself

mod player_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{PlayerBarState, SessionStatus};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &PlayerBarState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Header with session + key help
                Constraint::Length(5), // Player bar
            ])
            .split(frame.area());

        Self::render_header(frame, chunks[0], state);
        player_bar::render_player_bar(frame, chunks[1], state);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &PlayerBarState) {
        let (session_text, session_color) = match state.session.status {
            SessionStatus::Authenticated => ("connected", Color::Green),
            SessionStatus::Loading => ("connecting...", Color::Yellow),
            SessionStatus::Unauthenticated => ("signed out", Color::Red),
        };

        let lines = vec![
            Line::styled(format!("Session: {}", session_text), Style::default().fg(session_color)),
            Line::default(),
            Line::from("space play/pause   +/- volume   ←/→ fine volume   0-9 set volume   m mute   q quit"),
        ];

        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spotify-bar ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(header, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use crate::model::{Session, TrackInfo};

    fn render_to_string(state: &PlayerBarState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal.draw(|f| AppView::render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_track_and_pause_icon_while_playing() {
        let state = PlayerBarState {
            track: Some(TrackInfo {
                name: "Teardrop".to_string(),
                artists: vec!["Massive Attack".to_string(), "Elizabeth Fraser".to_string()],
                album_art: vec!["https://i.scdn.co/image/ab67".to_string()],
            }),
            is_playing: true,
            volume: 35,
            session: Session::authenticated(1),
        };

        let screen = render_to_string(&state);

        assert!(screen.contains("Teardrop"));
        assert!(screen.contains("Massive Attack"));
        assert!(!screen.contains("Elizabeth Fraser"));
        assert!(screen.contains("⏸"));
        assert!(!screen.contains("▶"));
        assert!(screen.contains("35%"));
        for glyph in ["♡", "⇄", "⏮", "⏭", "↻"] {
            assert!(screen.contains(glyph), "missing {glyph}");
        }
        assert!(screen.contains("https://i.scdn.co/image/ab67"));
        assert!(screen.contains("connected"));
    }

    #[test]
    fn renders_fallback_and_play_icon_without_track() {
        let state = PlayerBarState {
            volume: 50,
            ..Default::default()
        };

        let screen = render_to_string(&state);

        assert!(screen.contains("No song playing"));
        assert!(screen.contains("▶"));
        assert!(screen.contains("50%"));
        assert!(screen.contains("connecting..."));
    }
}
