//! Key event handling

use std::ops::ControlFlow;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::PlayerBar;

impl PlayerBar {
    /// Dispatch a key press. Remote calls run in the background so the UI
    /// loop never waits on the network. `Break` means the user asked to quit.
    pub async fn handle_key_event(&self, key: KeyEvent) -> ControlFlow<()> {
        if key.kind != KeyEventKind::Press {
            return ControlFlow::Continue(());
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ControlFlow::Break(());
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return ControlFlow::Break(()),
            KeyCode::Char(' ') => {
                let bar = self.clone();
                self.spawn(async move { bar.toggle_play_pause().await });
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.volume_up().await,
            KeyCode::Char('-') => self.volume_down().await,
            KeyCode::Right => self.nudge_volume(1).await,
            KeyCode::Left => self.nudge_volume(-1).await,
            KeyCode::Char('m') => self.set_volume(0).await,
            KeyCode::Char(c @ '0'..='9') => {
                let digit = c.to_digit(10).unwrap_or(0) as u8;
                self.set_volume(digit * 10).await;
            }
            KeyCode::Char('n') | KeyCode::Char('p') => {
                tracing::debug!(key = ?key.code, "Skip controls are disabled");
            }
            _ => {}
        }

        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use crate::controller::test_support::{harness, settle};
    use crate::model::mock::ApiCall;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn space_toggles_playback() {
        let h = harness();
        h.mock.set_playback(Some(false));

        assert!(h.bar.handle_key_event(press(KeyCode::Char(' '))).await.is_continue());
        settle().await;

        assert_eq!(h.mock.calls(), vec![ApiCall::PlaybackState, ApiCall::Play]);
        assert!(h.store.is_playing().await);
    }

    #[tokio::test(start_paused = true)]
    async fn volume_keys_adjust_volume() {
        let h = harness();

        assert!(h.bar.handle_key_event(press(KeyCode::Char('+'))).await.is_continue());
        assert_eq!(h.bar.snapshot().await.volume, 60);
        assert!(h.bar.handle_key_event(press(KeyCode::Char('-'))).await.is_continue());
        assert!(h.bar.handle_key_event(press(KeyCode::Char('-'))).await.is_continue());
        assert_eq!(h.bar.snapshot().await.volume, 40);
        assert!(h.bar.handle_key_event(press(KeyCode::Char('7'))).await.is_continue());
        assert_eq!(h.bar.snapshot().await.volume, 70);
        assert!(h.bar.handle_key_event(press(KeyCode::Left)).await.is_continue());
        settle().await;

        assert_eq!(h.bar.snapshot().await.volume, 69);
        assert_eq!(h.mock.volume_calls(), vec![69]);

        assert!(h.bar.handle_key_event(press(KeyCode::Char('m'))).await.is_continue());
        settle().await;
        assert_eq!(h.bar.snapshot().await.volume, 0);
        assert_eq!(h.mock.volume_calls(), vec![69]);
    }

    #[tokio::test(start_paused = true)]
    async fn skip_keys_never_reach_the_api() {
        let h = harness();
        h.mock.set_playback(Some(true));

        assert!(h.bar.handle_key_event(press(KeyCode::Char('n'))).await.is_continue());
        assert!(h.bar.handle_key_event(press(KeyCode::Char('p'))).await.is_continue());
        settle().await;

        assert!(h.mock.calls().is_empty());
    }

    #[tokio::test]
    async fn quit_keys_break() {
        let h = harness();

        assert!(h.bar.handle_key_event(press(KeyCode::Char('q'))).await.is_break());
        assert!(h.bar.handle_key_event(press(KeyCode::Esc)).await.is_break());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(h.bar.handle_key_event(ctrl_c).await.is_break());
    }

    #[tokio::test]
    async fn key_release_is_ignored() {
        let h = harness();
        let release = KeyEvent {
            code: KeyCode::Char('+'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert!(h.bar.handle_key_event(release).await.is_continue());
        assert_eq!(h.bar.snapshot().await.volume, 50);
    }
}
