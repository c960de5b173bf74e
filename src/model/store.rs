//! Shared UI state read and written by the player bar and its siblings

use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle to the app-wide playback state.
///
/// Cloning is cheap and every clone sees the same state. Writes are
/// last-write-wins.
#[derive(Clone, Default)]
pub struct PlayerStore {
    current_track_id: Arc<Mutex<Option<String>>>,
    is_playing: Arc<Mutex<bool>>,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current_track_id(&self) -> Option<String> {
        self.current_track_id.lock().await.clone()
    }

    pub async fn set_current_track_id(&self, track_id: Option<String>) {
        *self.current_track_id.lock().await = track_id;
    }

    pub async fn is_playing(&self) -> bool {
        *self.is_playing.lock().await
    }

    pub async fn set_playing(&self, is_playing: bool) {
        *self.is_playing.lock().await = is_playing;
    }
}
