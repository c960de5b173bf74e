//! Fetch-on-ready and play/pause

use crate::model::{PlaybackState, Session};

use super::PlayerBar;

impl PlayerBar {
    /// Pull the account's current track into the store when a session is
    /// ready and nothing is selected yet.
    pub async fn initialize_on_ready(&self, session: Session, current_track_id: Option<String>) {
        if !session.is_authenticated() || !self.api.has_access_token().await {
            tracing::trace!(status = ?session.status, "Session not ready, skipping initialization");
            return;
        }
        if current_track_id.is_some() {
            return;
        }

        let devices = match self.api.devices().await {
            Ok(devices) => devices,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching devices");
                return;
            }
        };

        let Some(active) = devices.iter().find(|d| d.is_active) else {
            tracing::info!(
                available_devices = devices.len(),
                "No active Spotify devices found. Please open Spotify."
            );
            return;
        };
        tracing::debug!(
            device_id = %active.id,
            device = %active.name,
            device_volume = ?active.volume_percent,
            "Found active device"
        );

        self.fetch_current_track().await;
        self.set_volume(self.initial_volume).await;
    }

    async fn fetch_current_track(&self) {
        let track = match self.api.current_track().await {
            Ok(Some(track)) => track,
            Ok(None) => {
                tracing::info!("No song is currently playing.");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching current playing track");
                return;
            }
        };

        tracing::info!(track_id = %track.id, "Now playing");
        self.store.set_current_track_id(Some(track.id)).await;

        match self.api.playback_state().await {
            Ok(state) => {
                let is_playing = state.is_some_and(|s| s.is_playing);
                self.store.set_playing(is_playing).await;
            }
            Err(e) => tracing::error!(error = %e, "Error fetching playback state"),
        }
    }

    pub async fn toggle_play_pause(&self) {
        let state = match self.api.playback_state().await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching playback state");
                return;
            }
        };
        tracing::debug!(?state, "Toggling playback");

        match state {
            Some(PlaybackState { is_playing: true }) => match self.api.pause().await {
                Ok(()) => {
                    self.store.set_playing(false).await;
                    tracing::info!("Playback paused");
                }
                Err(e) => tracing::error!(error = %e, "Error pausing playback"),
            },
            Some(PlaybackState { is_playing: false }) => match self.api.play().await {
                Ok(()) => {
                    self.store.set_playing(true).await;
                    tracing::info!("Playback resumed");
                }
                Err(e) => tracing::error!(error = %e, "Error resuming playback"),
            },
            None => tracing::info!("No active playback. Please start a song in Spotify."),
        }
    }
}
