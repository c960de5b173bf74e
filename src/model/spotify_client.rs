//! Spotify API client wrapper and the remote-control contract the bar uses

use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use rspotify::{
    model::TrackId,
    prelude::*,
    AuthCodeSpotify,
};

use super::types::{CurrentTrack, DeviceInfo, PlaybackState, TrackInfo};

/// Remote playback operations on the user's account.
///
/// Device-targeted calls go to whatever device Spotify considers active.
#[async_trait]
pub trait PlaybackApi: Send + Sync {
    async fn has_access_token(&self) -> bool;
    async fn current_track(&self) -> Result<Option<CurrentTrack>>;
    /// `None` when the account has no playback context at all
    async fn playback_state(&self) -> Result<Option<PlaybackState>>;
    async fn devices(&self) -> Result<Vec<DeviceInfo>>;
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn set_volume(&self, volume: u8) -> Result<()>;
    // skip keys are bound but disabled in the bar
    #[allow(dead_code)]
    async fn skip_next(&self) -> Result<()>;
    #[allow(dead_code)]
    async fn skip_previous(&self) -> Result<()>;
}

/// Resolves a track id into display metadata
#[async_trait]
pub trait TrackInfoSource: Send + Sync {
    async fn track_info(&self, track_id: &str) -> Result<Option<TrackInfo>>;
}

/// Spotify Web API client shared between the bar and the session provider
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
}

impl SpotifyClient {
    pub fn new(client: Arc<AuthCodeSpotify>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlaybackApi for SpotifyClient {
    async fn has_access_token(&self) -> bool {
        match self.client.token.lock().await {
            Ok(token) => token.as_ref().is_some_and(|t| !t.is_expired()),
            Err(_) => false,
        }
    }

    async fn current_track(&self) -> Result<Option<CurrentTrack>> {
        tracing::trace!("API: current_playing");
        let playing = self.client.current_playing(None, None::<Vec<_>>).await?;
        Ok(playing
            .and_then(|ctx| ctx.item)
            .and_then(|item| CurrentTrack::from_item(&item)))
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>> {
        tracing::trace!("API: current_playback");
        let result = self.client.current_playback(None, None::<Vec<_>>).await?;
        if let Some(ref playback) = result {
            tracing::trace!(
                is_playing = playback.is_playing,
                device = ?playback.device.name,
                "Got playback state"
            );
        }
        Ok(result.map(|playback| PlaybackState {
            is_playing: playback.is_playing,
        }))
    }

    async fn devices(&self) -> Result<Vec<DeviceInfo>> {
        tracing::debug!("API: devices");
        let devices = self.client.device().await?;
        let device_infos: Vec<DeviceInfo> = devices
            .into_iter()
            .map(|d| DeviceInfo {
                id: d.id.unwrap_or_default(),
                name: d.name,
                is_active: d.is_active,
                volume_percent: d.volume_percent,
            })
            .collect();
        tracing::debug!(count = device_infos.len(), "Found devices");
        Ok(device_infos)
    }

    async fn play(&self) -> Result<()> {
        tracing::debug!("API: resume_playback");
        self.client.resume_playback(None, None).await?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        tracing::debug!("API: pause_playback");
        self.client.pause_playback(None).await?;
        Ok(())
    }

    async fn set_volume(&self, volume: u8) -> Result<()> {
        tracing::debug!(volume, "API: set_volume");
        self.client.volume(volume, None).await?;
        Ok(())
    }

    async fn skip_next(&self) -> Result<()> {
        tracing::debug!("API: next_track");
        self.client.next_track(None).await?;
        Ok(())
    }

    async fn skip_previous(&self) -> Result<()> {
        tracing::debug!("API: previous_track");
        self.client.previous_track(None).await?;
        Ok(())
    }
}

#[async_trait]
impl TrackInfoSource for SpotifyClient {
    async fn track_info(&self, track_id: &str) -> Result<Option<TrackInfo>> {
        let id = match TrackId::from_id(track_id) {
            Ok(id) => id,
            Err(e) => {
                // episodes and local files have no track metadata
                tracing::debug!(track_id, error = %e, "Not a track id, skipping metadata lookup");
                return Ok(None);
            }
        };

        tracing::debug!(track_id, "API: track");
        let track = self.client.track(id, None).await?;
        Ok(Some(TrackInfo::from_full_track(&track)))
    }
}
