//! In-memory stand-in for the Spotify client, used by tests

use std::collections::HashMap;
use std::mem::discriminant;
use std::sync::Mutex;
use std::time::Duration;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::spotify_client::{PlaybackApi, TrackInfoSource};
use super::types::{CurrentTrack, DeviceInfo, PlaybackState, TrackInfo};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    CurrentTrack,
    PlaybackState,
    Devices,
    Play,
    Pause,
    SetVolume(u8),
    SkipNext,
    SkipPrevious,
}

#[derive(Default)]
struct MockState {
    has_token: bool,
    devices: Vec<DeviceInfo>,
    current: Option<CurrentTrack>,
    playback: Option<PlaybackState>,
    failing: Vec<ApiCall>,
    latency: Option<Duration>,
    calls: Vec<ApiCall>,
    tracks: HashMap<String, TrackInfo>,
    track_lookups: usize,
    fail_tracks: bool,
}

pub struct MockSpotify {
    state: Mutex<MockState>,
}

impl MockSpotify {
    /// A client holding a valid token, with no devices and nothing playing
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                has_token: true,
                ..Default::default()
            }),
        }
    }

    pub fn set_token(&self, has_token: bool) {
        self.state.lock().unwrap().has_token = has_token;
    }

    pub fn add_device(&self, name: &str, is_active: bool) {
        self.state.lock().unwrap().devices.push(DeviceInfo {
            id: format!("{name}-id"),
            name: name.to_string(),
            is_active,
            volume_percent: Some(50),
        });
    }

    pub fn set_now_playing(&self, track_id: Option<&str>) {
        self.state.lock().unwrap().current = track_id.map(|id| CurrentTrack { id: id.to_string() });
    }

    pub fn set_playback(&self, playback: Option<bool>) {
        self.state.lock().unwrap().playback = playback.map(|is_playing| PlaybackState { is_playing });
    }

    pub fn fail_on(&self, call: ApiCall) {
        self.state.lock().unwrap().failing.push(call);
    }

    /// Every call sleeps this long before answering
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().unwrap().latency = Some(latency);
    }

    pub fn add_track(&self, id: &str, name: &str, artist: &str) {
        self.state.lock().unwrap().tracks.insert(
            id.to_string(),
            TrackInfo {
                name: name.to_string(),
                artists: vec![artist.to_string()],
                album_art: vec![format!("https://i.scdn.co/image/{id}")],
            },
        );
    }

    pub fn fail_track_lookups(&self, fail: bool) {
        self.state.lock().unwrap().fail_tracks = fail;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn volume_calls(&self) -> Vec<u8> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::SetVolume(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn track_lookups(&self) -> usize {
        self.state.lock().unwrap().track_lookups
    }

    async fn record(&self, call: ApiCall) -> Result<()> {
        let latency = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.clone());
            state.latency
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let state = self.state.lock().unwrap();
        if state.failing.iter().any(|f| discriminant(f) == discriminant(&call)) {
            return Err(anyhow!("mock failure for {call:?}"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlaybackApi for MockSpotify {
    async fn has_access_token(&self) -> bool {
        self.state.lock().unwrap().has_token
    }

    async fn current_track(&self) -> Result<Option<CurrentTrack>> {
        self.record(ApiCall::CurrentTrack).await?;
        Ok(self.state.lock().unwrap().current.clone())
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>> {
        self.record(ApiCall::PlaybackState).await?;
        Ok(self.state.lock().unwrap().playback)
    }

    async fn devices(&self) -> Result<Vec<DeviceInfo>> {
        self.record(ApiCall::Devices).await?;
        Ok(self.state.lock().unwrap().devices.clone())
    }

    async fn play(&self) -> Result<()> {
        self.record(ApiCall::Play).await?;
        self.state.lock().unwrap().playback = Some(PlaybackState { is_playing: true });
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.record(ApiCall::Pause).await?;
        self.state.lock().unwrap().playback = Some(PlaybackState { is_playing: false });
        Ok(())
    }

    async fn set_volume(&self, volume: u8) -> Result<()> {
        self.record(ApiCall::SetVolume(volume)).await
    }

    async fn skip_next(&self) -> Result<()> {
        self.record(ApiCall::SkipNext).await
    }

    async fn skip_previous(&self) -> Result<()> {
        self.record(ApiCall::SkipPrevious).await
    }
}

#[async_trait]
impl TrackInfoSource for MockSpotify {
    async fn track_info(&self, track_id: &str) -> Result<Option<TrackInfo>> {
        let mut state = self.state.lock().unwrap();
        state.track_lookups += 1;
        if state.fail_tracks {
            return Err(anyhow!("mock track lookup failure"));
        }
        Ok(state.tracks.get(track_id).cloned())
    }
}
