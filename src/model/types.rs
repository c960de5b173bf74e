//! Core type definitions for the player bar

use rspotify::model::{FullTrack, PlayableItem};
use rspotify::prelude::Id;

/// Information about a Spotify playback device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub volume_percent: Option<u32>,
}

/// The item the account is currently playing, as reported by the API
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentTrack {
    pub id: String,
}

impl CurrentTrack {
    pub fn from_item(item: &PlayableItem) -> Option<Self> {
        let id = match item {
            PlayableItem::Track(track) => track.id.as_ref().map(|id| id.id().to_string()),
            PlayableItem::Episode(episode) => Some(episode.id.id().to_string()),
            PlayableItem::Unknown(_) => None,
        }?;
        Some(Self { id })
    }
}

/// Body of the playback-state endpoint, reduced to what the bar reads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
}

/// Display metadata for a track
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub name: String,
    pub artists: Vec<String>,
    /// Album art URLs, largest first
    pub album_art: Vec<String>,
}

impl TrackInfo {
    pub fn from_full_track(track: &FullTrack) -> Self {
        Self {
            name: track.name.clone(),
            artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            album_art: track.album.images.iter().map(|i| i.url.clone()).collect(),
        }
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(String::as_str)
    }

    pub fn artwork_url(&self) -> Option<&str> {
        self.album_art.first().map(String::as_str)
    }
}
