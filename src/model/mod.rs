//! Model module - Shared state and the remote service contract
//!
//! - `types`: Data types exchanged with the Spotify API
//! - `store`: Shared UI state (current track, play/pause flag)
//! - `session`: Session status published by the session provider
//! - `playback`: Per-frame snapshot handed to the view
//! - `spotify_client`: Remote-control contract and its rspotify implementation
//! - `cache`: Track metadata cache

mod types;
mod store;
mod session;
mod playback;
mod spotify_client;
mod cache;

#[cfg(test)]
pub(crate) mod mock;

pub use types::{PlaybackState, TrackInfo};
pub use store::PlayerStore;
pub use session::{Session, SessionStatus};
pub use playback::PlayerBarState;
pub use spotify_client::{PlaybackApi, SpotifyClient, TrackInfoSource};
pub use cache::TrackInfoCache;
