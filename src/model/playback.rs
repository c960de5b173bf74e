//! Everything the view needs to draw one frame of the player bar

use super::session::Session;
use super::types::TrackInfo;

#[derive(Clone, Debug, Default)]
pub struct PlayerBarState {
    pub track: Option<TrackInfo>,
    pub is_playing: bool,
    pub volume: u8,
    pub session: Session,
}
