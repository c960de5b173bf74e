//! Session status as published by the session provider

/// Whether the app currently holds a usable Spotify session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Snapshot of the session. `generation` changes every time the access
/// token is replaced, so watchers can tell a refreshed session apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Session {
    pub status: SessionStatus,
    pub generation: u64,
}

impl Session {
    pub fn authenticated(generation: u64) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            generation,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}
