//! Controller module - the player bar's behavior
//!
//! - `debounce`: Quiet-period coalescing used for volume pushes
//! - `playback`: Fetch-on-ready and play/pause
//! - `volume`: Step and slider volume controls
//! - `input`: Key event handling

mod debounce;
mod playback;
mod volume;
mod input;

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::log_api_result;
use crate::model::{PlaybackApi, PlayerBarState, PlayerStore, Session, TrackInfo, TrackInfoSource};

use debounce::Debouncer;

/// Inputs of the fetch-on-ready effect; it re-runs whenever they change
#[derive(Clone, Debug, PartialEq, Eq)]
struct InitDeps {
    session: Session,
    track_id: Option<String>,
}

#[derive(Default)]
struct Effects {
    mounted: bool,
    init: Option<InitDeps>,
    resolved_for: Option<String>,
}

#[derive(Clone)]
pub struct PlayerBar {
    pub(crate) store: PlayerStore,
    pub(crate) api: Arc<dyn PlaybackApi>,
    tracks: Arc<dyn TrackInfoSource>,
    session: watch::Receiver<Session>,
    pub(crate) volume: Arc<Mutex<u8>>,
    track_info: Arc<Mutex<Option<TrackInfo>>>,
    volume_push: Arc<Debouncer<u8>>,
    effects: Arc<Mutex<Effects>>,
    lifetime: CancellationToken,
    pub(crate) volume_step: u8,
    pub(crate) initial_volume: u8,
}

impl PlayerBar {
    pub fn new(
        store: PlayerStore,
        api: Arc<dyn PlaybackApi>,
        tracks: Arc<dyn TrackInfoSource>,
        session: watch::Receiver<Session>,
        config: &Config,
    ) -> Self {
        let lifetime = CancellationToken::new();

        let push_api = api.clone();
        let volume_push = Debouncer::new(config.volume_debounce, lifetime.child_token(), move |volume: u8| {
            let api = push_api.clone();
            async move {
                if !api.has_access_token().await {
                    tracing::info!(volume, "No access token available, volume not pushed");
                    return;
                }
                let result = api.set_volume(volume).await;
                log_api_result!("set_volume", result);
            }
        });

        Self {
            store,
            api,
            tracks,
            session,
            volume: Arc::new(Mutex::new(config.initial_volume)),
            track_info: Arc::new(Mutex::new(None)),
            volume_push: Arc::new(volume_push),
            effects: Arc::new(Mutex::new(Effects::default())),
            lifetime,
            volume_step: config.volume_step,
            initial_volume: config.initial_volume,
        }
    }

    /// Re-run effects whose inputs changed since the last call. Called once
    /// per UI tick.
    pub async fn sync_effects(&self) {
        if !self.is_mounted() {
            return;
        }

        let session = *self.session.borrow();
        let track_id = self.store.current_track_id().await;
        let mut effects = self.effects.lock().await;

        // the starting volume goes out like any other change
        if !effects.mounted {
            effects.mounted = true;
            let volume = *self.volume.lock().await;
            if volume::is_pushable(volume) {
                self.volume_push.call(volume);
            }
        }

        let deps = InitDeps {
            session,
            track_id: track_id.clone(),
        };
        if effects.init.as_ref() != Some(&deps) {
            tracing::trace!(?deps, "Initialization inputs changed");
            effects.init = Some(deps);
            let bar = self.clone();
            let current = track_id.clone();
            self.spawn(async move { bar.initialize_on_ready(session, current).await });
        }

        if effects.resolved_for != track_id {
            effects.resolved_for = track_id.clone();
            *self.track_info.lock().await = None;
            if let Some(id) = track_id {
                let bar = self.clone();
                self.spawn(async move { bar.resolve_track(id).await });
            }
        }
    }

    async fn resolve_track(&self, track_id: String) {
        match self.tracks.track_info(&track_id).await {
            Ok(info) => {
                let mut slot = self.track_info.lock().await;
                // the store may have moved on while the lookup was in flight
                if self.store.current_track_id().await.as_deref() == Some(track_id.as_str()) {
                    *slot = info;
                } else {
                    tracing::debug!(track_id, "Discarding metadata for a track that is no longer current");
                }
            }
            Err(e) => tracing::error!(track_id, error = %e, "Error fetching track metadata"),
        }
    }

    pub async fn snapshot(&self) -> PlayerBarState {
        let session = *self.session.borrow();
        PlayerBarState {
            track: self.track_info.lock().await.clone(),
            is_playing: self.store.is_playing().await,
            volume: *self.volume.lock().await,
            session,
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.lifetime.is_cancelled()
    }

    /// Tear the bar down: the pending volume push is dropped and in-flight
    /// tasks stop before writing any state.
    pub fn unmount(&self) {
        tracing::debug!("Unmounting player bar");
        self.lifetime.cancel();
        self.volume_push.cancel();
    }

    /// Run `task` in the background for as long as the bar is mounted
    pub(crate) fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let lifetime = self.lifetime.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = lifetime.cancelled() => tracing::trace!("Task dropped after unmount"),
                _ = task => {}
            }
        });
    }
}
