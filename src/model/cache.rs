//! Cache for track metadata so revisiting a track needs no API call

use std::collections::HashMap;
use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::spotify_client::TrackInfoSource;
use super::types::TrackInfo;

/// Wraps a [`TrackInfoSource`] and remembers every successful lookup,
/// including "no metadata" answers.
#[derive(Clone)]
pub struct TrackInfoCache {
    source: Arc<dyn TrackInfoSource>,
    entries: Arc<RwLock<HashMap<String, Option<TrackInfo>>>>,
}

impl TrackInfoCache {
    pub fn new(source: Arc<dyn TrackInfoSource>) -> Self {
        Self {
            source,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl TrackInfoSource for TrackInfoCache {
    async fn track_info(&self, track_id: &str) -> Result<Option<TrackInfo>> {
        if let Some(hit) = self.entries.read().await.get(track_id) {
            tracing::trace!(track_id, "Track info cache hit");
            return Ok(hit.clone());
        }

        let info = self.source.track_info(track_id).await?;
        let mut entries = self.entries.write().await;
        entries.insert(track_id.to_string(), info.clone());
        tracing::trace!(track_id, cached = entries.len(), "Track info cached");
        Ok(info)
    }
}
