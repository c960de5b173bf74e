//! Runtime configuration: built-in defaults with environment overrides

use std::path::PathBuf;
use std::time::Duration;

const SPOTIFY_CLIENT_ID: &str = "492e1e45ea814fa3ac555fe1576aaf5b";
const SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8898/login";
const CACHE_DIR: &str = ".cache";

pub const VOLUME_DEBOUNCE: Duration = Duration::from_millis(500);
pub const VOLUME_STEP: u8 = 10;
pub const INITIAL_VOLUME: u8 = 50;
pub const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Clone, Debug)]
pub struct Config {
    pub client_id: String,
    pub redirect_uri: String,
    pub cache_dir: PathBuf,
    pub volume_debounce: Duration,
    pub volume_step: u8,
    pub initial_volume: u8,
    pub tick_rate: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: SPOTIFY_CLIENT_ID.to_string(),
            redirect_uri: SPOTIFY_REDIRECT_URI.to_string(),
            cache_dir: PathBuf::from(CACHE_DIR),
            volume_debounce: VOLUME_DEBOUNCE,
            volume_step: VOLUME_STEP,
            initial_volume: INITIAL_VOLUME,
            tick_rate: TICK_RATE,
        }
    }
}

impl Config {
    /// Defaults, overridden by `SPOTIFY_BAR_CLIENT_ID`,
    /// `SPOTIFY_BAR_REDIRECT_URI` and `SPOTIFY_BAR_CACHE_DIR` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(client_id) = non_empty("SPOTIFY_BAR_CLIENT_ID") {
            config.client_id = client_id;
        }
        if let Some(redirect_uri) = non_empty("SPOTIFY_BAR_REDIRECT_URI") {
            config.redirect_uri = redirect_uri;
        }
        if let Some(cache_dir) = non_empty("SPOTIFY_BAR_CACHE_DIR") {
            config.cache_dir = PathBuf::from(cache_dir);
        }
        config
    }

    pub fn refresh_token_file(&self) -> PathBuf {
        self.cache_dir.join("refresh_token")
    }
}
