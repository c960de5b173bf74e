use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};

use rspotify::{AuthCodeSpotify, Config as RspotifyConfig, Token};
use librespot_oauth::{OAuthClient, OAuthClientBuilder};

use crate::config::Config;
use crate::model::{Session, SessionStatus};

pub const SCOPES: &str =
    "user-read-playback-state user-modify-playback-state user-read-currently-playing";

const RESPONSE: &str = r#"
<!doctype html>
<html>
<head><title>Success</title></head>
<body><h1>Authentication Successful!</h1><script>window.close();</script></body>
</html>
"#;

const TOKEN_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 300;

/// Owns the Spotify credentials and publishes the session status.
///
/// The rspotify client it hands out always carries the latest access token.
pub struct SessionProvider {
    config: Config,
    client: Arc<AuthCodeSpotify>,
    refresh_token: RwLock<String>,
    expires_at: RwLock<Option<DateTime<Utc>>>,
    session: watch::Sender<Session>,
}

impl SessionProvider {
    /// Authenticate, reusing a cached refresh token when one works
    pub async fn connect(config: Config) -> Result<Self> {
        let client = AuthCodeSpotify::with_config(
            Default::default(),
            Default::default(),
            RspotifyConfig {
                token_cached: false,
                token_refreshing: false,
                ..Default::default()
            },
        );
        let (session, _) = watch::channel(Session::default());

        let provider = Self {
            config,
            client: Arc::new(client),
            refresh_token: RwLock::new(String::new()),
            expires_at: RwLock::new(None),
            session,
        };

        provider.authenticate().await?;
        Ok(provider)
    }

    pub fn client(&self) -> Arc<AuthCodeSpotify> {
        self.client.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    async fn authenticate(&self) -> Result<()> {
        fs::create_dir_all(&self.config.cache_dir)
            .with_context(|| format!("creating {}", self.config.cache_dir.display()))?;

        let stored_refresh_token = fs::read_to_string(self.config.refresh_token_file())
            .ok()
            .filter(|t| !t.trim().is_empty());

        let (access_token, refresh_token) = match stored_refresh_token {
            Some(refresh_token) => {
                tracing::info!("Found cached refresh token");
                match self.oauth_client(false)?.refresh_token_async(refresh_token.trim()).await {
                    Ok(token) => {
                        tracing::debug!("Token refreshed successfully");
                        (token.access_token, token.refresh_token)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Cached refresh token failed, re-authenticating");
                        self.browser_auth().await?
                    }
                }
            }
            None => {
                tracing::info!("No cached credentials found, starting browser authentication");
                self.browser_auth().await?
            }
        };

        self.install_token(access_token, refresh_token).await
    }

    async fn browser_auth(&self) -> Result<(String, String)> {
        tracing::info!("Starting browser-based OAuth flow");
        let token = self
            .oauth_client(true)?
            .get_access_token_async()
            .await
            .context("browser authentication failed")?;
        tracing::info!("Browser authentication completed successfully");
        Ok((token.access_token, token.refresh_token))
    }

    fn oauth_client(&self, interactive: bool) -> Result<OAuthClient> {
        let mut builder = OAuthClientBuilder::new(
            &self.config.client_id,
            &self.config.redirect_uri,
            SCOPES.split_whitespace().collect(),
        );
        if interactive {
            builder = builder.open_in_browser().with_custom_message(RESPONSE);
        }
        Ok(builder.build()?)
    }

    async fn install_token(&self, access_token: String, refresh_token: String) -> Result<()> {
        if let Err(e) = fs::write(self.config.refresh_token_file(), &refresh_token) {
            tracing::warn!(error = %e, "Could not persist refresh token");
        }

        let expires_at = Utc::now() + chrono::Duration::seconds(TOKEN_LIFETIME_SECS);
        let token = Token {
            access_token,
            expires_in: chrono::Duration::seconds(TOKEN_LIFETIME_SECS),
            expires_at: Some(expires_at),
            scopes: SCOPES
                .split_whitespace()
                .map(|s| s.to_string())
                .collect::<HashSet<String>>(),
            refresh_token: None,
        };

        *self
            .client
            .token
            .lock()
            .await
            .map_err(|_| anyhow::anyhow!("rspotify token lock poisoned"))? = Some(token);
        *self.refresh_token.write().await = refresh_token;
        *self.expires_at.write().await = Some(expires_at);

        self.session.send_modify(|s| *s = Session::authenticated(s.generation + 1));
        tracing::debug!(generation = self.session.borrow().generation, "Session token installed");
        Ok(())
    }

    pub async fn token_needs_refresh(&self) -> bool {
        match *self.expires_at.read().await {
            Some(exp) => (exp - Utc::now()).num_seconds() < REFRESH_MARGIN_SECS,
            None => false,
        }
    }

    pub async fn refresh_if_needed(&self) -> Result<bool> {
        if !self.token_needs_refresh().await {
            return Ok(false);
        }

        tracing::info!("Token expiring soon, refreshing...");
        let refresh_token = self.refresh_token.read().await.clone();
        match self.oauth_client(false)?.refresh_token_async(&refresh_token).await {
            Ok(token) => {
                self.install_token(token.access_token, token.refresh_token).await?;
                tracing::info!("Token refreshed successfully");
                Ok(true)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh token");
                self.session.send_modify(|s| s.status = SessionStatus::Unauthenticated);
                Err(e.into())
            }
        }
    }
}
