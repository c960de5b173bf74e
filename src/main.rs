mod auth;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use auth::SessionProvider;
use config::Config;
use controller::PlayerBar;
use model::{PlayerStore, SpotifyClient, TrackInfoCache};
use view::AppView;

const TOKEN_CHECK_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== spotify-bar starting ===");

    let config = Config::from_env();
    let session_provider = Arc::new(SessionProvider::connect(config.clone()).await?);

    let spotify = Arc::new(SpotifyClient::new(session_provider.client()));
    let tracks = Arc::new(TrackInfoCache::new(spotify.clone()));
    let store = PlayerStore::new();
    let player_bar = PlayerBar::new(store, spotify, tracks, session_provider.subscribe(), &config);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &player_bar, session_provider, config.tick_rate).await;

    player_bar.unmount();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
        return Err(err.into());
    }

    tracing::info!("spotify-bar shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    player_bar: &PlayerBar,
    session_provider: Arc<SessionProvider>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_token_check = Instant::now();

    loop {
        if last_token_check.elapsed() >= TOKEN_CHECK_INTERVAL {
            last_token_check = Instant::now();
            let provider = session_provider.clone();
            tokio::spawn(async move {
                if let Err(e) = provider.refresh_if_needed().await {
                    tracing::warn!("Token refresh check failed: {}", e);
                }
            });
        }

        player_bar.sync_effects().await;
        let state = player_bar.snapshot().await;

        terminal.draw(|f| {
            AppView::render(f, &state);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if player_bar.handle_key_event(key).await.is_break() {
                    break;
                }
            }
        }
    }

    Ok(())
}
