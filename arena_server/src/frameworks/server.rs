// Framework bootstrap for the session host.

use crate::domain::tuning::MapTuning;
use crate::frameworks::config;
use crate::interface_adapters::bots::{BotSettings, spawn_bots};
use crate::interface_adapters::serializer::{SerializedFeed, spawn_session_serializer};
use crate::use_cases::{SessionHandle, SessionSettings, SessionState, spawn_session};

use std::io::Result;
use std::time::Duration;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Host settings that sit outside a single session.
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub session: SessionSettings,
    pub bot_count: usize,
    pub bot_fire_interval: Duration,
}

/// Runs one session with scripted bots until the match ends or Ctrl-C.
pub async fn run(settings: HostSettings) -> Result<()> {
    let session = spawn_session(settings.session.clone());
    tracing::info!(
        session = %session.session_nonce,
        tick_interval_ms = settings.session.tick_interval.as_millis(),
        required_players = settings.session.required_players,
        "session started"
    );

    let feed = SerializedFeed::new(settings.session.update_broadcast_capacity);
    spawn_session_serializer(&session, feed.clone());

    let map = MapTuning::default();
    let bots = spawn_bots(
        &session,
        settings.bot_count,
        BotSettings {
            center_x: map.width / 2.0,
            center_y: map.height / 2.0,
            spawn_radius: 40.0,
            fire_interval: settings.bot_fire_interval,
        },
    );

    let outcome = tokio::select! {
        ended = wait_for_match_end(&session) => ended,
        signal = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            session.shutdown();
            signal
        }
    };

    for bot in bots {
        bot.abort();
    }
    let latest = feed.latest_tx.borrow().clone();
    tracing::info!(last_update_bytes = latest.len(), "session host stopped");

    outcome
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = HostSettings {
        session: SessionSettings {
            command_channel_capacity: config::COMMAND_CHANNEL_CAPACITY,
            update_broadcast_capacity: config::UPDATE_BROADCAST_CAPACITY,
            tick_interval: config::tick_interval(),
            required_players: config::required_players(),
            countdown: config::MATCH_COUNTDOWN,
            match_time_limit: config::match_time_limit(),
            rng_seed: config::rng_seed(),
        },
        bot_count: config::bot_count(),
        bot_fire_interval: config::BOT_FIRE_INTERVAL,
    };

    run(settings).await
}

async fn wait_for_match_end(session: &SessionHandle) -> Result<()> {
    let mut state_rx = session.subscribe_state();
    state_rx
        .wait_for(|state| *state == SessionState::MatchEnded)
        .await
        .map(|_| ())
        .map_err(|e| std::io::Error::other(format!("session state closed: {e}")))
}
