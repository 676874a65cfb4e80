// Shared helpers for driving a session through its channels in integration tests.
use arena_server::use_cases::{SessionSettings, SessionState, SessionUpdate};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

pub const TICK: Duration = Duration::from_millis(100);

// Settings with no countdown and no time limit; tests override what they need.
pub fn settings(required_players: usize) -> SessionSettings {
    SessionSettings {
        command_channel_capacity: 64,
        update_broadcast_capacity: 256,
        tick_interval: TICK,
        required_players,
        countdown: Duration::ZERO,
        match_time_limit: Duration::ZERO,
        rng_seed: Some(7),
    }
}

// Block until the session publishes `expected`, failing after a generous timeout.
pub async fn wait_for_state(state_rx: &mut watch::Receiver<SessionState>, expected: SessionState) {
    tokio::time::timeout(Duration::from_secs(30), state_rx.wait_for(|s| *s == expected))
        .await
        .expect("state change should arrive in time")
        .expect("session state channel should stay open");
}

// Receive updates until one satisfies `pred`, failing after a bounded number of ticks.
pub async fn next_update_matching(
    update_rx: &mut broadcast::Receiver<SessionUpdate>,
    pred: impl Fn(&SessionUpdate) -> bool,
) -> SessionUpdate {
    for _ in 0..300 {
        let update = tokio::time::timeout(Duration::from_secs(5), update_rx.recv())
            .await
            .expect("update should arrive in time")
            .expect("update channel should stay open");
        if pred(&update) {
            return update;
        }
    }
    panic!("no matching update within 300 ticks");
}
