// Serializes each session update once and shares the JSON text with every subscriber.

use crate::interface_adapters::protocol::{ServerMessage, SessionStateDto, SessionUpdateDto};
use crate::use_cases::{SessionHandle, SessionState, SessionUpdate};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{error, warn};

/// Serialized session output, shared across consumers.
#[derive(Clone)]
pub struct SerializedFeed {
    /// Broadcast of every serialized message.
    pub json_tx: broadcast::Sender<Arc<str>>,
    /// Latest serialized update, for subscribers that fell behind.
    pub latest_tx: watch::Sender<Arc<str>>,
}

impl SerializedFeed {
    pub fn new(capacity: usize) -> Self {
        let (json_tx, _json_rx) = broadcast::channel::<Arc<str>>(capacity);
        let (latest_tx, _latest_rx) = watch::channel::<Arc<str>>(Arc::from(""));
        Self { json_tx, latest_tx }
    }
}

pub async fn update_serializer(
    mut update_rx: broadcast::Receiver<SessionUpdate>,
    mut state_rx: watch::Receiver<SessionState>,
    feed: SerializedFeed,
) {
    let mut state_open = true;
    loop {
        tokio::select! {
            update = update_rx.recv() => match update {
                Ok(update) => {
                    let msg = ServerMessage::SessionUpdate(SessionUpdateDto::from(update));
                    if let Some(text) = encode(&msg) {
                        feed.latest_tx.send_replace(text.clone());
                        let _ = feed.json_tx.send(text);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(missed = n, "update serializer lagged; skipping to latest update");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    warn!("session updates channel closed; serializer exiting");
                    break;
                }
            },
            changed = state_rx.changed(), if state_open => {
                if changed.is_err() {
                    // Keep draining updates until that channel closes too.
                    state_open = false;
                    continue;
                }
                let state = *state_rx.borrow_and_update();
                let msg = ServerMessage::SessionState(SessionStateDto::from(state));
                if let Some(text) = encode(&msg) {
                    let _ = feed.json_tx.send(text);
                }
            }
        }
    }
}

pub fn spawn_session_serializer(session: &SessionHandle, feed: SerializedFeed) {
    tokio::spawn(update_serializer(
        session.subscribe_updates(),
        session.subscribe_state(),
        feed,
    ));
}

fn encode(msg: &ServerMessage) -> Option<Arc<str>> {
    match serde_json::to_string(msg) {
        Ok(text) => Some(Arc::from(text)),
        Err(e) => {
            error!(error = ?e, "failed to serialize session message");
            None
        }
    }
}
