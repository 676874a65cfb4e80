// Scripted players that drive a session when no network client is attached.

use crate::domain::{ActorSnapshot, Nonce};
use crate::use_cases::{SessionCommand, SessionHandle, SessionUpdate};
use crate::utils::rng::next_nonce;
use std::f32::consts::TAU;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Where bots gather and how often they shoot.
#[derive(Debug, Clone, Copy)]
pub struct BotSettings {
    pub center_x: f32,
    pub center_y: f32,
    /// Bots spawn evenly spaced on a circle of this radius.
    pub spawn_radius: f32,
    pub fire_interval: Duration,
}

/// Spawns `count` bots around the configured center.
pub fn spawn_bots(session: &SessionHandle, count: usize, settings: BotSettings) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|index| {
            let angle = TAU * index as f32 / count.max(1) as f32;
            let x = settings.center_x + settings.spawn_radius * angle.cos();
            let y = settings.center_y + settings.spawn_radius * angle.sin();
            tokio::spawn(run_bot(
                session.clone(),
                next_nonce(),
                x,
                y,
                settings.fire_interval,
            ))
        })
        .collect()
}

/// Joins the session, then keeps aiming at the closest rival and firing until
/// the bot is eliminated or the session goes away.
pub async fn run_bot(session: SessionHandle, nonce: Nonce, x: f32, y: f32, fire_interval: Duration) {
    let mut update_rx = session.subscribe_updates();
    let join = SessionCommand::Join {
        nonce,
        x,
        y,
        color: "salmon".to_string(),
    };
    if session.send(join).await.is_err() {
        return;
    }
    info!(bot = %nonce, x, y, "bot joined");

    let mut latest: Option<SessionUpdate> = None;
    let mut ticker = tokio::time::interval(fire_interval);

    loop {
        tokio::select! {
            update = update_rx.recv() => match update {
                Ok(update) => {
                    if !update.actors.iter().any(|a| a.nonce == nonce) {
                        info!(bot = %nonce, server_time = update.server_time, "bot eliminated");
                        break;
                    }
                    latest = Some(update);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    debug!(bot = %nonce, missed = n, "bot lagged behind updates");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = ticker.tick() => {
                let Some(update) = latest.as_ref() else {
                    continue;
                };
                let Some((me, target)) = own_and_nearest_rival(update, nonce) else {
                    continue;
                };
                let rotation_degrees = aim_degrees((me.x, me.y), (target.x, target.y));

                let aim = SessionCommand::Aim { nonce, rotation_degrees };
                if session.send(aim).await.is_err() {
                    break;
                }
                if session.send(SessionCommand::Fire { nonce }).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Heading in degrees from `from` to `to`, measured from +x toward +y.
pub fn aim_degrees(from: (f32, f32), to: (f32, f32)) -> f32 {
    (to.1 - from.1).atan2(to.0 - from.0).to_degrees()
}

fn own_and_nearest_rival(
    update: &SessionUpdate,
    nonce: Nonce,
) -> Option<(&ActorSnapshot, &ActorSnapshot)> {
    let me = update.actors.iter().find(|a| a.nonce == nonce)?;
    let distance_sq = |a: &ActorSnapshot| (a.x - me.x).powi(2) + (a.y - me.y).powi(2);
    let target = update
        .actors
        .iter()
        .filter(|a| a.nonce != nonce)
        .min_by(|a, b| distance_sq(*a).total_cmp(&distance_sq(*b)))?;
    Some((me, target))
}
