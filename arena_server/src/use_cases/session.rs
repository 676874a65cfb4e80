// Session orchestration: owns one environment and drives its fixed-step loop.

use super::types::{SessionCommand, SessionState, SessionUpdate};
use crate::domain::tuning::ProjectileTuning;
use crate::domain::{
    Actor, Entity, Environment, FireOrder, Floor, Nonce, Projectile, SimulationContext, Wall,
};
use crate::utils::rng::next_nonce;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tracing::{debug, info, warn};

/// Shared configuration for spawning a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Capacity for inbound session commands.
    pub command_channel_capacity: usize,
    /// Capacity for broadcast session updates.
    pub update_broadcast_capacity: usize,
    /// Fixed tick interval for the session loop. One interval advances server time by one.
    pub tick_interval: Duration,
    /// Players that must have joined before the countdown starts.
    pub required_players: usize,
    /// Delay between reaching the player count and the first simulated tick.
    pub countdown: Duration,
    /// Match length; zero disables the limit.
    pub match_time_limit: Duration,
    /// Fixed seed for projectile jitter; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

/// Errors returned when talking to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session task has exited and no longer accepts commands.
    CommandsClosed,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::CommandsClosed => f.write_str("session command channel closed"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Channels for one running session.
#[derive(Clone)]
pub struct SessionHandle {
    /// Identifier of the environment the session owns.
    pub session_nonce: Nonce,
    /// Sender for commands into the session task.
    pub command_tx: mpsc::Sender<SessionCommand>,
    /// Broadcast sender for per-tick updates.
    pub update_tx: broadcast::Sender<SessionUpdate>,
    /// Watch sender for high-level session state changes.
    pub state_tx: watch::Sender<SessionState>,
    shutdown: Arc<Notify>,
}

impl SessionHandle {
    pub async fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| SessionError::CommandsClosed)
    }

    pub fn subscribe_updates(&self) -> broadcast::Receiver<SessionUpdate> {
        self.update_tx.subscribe()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Asks the session task to stop after its current tick.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

/// Creates a fresh environment and spawns the task that drives it.
pub fn spawn_session(settings: SessionSettings) -> SessionHandle {
    let session_nonce = next_nonce();

    let (command_tx, command_rx) =
        mpsc::channel::<SessionCommand>(settings.command_channel_capacity);
    let (update_tx, _update_rx) =
        broadcast::channel::<SessionUpdate>(settings.update_broadcast_capacity);
    let (state_tx, _state_rx) = watch::channel::<SessionState>(SessionState::Lobby);
    let shutdown = Arc::new(Notify::new());

    tokio::spawn(session_task(
        Environment::new(session_nonce),
        command_rx,
        update_tx.clone(),
        state_tx.clone(),
        settings,
        shutdown.clone(),
    ));

    SessionHandle {
        session_nonce,
        command_tx,
        update_tx,
        state_tx,
        shutdown,
    }
}

pub async fn session_task(
    mut environment: Environment,
    mut command_rx: mpsc::Receiver<SessionCommand>,
    update_tx: broadcast::Sender<SessionUpdate>,
    state_tx: watch::Sender<SessionState>,
    settings: SessionSettings,
    shutdown: Arc<Notify>,
) {
    let session = environment.nonce();
    let mut rng = match settings.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let projectile_tuning = ProjectileTuning::default();

    let mut server_time: u64 = 0;
    let mut state = SessionState::Lobby;
    let mut countdown_left = settings.countdown;
    let mut match_elapsed = Duration::ZERO;

    state_tx.send_replace(state);
    info!(session = %session, "session open");

    let mut interval = tokio::time::interval(settings.tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!(session = %session, "session shutdown requested");
                break;
            }
            _ = interval.tick() => {}
        }

        while let Ok(command) = command_rx.try_recv() {
            apply_command(
                &mut environment,
                command,
                state,
                server_time,
                &mut rng,
                &projectile_tuning,
            );
        }

        match state {
            SessionState::Lobby => {
                if environment.actors().len() >= settings.required_players.max(1) {
                    countdown_left = settings.countdown;
                    state = SessionState::MatchStarting {
                        in_seconds: whole_seconds(countdown_left),
                    };
                    state_tx.send_replace(state);
                    info!(session = %session, players = environment.actors().len(), "match starting");
                }
            }
            SessionState::MatchStarting { .. } => {
                countdown_left = countdown_left.saturating_sub(settings.tick_interval);
                if countdown_left.is_zero() {
                    state = SessionState::MatchRunning;
                    state_tx.send_replace(state);
                    info!(session = %session, "match running");
                }
            }
            SessionState::MatchRunning => {
                server_time += 1;
                let report = environment.tick(&SimulationContext::new(server_time));
                if report.hits > 0 || !report.eliminated.is_empty() {
                    debug!(
                        session = %session,
                        server_time,
                        hits = report.hits,
                        eliminated = report.eliminated.len(),
                        "tick resolved hits"
                    );
                }

                let _ = update_tx.send(snapshot(&environment, server_time));

                if !settings.match_time_limit.is_zero() {
                    match_elapsed += settings.tick_interval;
                    if match_elapsed >= settings.match_time_limit {
                        state = SessionState::MatchEnded;
                        state_tx.send_replace(state);
                        info!(session = %session, server_time, "match ended");
                        break;
                    }
                }
            }
            SessionState::MatchEnded => break,
        }
    }
}

fn apply_command(
    environment: &mut Environment,
    command: SessionCommand,
    state: SessionState,
    server_time: u64,
    rng: &mut StdRng,
    tuning: &ProjectileTuning,
) {
    match command {
        SessionCommand::Join { nonce, x, y, color } => {
            if environment.actor(nonce).is_some() {
                warn!(player = %nonce, "duplicate join ignored");
                return;
            }
            match environment.add_player(Actor::new(x, y, color).with_nonce(nonce)) {
                Ok(()) => info!(player = %nonce, x, y, "player joined"),
                Err(e) => warn!(player = %nonce, error = %e, "join rejected"),
            }
        }
        SessionCommand::Leave { nonce } => {
            if environment.remove_player(nonce).is_some() {
                info!(player = %nonce, "player left");
            }
        }
        SessionCommand::Aim {
            nonce,
            rotation_degrees,
        } => {
            if let Some(actor) = environment.actor_mut(nonce) {
                actor.rotation_degrees = rotation_degrees;
            }
        }
        SessionCommand::Fire { nonce } => {
            if state != SessionState::MatchRunning {
                debug!(player = %nonce, ?state, "fire ignored outside a running match");
                return;
            }
            let Some(shooter) = environment.actor(nonce) else {
                debug!(player = %nonce, "fire from unknown player ignored");
                return;
            };

            let order = FireOrder {
                nonce: next_nonce(),
                player_nonce: nonce,
                x: shooter.body().x,
                y: shooter.body().y,
                rotation_degrees: shooter.rotation_degrees,
                fire_time: server_time,
            };
            if let Err(e) = environment.add_projectile(Projectile::fire(order, rng, tuning)) {
                warn!(player = %nonce, error = %e, "projectile rejected");
            }
        }
        SessionCommand::PlaceWall {
            nonce,
            x,
            y,
            width,
            height,
        } => {
            if let Err(e) = environment.add_wall(Wall::new(x, y, width, height).with_nonce(nonce)) {
                warn!(wall = %nonce, error = %e, "wall rejected");
            }
        }
        SessionCommand::PlaceFloor {
            nonce,
            x,
            y,
            width,
            height,
        } => {
            if let Err(e) =
                environment.add_floor(Floor::new(x, y, width, height).with_nonce(nonce))
            {
                warn!(floor = %nonce, error = %e, "floor rejected");
            }
        }
    }
}

fn snapshot(environment: &Environment, server_time: u64) -> SessionUpdate {
    SessionUpdate {
        server_time,
        actors: environment.actor_snapshots(),
        projectiles: environment.projectile_snapshots(),
        walls: environment.wall_snapshots(),
        floors: environment.floor_snapshots(),
        destroyed_projectiles: environment.destroyed_projectiles().to_vec(),
    }
}

fn whole_seconds(duration: Duration) -> u32 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(nonce: u64, x: f32, y: f32) -> SessionCommand {
        SessionCommand::Join {
            nonce: Nonce(nonce),
            x,
            y,
            color: "green".to_string(),
        }
    }

    fn apply(environment: &mut Environment, command: SessionCommand, state: SessionState) {
        let mut rng = StdRng::seed_from_u64(5);
        apply_command(
            environment,
            command,
            state,
            12,
            &mut rng,
            &ProjectileTuning::default(),
        );
    }

    #[test]
    fn when_player_joins_twice_then_the_first_actor_is_kept() {
        let mut env = Environment::new(Nonce(1));
        apply(&mut env, join(7, 10.0, 10.0), SessionState::Lobby);
        apply(&mut env, join(7, 99.0, 99.0), SessionState::Lobby);

        assert_eq!(env.actors().len(), 1);
        assert_eq!(env.actor(Nonce(7)).map(|a| a.body().x), Some(10.0));
    }

    #[test]
    fn when_firing_outside_a_running_match_then_no_projectile_spawns() {
        let mut env = Environment::new(Nonce(1));
        apply(&mut env, join(7, 10.0, 10.0), SessionState::Lobby);
        apply(
            &mut env,
            SessionCommand::Fire { nonce: Nonce(7) },
            SessionState::MatchStarting { in_seconds: 3 },
        );

        assert!(env.projectiles().is_empty());
    }

    #[test]
    fn when_firing_in_a_running_match_then_projectile_starts_at_the_shooter() {
        let mut env = Environment::new(Nonce(1));
        apply(&mut env, join(7, 300.0, 400.0), SessionState::MatchRunning);
        apply(
            &mut env,
            SessionCommand::Aim {
                nonce: Nonce(7),
                rotation_degrees: 45.0,
            },
            SessionState::MatchRunning,
        );
        apply(
            &mut env,
            SessionCommand::Fire { nonce: Nonce(7) },
            SessionState::MatchRunning,
        );

        let projectile = env.projectiles().values().next().expect("one projectile");
        assert_eq!(projectile.player_nonce(), Nonce(7));
        assert_eq!(projectile.fire_time(), 12);
        assert_eq!(projectile.rotation_degrees(), 45.0);
        assert_eq!(projectile.starting_position(), (300.0, 400.0));
    }

    #[test]
    fn when_unknown_player_fires_or_leaves_then_nothing_happens() {
        let mut env = Environment::new(Nonce(1));
        apply(
            &mut env,
            SessionCommand::Fire { nonce: Nonce(3) },
            SessionState::MatchRunning,
        );
        apply(
            &mut env,
            SessionCommand::Leave { nonce: Nonce(3) },
            SessionState::MatchRunning,
        );

        assert!(env.projectiles().is_empty());
        assert!(env.actors().is_empty());
    }

    #[test]
    fn when_geometry_is_placed_then_it_lands_in_walls_and_floors() {
        let mut env = Environment::new(Nonce(1));
        apply(
            &mut env,
            SessionCommand::PlaceWall {
                nonce: Nonce(40),
                x: 5.0,
                y: 5.0,
                width: 100.0,
                height: 4.0,
            },
            SessionState::Lobby,
        );
        apply(
            &mut env,
            SessionCommand::PlaceFloor {
                nonce: Nonce(41),
                x: 0.0,
                y: 0.0,
                width: 5000.0,
                height: 5000.0,
            },
            SessionState::Lobby,
        );

        let update = snapshot(&env, 0);
        assert_eq!(update.walls.len(), 1);
        assert_eq!(update.floors.len(), 1);
        assert_eq!(update.floors[0].nonce, Nonce(41));
    }

    #[test]
    fn when_countdown_has_a_fraction_then_seconds_round_up() {
        assert_eq!(whole_seconds(Duration::ZERO), 0);
        assert_eq!(whole_seconds(Duration::from_millis(2500)), 3);
        assert_eq!(whole_seconds(Duration::from_secs(3)), 3);
    }
}
