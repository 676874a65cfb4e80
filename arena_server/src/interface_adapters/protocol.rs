// Outbound DTOs for whichever transport the host attaches.
// Nonces are sent as strings so clients never lose precision on 64-bit ids.

use crate::domain::{ActorSnapshot, DestroyedProjectile, ProjectileSnapshot, StructureSnapshot};
use crate::use_cases::{SessionState, SessionUpdate};
use serde::Serialize;

/// Messages the session publishes to subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Snapshot of the environment after a tick.
    SessionUpdate(SessionUpdateDto),
    // High-level session transitions (lobby, countdown, running, ended).
    SessionState(SessionStateDto),
}

/// Snapshot of the environment sent once per tick.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdateDto {
    pub server_time: u64,
    pub actors: Vec<ActorDto>,
    pub projectiles: Vec<ProjectileDto>,
    pub walls: Vec<StructureDto>,
    pub floors: Vec<StructureDto>,
    pub destroyed_projectiles: Vec<DestroyedProjectileDto>,
}

impl From<SessionUpdate> for SessionUpdateDto {
    fn from(update: SessionUpdate) -> Self {
        Self {
            server_time: update.server_time,
            actors: update.actors.iter().map(ActorDto::from).collect(),
            projectiles: update.projectiles.iter().map(ProjectileDto::from).collect(),
            walls: update.walls.iter().map(StructureDto::from).collect(),
            floors: update.floors.iter().map(StructureDto::from).collect(),
            destroyed_projectiles: update
                .destroyed_projectiles
                .iter()
                .map(DestroyedProjectileDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorDto {
    pub nonce: String,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    pub health: i32,
    pub color: String,
}

impl From<&ActorSnapshot> for ActorDto {
    fn from(actor: &ActorSnapshot) -> Self {
        Self {
            nonce: actor.nonce.to_string(),
            x: actor.x,
            y: actor.y,
            rotation_degrees: actor.rotation_degrees,
            health: actor.health,
            color: actor.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileDto {
    pub nonce: String,
    pub player_nonce: String,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
}

impl From<&ProjectileSnapshot> for ProjectileDto {
    fn from(projectile: &ProjectileSnapshot) -> Self {
        Self {
            nonce: projectile.nonce.to_string(),
            player_nonce: projectile.player_nonce.to_string(),
            x: projectile.x,
            y: projectile.y,
            rotation_degrees: projectile.rotation_degrees,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StructureDto {
    pub nonce: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&StructureSnapshot> for StructureDto {
    fn from(structure: &StructureSnapshot) -> Self {
        Self {
            nonce: structure.nonce.to_string(),
            x: structure.x,
            y: structure.y,
            width: structure.width,
            height: structure.height,
        }
    }
}

/// "Projectile `nonce` hit player `player_nonce`".
#[derive(Debug, Clone, Serialize)]
pub struct DestroyedProjectileDto {
    pub player_nonce: String,
    pub nonce: String,
}

impl From<&DestroyedProjectile> for DestroyedProjectileDto {
    fn from(event: &DestroyedProjectile) -> Self {
        Self {
            player_nonce: event.player_nonce.to_string(),
            nonce: event.nonce.to_string(),
        }
    }
}

/// Session lifecycle state for client UI flow.
#[derive(Debug, Clone, Serialize)]
pub enum SessionStateDto {
    Lobby,
    MatchStarting { in_seconds: u32 },
    MatchRunning,
    MatchEnded,
}

impl From<SessionState> for SessionStateDto {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Lobby => SessionStateDto::Lobby,
            SessionState::MatchStarting { in_seconds } => {
                SessionStateDto::MatchStarting { in_seconds }
            }
            SessionState::MatchRunning => SessionStateDto::MatchRunning,
            SessionState::MatchEnded => SessionStateDto::MatchEnded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Nonce;
    use serde_json::{Value, json};

    #[test]
    fn when_update_is_serialized_then_nonces_are_strings_and_message_is_tagged() {
        let update = SessionUpdate {
            server_time: 42,
            actors: vec![ActorSnapshot {
                nonce: Nonce(u64::MAX),
                x: 1.0,
                y: 2.0,
                rotation_degrees: 90.0,
                health: 99,
                color: "red".to_string(),
            }],
            projectiles: Vec::new(),
            walls: Vec::new(),
            floors: Vec::new(),
            destroyed_projectiles: vec![DestroyedProjectile {
                player_nonce: Nonce(u64::MAX),
                nonce: Nonce(5),
            }],
        };

        let msg = ServerMessage::SessionUpdate(SessionUpdateDto::from(update));
        let value: Value = serde_json::to_value(&msg).expect("serializes");

        assert_eq!(value["type"], "SessionUpdate");
        assert_eq!(value["data"]["server_time"], 42);
        assert_eq!(value["data"]["actors"][0]["nonce"], "18446744073709551615");
        assert_eq!(value["data"]["actors"][0]["health"], 99);
        assert_eq!(
            value["data"]["destroyed_projectiles"][0],
            json!({"player_nonce": "18446744073709551615", "nonce": "5"})
        );
    }

    #[test]
    fn when_state_is_serialized_then_countdown_carries_its_seconds() {
        let msg = ServerMessage::SessionState(SessionStateDto::from(SessionState::MatchStarting {
            in_seconds: 3,
        }));

        let value = serde_json::to_value(&msg).expect("serializes");

        assert_eq!(
            value,
            json!({"type": "SessionState", "data": {"MatchStarting": {"in_seconds": 3}}})
        );
    }
}
