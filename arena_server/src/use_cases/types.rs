// Use-case level inputs/outputs for the session loop.

use crate::domain::{
    ActorSnapshot, DestroyedProjectile, Nonce, ProjectileSnapshot, StructureSnapshot,
};

#[derive(Debug, Clone)]
pub enum SessionCommand {
    Join {
        nonce: Nonce,
        x: f32,
        y: f32,
        color: String,
    },
    Leave {
        nonce: Nonce,
    },
    Aim {
        nonce: Nonce,
        rotation_degrees: f32,
    },
    // Fires from the shooter's current position along its current aim.
    Fire {
        nonce: Nonce,
    },
    PlaceWall {
        nonce: Nonce,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    PlaceFloor {
        nonce: Nonce,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Lobby,
    MatchStarting { in_seconds: u32 },
    MatchRunning,
    MatchEnded,
}

/// Everything external readers need after one tick.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub server_time: u64,
    pub actors: Vec<ActorSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub walls: Vec<StructureSnapshot>,
    pub floors: Vec<StructureSnapshot>,
    pub destroyed_projectiles: Vec<DestroyedProjectile>,
}
