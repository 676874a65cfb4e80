// Read-only snapshots of environment entities for broadcast.

use crate::domain::actor::Actor;
use crate::domain::entity::{Entity, Nonce};
use crate::domain::projectile::Projectile;

#[derive(Debug, Clone, PartialEq)]
pub struct ActorSnapshot {
    pub nonce: Nonce,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    pub health: i32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSnapshot {
    pub nonce: Nonce,
    pub player_nonce: Nonce,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
}

/// Walls and floors share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSnapshot {
    pub nonce: Nonce,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ActorSnapshot {
    pub fn new(nonce: Nonce, actor: &Actor) -> Self {
        Self {
            nonce,
            x: actor.body().x,
            y: actor.body().y,
            rotation_degrees: actor.rotation_degrees,
            health: actor.health(),
            color: actor.color.clone(),
        }
    }
}

impl ProjectileSnapshot {
    pub fn new(nonce: Nonce, p: &Projectile) -> Self {
        Self {
            nonce,
            player_nonce: p.player_nonce(),
            x: p.body().x,
            y: p.body().y,
            rotation_degrees: p.rotation_degrees(),
        }
    }
}

impl StructureSnapshot {
    pub fn new<E: Entity + ?Sized>(nonce: Nonce, entity: &E) -> Self {
        let body = entity.body();
        Self {
            nonce,
            x: body.x,
            y: body.y,
            width: body.width,
            height: body.height,
        }
    }
}
