// Player-controlled actors.

use crate::domain::entity::{Body, Entity, EntityKind, Nonce, Screen};
use crate::domain::tuning::PlayerTuning;

#[derive(Debug, Clone)]
pub struct Actor {
    body: Body,
    health: i32,
    pub rotation_degrees: f32,
    pub color: String,
    pub velocity: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32, color: impl Into<String>) -> Self {
        Self::with_tuning(x, y, color, &PlayerTuning::default())
    }

    pub fn with_tuning(x: f32, y: f32, color: impl Into<String>, tuning: &PlayerTuning) -> Self {
        Self {
            body: Body::new(x, y, tuning.width, tuning.height, Screen::ARENA),
            health: tuning.max_health,
            rotation_degrees: 0.0,
            color: color.into(),
            velocity: tuning.velocity,
        }
    }

    pub fn with_nonce(mut self, nonce: Nonce) -> Self {
        self.body.nonce = Some(nonce);
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Removes `amount` health, never dropping below zero.
    /// Returns true when the hit leaves the actor dead.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.is_dead()
    }
}

impl Entity for Actor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Actor
    }
}
