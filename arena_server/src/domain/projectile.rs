// Projectile state and closed-form kinematics.

use crate::domain::entity::{Body, Entity, EntityKind, Nonce, Screen, SimulationContext};
use crate::domain::geometry::random_in_range;
use crate::domain::tuning::{MapTuning, ProjectileTuning};
use rand::Rng;

/// Everything the shooter decides when a projectile is fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub nonce: Nonce,
    /// Owner; never hit by its own projectile.
    pub player_nonce: Nonce,
    pub x: f32,
    pub y: f32,
    pub rotation_degrees: f32,
    /// Server time at spawn.
    pub fire_time: u64,
}

/// A projectile in flight.
///
/// Position is derived from `fire_time` and the current server time on every
/// tick, so there is no accumulated velocity state.
#[derive(Debug, Clone)]
pub struct Projectile {
    body: Body,
    nonce: Nonce,
    player_nonce: Nonce,
    fire_time: u64,
    rotation_degrees: f32,
    wobble_rotation: f32,
    speed: f32,
    starting_x: f32,
    starting_y: f32,
}

impl Projectile {
    /// Spawns a projectile, sampling its wobble and speed once from `rng`.
    pub fn fire<R: Rng + ?Sized>(order: FireOrder, rng: &mut R, tuning: &ProjectileTuning) -> Self {
        let wobble = random_in_range(rng, -tuning.wobble_degrees, tuning.wobble_degrees);
        let speed = random_in_range(rng, tuning.min_speed, tuning.max_speed);
        Self::with_trajectory(order, order.rotation_degrees + wobble, speed, tuning)
    }

    /// Spawns a projectile with an explicit travel direction and speed.
    pub fn with_trajectory(
        order: FireOrder,
        wobble_rotation: f32,
        speed: f32,
        tuning: &ProjectileTuning,
    ) -> Self {
        let mut body = Body::new(order.x, order.y, tuning.width, tuning.height, Screen::ARENA);
        body.nonce = Some(order.nonce);
        Self {
            body,
            nonce: order.nonce,
            player_nonce: order.player_nonce,
            fire_time: order.fire_time,
            rotation_degrees: order.rotation_degrees,
            wobble_rotation,
            speed,
            starting_x: order.x,
            starting_y: order.y,
        }
    }

    pub fn player_nonce(&self) -> Nonce {
        self.player_nonce
    }

    pub fn fire_time(&self) -> u64 {
        self.fire_time
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub fn wobble_rotation(&self) -> f32 {
        self.wobble_rotation
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn starting_position(&self) -> (f32, f32) {
        (self.starting_x, self.starting_y)
    }

    /// Travel time since spawn, in tick-rate units. Negative before `fire_time`.
    pub fn elapsed(&self, server_time: u64, tick_rate: f32) -> f32 {
        ((server_time as f64 - self.fire_time as f64) / f64::from(tick_rate)) as f32
    }

    pub fn position_at(&self, server_time: u64, tick_rate: f32) -> (f32, f32) {
        let elapsed = self.elapsed(server_time, tick_rate);
        let heading = self.wobble_rotation.to_radians();
        (
            self.starting_x + self.speed * heading.cos() * elapsed,
            self.starting_y + self.speed * heading.sin() * elapsed,
        )
    }

    /// Moves the projectile to where it is at the context's server time.
    pub fn advance(&mut self, ctx: &SimulationContext, map: &MapTuning) {
        let (x, y) = self.position_at(ctx.server_time, map.tick_rate);
        self.body.x = x;
        self.body.y = y;
    }

    pub fn is_out_of_bounds(&self, map: &MapTuning) -> bool {
        map.is_outside(self.body.x, self.body.y)
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn nonce(&self) -> Option<Nonce> {
        Some(self.nonce)
    }
}
