// Attributes and lifecycle contract shared by every simulated object.

use crate::domain::actor::Actor;
use crate::domain::contrail::Contrail;
use crate::domain::projectile::Projectile;
use crate::domain::structure::{Floor, Wall};
use crate::domain::tuning::MapTuning;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-scoped unique identifier for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(pub u64);

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque marker naming the rendered view an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Screen(pub u8);

impl Screen {
    /// The in-match arena view. Every gameplay entity lives here.
    pub const ARENA: Screen = Screen(1);
}

/// Key an entity is stored under inside its owning collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Nonce(Nonce),
    Namespace(String),
}

impl From<Nonce> for EntityKey {
    fn from(nonce: Nonce) -> Self {
        Self::Nonce(nonce)
    }
}

/// Read-only inputs for one tick or visibility query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationContext {
    /// Server clock, advanced once per tick by the driver before ticking.
    pub server_time: u64,
    /// View currently presented by the rendering collaborator.
    pub active_screen: Screen,
}

impl SimulationContext {
    pub fn new(server_time: u64) -> Self {
        Self {
            server_time,
            active_screen: Screen::ARENA,
        }
    }
}

/// Position, extent and identity common to every entity.
///
/// `x`/`y` are the center of the bounding box; `width`/`height` are full extents.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub screen: Screen,
    // Render/input concern; the simulation never writes it.
    pub hovered: bool,
    pub nonce: Option<Nonce>,
    pub namespace: Option<String>,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32, screen: Screen) -> Self {
        Self {
            x,
            y,
            width,
            height,
            screen,
            hovered: false,
            nonce: None,
            namespace: None,
        }
    }

    /// Storage key: a namespace slot wins over the nonce when both are set.
    pub fn key(&self) -> Option<EntityKey> {
        match (&self.namespace, self.nonce) {
            (Some(namespace), _) => Some(EntityKey::Namespace(namespace.clone())),
            (None, Some(nonce)) => Some(EntityKey::Nonce(nonce)),
            (None, None) => None,
        }
    }
}

/// Capabilities every entity variant provides.
pub trait Entity {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn kind(&self) -> EntityKind;

    fn nonce(&self) -> Option<Nonce> {
        self.body().nonce
    }

    fn key(&self) -> Option<EntityKey> {
        self.body().key()
    }

    /// True when the entity belongs to the view the context is presenting.
    fn is_on_screen(&self, ctx: &SimulationContext) -> bool {
        self.body().screen == ctx.active_screen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Actor,
    Projectile,
    Wall,
    Floor,
    Contrail,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Actor => "actor",
            EntityKind::Projectile => "projectile",
            EntityKind::Wall => "wall",
            EntityKind::Floor => "floor",
            EntityKind::Contrail => "contrail",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of advancing an entity by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

/// Tagged union over every entity variant.
#[derive(Debug, Clone)]
pub enum SimObject {
    Actor(Actor),
    Projectile(Projectile),
    Wall(Wall),
    Floor(Floor),
    Contrail(Contrail),
}

impl SimObject {
    pub fn entity(&self) -> &dyn Entity {
        match self {
            SimObject::Actor(actor) => actor,
            SimObject::Projectile(projectile) => projectile,
            SimObject::Wall(wall) => wall,
            SimObject::Floor(floor) => floor,
            SimObject::Contrail(contrail) => contrail,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity().kind()
    }

    /// Whether the variant has any per-tick behaviour.
    pub fn is_tickable(&self) -> bool {
        matches!(self, SimObject::Projectile(_) | SimObject::Contrail(_))
    }

    /// Runs the variant's own per-tick step.
    ///
    /// Projectiles expire once they leave the map; contrails age out. Static
    /// geometry and actors are never changed here.
    pub fn tick(&mut self, ctx: &SimulationContext, map: &MapTuning) -> Lifecycle {
        match self {
            SimObject::Projectile(projectile) => {
                projectile.advance(ctx, map);
                if projectile.is_out_of_bounds(map) {
                    Lifecycle::Expired
                } else {
                    Lifecycle::Alive
                }
            }
            SimObject::Contrail(contrail) => contrail.tick(),
            SimObject::Actor(_) | SimObject::Wall(_) | SimObject::Floor(_) => Lifecycle::Alive,
        }
    }
}

impl From<Actor> for SimObject {
    fn from(actor: Actor) -> Self {
        Self::Actor(actor)
    }
}

impl From<Projectile> for SimObject {
    fn from(projectile: Projectile) -> Self {
        Self::Projectile(projectile)
    }
}

impl From<Wall> for SimObject {
    fn from(wall: Wall) -> Self {
        Self::Wall(wall)
    }
}

impl From<Floor> for SimObject {
    fn from(floor: Floor) -> Self {
        Self::Floor(floor)
    }
}

impl From<Contrail> for SimObject {
    fn from(contrail: Contrail) -> Self {
        Self::Contrail(contrail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::projectile::FireOrder;
    use crate::domain::tuning::ProjectileTuning;

    #[test]
    fn when_namespace_and_nonce_are_both_set_then_namespace_is_the_key() {
        let mut body = Body::new(0.0, 0.0, 1.0, 1.0, Screen::ARENA);
        assert_eq!(body.key(), None);

        body.nonce = Some(Nonce(7));
        assert_eq!(body.key(), Some(EntityKey::Nonce(Nonce(7))));

        body.namespace = Some("scoreboard".to_string());
        assert_eq!(
            body.key(),
            Some(EntityKey::Namespace("scoreboard".to_string()))
        );
    }

    #[test]
    fn when_active_screen_differs_then_entity_is_not_on_screen() {
        let wall = Wall::new(10.0, 10.0, 4.0, 4.0).with_nonce(Nonce(1));
        let mut ctx = SimulationContext::new(0);
        assert!(wall.is_on_screen(&ctx));

        ctx.active_screen = Screen(2);
        assert!(!wall.is_on_screen(&ctx));
    }

    #[test]
    fn when_ticking_static_variants_then_they_stay_alive_and_unchanged() {
        let map = MapTuning::default();
        let ctx = SimulationContext::new(90);
        let mut wall = SimObject::from(Wall::new(1.0, 2.0, 3.0, 4.0));
        let before = wall.entity().body().clone();

        assert!(!wall.is_tickable());
        assert_eq!(wall.tick(&ctx, &map), Lifecycle::Alive);
        assert_eq!(wall.entity().body(), &before);
    }

    #[test]
    fn when_ticking_a_projectile_past_the_edge_then_it_expires() {
        let map = MapTuning::default();
        let order = FireOrder {
            nonce: Nonce(3),
            player_nonce: Nonce(1),
            x: 4999.0,
            y: 10.0,
            rotation_degrees: 0.0,
            fire_time: 0,
        };
        let projectile = Projectile::with_trajectory(order, 0.0, 6.0, &ProjectileTuning::default());
        let mut object = SimObject::from(projectile);

        assert_eq!(object.kind(), EntityKind::Projectile);
        assert_eq!(
            object.tick(&SimulationContext::new(0), &map),
            Lifecycle::Alive
        );
        assert_eq!(
            object.tick(&SimulationContext::new(30), &map),
            Lifecycle::Expired
        );
    }
}
