// Domain layer: core simulation types and rules.

pub mod actor;
pub mod collection;
pub mod contrail;
pub mod entity;
pub mod environment;
pub mod errors;
pub mod geometry;
pub mod projectile;
pub mod state;
pub mod structure;
pub mod tuning;

pub use actor::Actor;
pub use collection::EntityMap;
pub use contrail::{Contrail, ContrailLayer};
pub use entity::{
    Body, Entity, EntityKey, EntityKind, Lifecycle, Nonce, Screen, SimObject, SimulationContext,
};
pub use environment::{DestroyedProjectile, Environment, TickReport};
pub use errors::SpawnError;
pub use projectile::{FireOrder, Projectile};
pub use state::{ActorSnapshot, ProjectileSnapshot, StructureSnapshot};
pub use structure::{Floor, Wall};
