// Gameplay tuning, kept apart from runtime/server configuration.

pub mod map;
pub mod player;
pub mod projectile;

pub use map::MapTuning;
pub use player::PlayerTuning;
pub use projectile::ProjectileTuning;
