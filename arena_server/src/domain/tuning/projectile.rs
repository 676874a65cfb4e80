/// Gameplay tuning for projectiles.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Hit box width in map units.
    pub width: f32,

    /// Hit box height in map units.
    pub height: f32,

    /// Lower bound of the speed sampled at spawn.
    pub min_speed: f32,

    /// Upper bound of the speed sampled at spawn.
    pub max_speed: f32,

    /// Maximum aim perturbation in degrees, applied in both directions.
    pub wobble_degrees: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 5.0,
            min_speed: 5.0,
            max_speed: 8.0,
            wobble_degrees: 8.0,
        }
    }
}
