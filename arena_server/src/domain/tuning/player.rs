/// Gameplay tuning for player-controlled actors.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Hit box width in map units.
    pub width: f32,

    /// Hit box height in map units.
    pub height: f32,

    /// Health a freshly spawned actor starts with.
    pub max_health: i32,

    /// Movement speed carried for clients; the simulation does not move actors.
    pub velocity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            max_health: 100,
            velocity: 0.1,
        }
    }
}
