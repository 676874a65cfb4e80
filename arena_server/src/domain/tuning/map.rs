/// Arena dimensions and the simulation clock rate.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapTuning {
    /// Width of the playable rectangle in map units.
    pub width: f32,

    /// Height of the playable rectangle in map units.
    pub height: f32,

    /// Server-time ticks per unit of projectile travel time.
    pub tick_rate: f32,
}

impl MapTuning {
    /// Returns true when the point lies outside `[0, width] x [0, height]`.
    pub fn is_outside(&self, x: f32, y: f32) -> bool {
        x > self.width || x < 0.0 || y > self.height || y < 0.0
    }
}

impl Default for MapTuning {
    fn default() -> Self {
        Self {
            width: 5000.0,
            height: 5000.0,
            tick_rate: 30.0,
        }
    }
}
