use bevy_ecs::prelude::Resource;

/// Scene clock. `delta` is the scaled step handed to objects this frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Apply `time_scale` to the raw frame delta and advance the clock.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame += 1;
    }
}
