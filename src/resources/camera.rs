//! Scene camera resource.
//!
//! The camera is a world-space rectangle of `resolution` pixels whose top-left
//! corner sits at `pos`. Objects subtract `pos` from their world position to
//! get their render position. A follow target, when set, is looked up by the
//! camera system after PostUpdate so the camera is final before PrevRender.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

use crate::components::identity::ObjectId;
use crate::components::transform::mul_elem;

#[derive(Resource, Debug, Clone)]
pub struct SceneCamera {
    /// World position of the top-left corner of the view.
    pub pos: Vector2,
    /// Size of the view in pixels.
    pub resolution: Vector2,
    /// Size of the world. Zero on an axis disables clamping on that axis.
    pub world_resolution: Vector2,
    pub target: Option<ObjectId>,
    /// Where in the view the target is kept (0.5,0.5 = centered).
    pub target_pivot: Vector2,
    pub target_offset: Vector2,
}

impl SceneCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vector2::zero(),
            resolution: Vector2::new(width, height),
            world_resolution: Vector2::zero(),
            target: None,
            target_pivot: Vector2::new(0.5, 0.5),
            target_offset: Vector2::zero(),
        }
    }

    pub fn with_world(mut self, width: f32, height: f32) -> Self {
        self.world_resolution = Vector2::new(width, height);
        self
    }

    pub fn set_target(&mut self, target: Option<ObjectId>) {
        self.target = target;
    }

    /// Place the view so `target_pos` lands on `target_pivot`, then clamp.
    pub fn follow(&mut self, target_pos: Vector2) {
        self.pos = target_pos - mul_elem(self.target_pivot, self.resolution) + self.target_offset;
        self.clamp_to_world();
    }

    /// Keep the view inside `[0, world_resolution]` on every axis where the
    /// world is larger than zero.
    pub fn clamp_to_world(&mut self) {
        if self.world_resolution.x > 0.0 {
            let max_x = (self.world_resolution.x - self.resolution.x).max(0.0);
            self.pos.x = self.pos.x.clamp(0.0, max_x);
        }
        if self.world_resolution.y > 0.0 {
            let max_y = (self.world_resolution.y - self.resolution.y).max(0.0);
            self.pos.y = self.pos.y.clamp(0.0, max_y);
        }
    }

    /// True when the world rectangle `(pos, size)` touches the view.
    pub fn sees(&self, pos: Vector2, size: Vector2) -> bool {
        pos.x + size.x > self.pos.x
            && pos.x < self.pos.x + self.resolution.x
            && pos.y + size.y > self.pos.y
            && pos.y < self.pos.y + self.resolution.y
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new(640.0, 360.0)
    }
}
