//! Spatial state of a game object.
//!
//! All positions are in world pixels with Y growing downward. `pos` is the
//! pivot point; the sprite's top-left corner is derived from `pivot`, the
//! current sprite size and `offset`.

use raylib::prelude::Vector2;

/// Component-wise product, used for pivot * size.
pub fn mul_elem(a: Vector2, b: Vector2) -> Vector2 {
    Vector2::new(a.x * b.x, a.y * b.y)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// World position of the pivot.
    pub pos: Vector2,
    /// Position snapshotted at the end of the previous render.
    /// `y == -1` until the first render happened.
    pub prev_pos: Vector2,
    /// `pos` relative to the camera, refreshed every PrevRender.
    pub render_pos: Vector2,
    /// Static sprite size; replaced by the animation frame size while animated.
    pub size: Vector2,
    /// Normalized pivot inside the sprite (0,0 = top-left, 1,1 = bottom-right).
    pub pivot: Vector2,
    /// Displacement accumulated this frame. Cleared after every render.
    pub velocity: Vector2,
    /// Extra draw offset in pixels.
    pub offset: Vector2,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            pos: Vector2::zero(),
            prev_pos: Vector2::new(0.0, -1.0),
            render_pos: Vector2::zero(),
            size: Vector2::zero(),
            pivot: Vector2::zero(),
            velocity: Vector2::zero(),
            offset: Vector2::zero(),
        }
    }
}

impl ObjectTransform {
    /// Screen-space top-left corner for a sprite of `size`.
    pub fn top_left(&self, size: Vector2) -> Vector2 {
        self.render_pos - mul_elem(self.pivot, size) + self.offset
    }

    /// World-space top-left corner for a sprite of `size`.
    pub fn world_top_left(&self, size: Vector2) -> Vector2 {
        self.pos - mul_elem(self.pivot, size) + self.offset
    }

    /// Difference between world and screen space for this frame.
    pub fn camera_pos(&self) -> Vector2 {
        self.pos - self.render_pos
    }

    /// True until the first render snapshot.
    pub fn is_first_frame(&self) -> bool {
        self.prev_pos.y == -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marks_no_previous_frame() {
        let t = ObjectTransform::default();
        assert_eq!(t.prev_pos.y, -1.0);
        assert!(t.is_first_frame());
    }

    #[test]
    fn test_top_left_applies_pivot_and_offset() {
        let t = ObjectTransform {
            render_pos: Vector2::new(100.0, 50.0),
            pivot: Vector2::new(0.5, 1.0),
            offset: Vector2::new(2.0, -3.0),
            ..Default::default()
        };
        let lt = t.top_left(Vector2::new(40.0, 20.0));
        assert_eq!(lt.x, 100.0 - 20.0 + 2.0);
        assert_eq!(lt.y, 50.0 - 20.0 - 3.0);
    }

    #[test]
    fn test_world_top_left_ignores_camera() {
        let t = ObjectTransform {
            pos: Vector2::new(300.0, 80.0),
            render_pos: Vector2::new(100.0, 50.0),
            pivot: Vector2::new(0.5, 1.0),
            offset: Vector2::new(2.0, -3.0),
            ..Default::default()
        };
        let size = Vector2::new(40.0, 20.0);
        assert_eq!(t.world_top_left(size), Vector2::new(282.0, 57.0));
        assert_eq!(t.world_top_left(size) - t.top_left(size), t.camera_pos());
    }
}
