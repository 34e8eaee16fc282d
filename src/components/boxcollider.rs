use raylib::prelude::Vector2;

use crate::components::collider::{Collider, ColliderCore};
use crate::components::transform::ObjectTransform;
use crate::resources::rendertarget::Surface;

/// Axis-aligned rectangle placed relative to its owner's position.
#[derive(Debug, Clone)]
pub struct BoxCollider {
    core: ColliderCore,
    pub size: Vector2,
    pub offset: Vector2,
    /// Draw the outline during render.
    pub visible: bool,
    min: Vector2,
    max: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size, centered on the owner's position.
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            core: ColliderCore::new(name),
            size: Vector2::new(width, height),
            offset: Vector2::new(-width * 0.5, -height * 0.5),
            visible: true,
            min: Vector2::zero(),
            max: Vector2::zero(),
        }
    }

    /// Place the box's top-left corner at `offset` from the owner.
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns (min, max) of the collider AABB for a given owner position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector2) -> (Vector2, Vector2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        let min = Vector2::new(p0.x.min(p1.x), p0.y.min(p1.y));
        let max = Vector2::new(p0.x.max(p1.x), p0.y.max(p1.y));
        (min, max)
    }

    /// Point containment against the last computed bounds.
    pub fn contains_point(&self, point: Vector2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Collider for BoxCollider {
    fn core(&self) -> &ColliderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ColliderCore {
        &mut self.core
    }

    fn clone_box(&self) -> Box<dyn Collider> {
        Box::new(self.clone())
    }

    fn bounds(&self) -> (Vector2, Vector2) {
        (self.min, self.max)
    }

    fn update(&mut self, owner: &ObjectTransform, _delta: f32) {
        let (min, max) = self.aabb(owner.pos);
        self.min = min;
        self.max = max;
    }

    fn render(&self, surface: &mut dyn Surface, owner: &ObjectTransform) {
        if !self.visible {
            return;
        }
        let camera = owner.camera_pos();
        surface.draw_rectangle_lines(
            self.min - camera,
            self.max - self.min,
            raylib::prelude::Color::RED,
        );
    }
}
