//! Collider capability owned by game objects.
//!
//! A game object keeps an ordered `Vec<Box<dyn Collider>>`. Every frame the
//! object prunes colliders that report inactive, updates the enabled ones
//! against its own transform, and registers all of them with the scene's
//! [`SceneCollision`](crate::resources::scenecollision::SceneCollision) sink.
//! Resolution happens outside the object; its result comes back as additions
//! and removals on each collider's collision list.
//!
//! Implementors embed a [`ColliderCore`] and expose it through
//! [`Collider::core`]/[`Collider::core_mut`]; the bookkeeping methods are
//! provided on top of it.

use raylib::prelude::{Color, Vector2};
use smallvec::SmallVec;

use crate::components::identity::{Identity, ObjectId, SceneId};
use crate::components::transform::ObjectTransform;
use crate::resources::rendertarget::Surface;

/// Names one collider across the scene: its owner, the slot the owner gave
/// it and its name. Names may repeat within an object; slots do not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderKey {
    pub owner: ObjectId,
    pub slot: u32,
    pub name: String,
}

impl ColliderKey {
    pub fn new(owner: ObjectId, name: impl Into<String>) -> Self {
        Self {
            owner,
            slot: 0,
            name: name.into(),
        }
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }
}

/// Colliders this one currently overlaps.
pub type CollisionList = SmallVec<[ColliderKey; 4]>;

/// State every collider carries.
#[derive(Debug, Clone, Default)]
pub struct ColliderCore {
    identity: Identity,
    owner: Option<ObjectId>,
    slot: u32,
    scene: Option<SceneId>,
    collisions: CollisionList,
}

impl ColliderCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            ..Default::default()
        }
    }
}

pub trait Collider: Send + Sync {
    fn core(&self) -> &ColliderCore;
    fn core_mut(&mut self) -> &mut ColliderCore;

    /// Deep copy. The copy keeps the source's owner until re-parented.
    fn clone_box(&self) -> Box<dyn Collider>;

    /// World-space `(min, max)` of the shape as of the last update.
    fn bounds(&self) -> (Vector2, Vector2);

    /// Recompute world placement from the owner.
    fn update(&mut self, owner: &ObjectTransform, delta: f32);

    /// Second placement pass after collision resolution.
    fn post_update(&mut self, owner: &ObjectTransform, delta: f32) {
        self.update(owner, delta);
    }

    /// Draw the shape outline in screen space.
    fn render(&self, surface: &mut dyn Surface, owner: &ObjectTransform) {
        let (min, max) = self.bounds();
        let camera = owner.camera_pos();
        surface.draw_rectangle_lines(min - camera, max - min, Color::RED);
    }

    fn name(&self) -> &str {
        self.core().identity.name()
    }

    fn owner(&self) -> Option<ObjectId> {
        self.core().owner
    }

    fn set_owner(&mut self, owner: ObjectId) {
        self.core_mut().owner = Some(owner);
    }

    /// Position handed out by the owner when the collider was added.
    fn slot(&self) -> u32 {
        self.core().slot
    }

    fn set_slot(&mut self, slot: u32) {
        self.core_mut().slot = slot;
    }

    fn scene(&self) -> Option<SceneId> {
        self.core().scene
    }

    fn set_scene(&mut self, scene: Option<SceneId>) {
        self.core_mut().scene = scene;
    }

    fn is_active(&self) -> bool {
        self.core().identity.is_active()
    }

    /// The owning object drops this collider on its next pass.
    fn destroy(&mut self) {
        self.core_mut().identity.destroy();
    }

    fn enable(&self) -> bool {
        self.core().identity.enable()
    }

    fn set_enable(&mut self, enable: bool) {
        self.core_mut().identity.set_enable(enable);
    }

    /// `None` until the collider has an owner.
    fn key(&self) -> Option<ColliderKey> {
        self.owner()
            .map(|owner| ColliderKey::new(owner, self.name()).with_slot(self.slot()))
    }

    fn collision_list(&self) -> &[ColliderKey] {
        &self.core().collisions
    }

    fn is_colliding_with(&self, other: &ColliderKey) -> bool {
        self.core().collisions.contains(other)
    }

    fn add_collision(&mut self, other: ColliderKey) {
        if !self.is_colliding_with(&other) {
            self.core_mut().collisions.push(other);
        }
    }

    fn remove_collision(&mut self, other: &ColliderKey) -> bool {
        let list = &mut self.core_mut().collisions;
        match list.iter().position(|k| k == other) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    fn clear_collision_list(&mut self) {
        self.core_mut().collisions.clear();
    }
}

/// Strict AABB overlap; touching edges do not count.
pub fn bounds_overlap(a: (Vector2, Vector2), b: (Vector2, Vector2)) -> bool {
    let (min_a, max_a) = a;
    let (min_b, max_b) = b;
    min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
}
