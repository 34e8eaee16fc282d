//! Concrete object kinds.
//!
//! Every kind wraps a [`GameObject`] and implements [`SceneObject`], which is
//! what the scene stores and drives. The frame methods forward to the base by
//! default; kinds override the ones they extend and call the base themselves.
//!
//! The base [`GameObject`] deliberately does not implement [`SceneObject`]:
//! only a concrete kind can be cloned into the scene.
//!
//! Submodules overview:
//! - [`prop`] – plain object with no behavior of its own
//! - [`character`] – jumping/falling object that lands on a floor line
//! - [`effect`] – one-shot animation that removes itself when it ends

pub mod character;
pub mod effect;
pub mod prop;

use bevy_ecs::prelude::Component;

use crate::components::collider::ColliderKey;
use crate::components::gameobject::{GameObject, ObjectType};
use crate::resources::camera::SceneCamera;
use crate::resources::rendertarget::Surface;
use crate::resources::scenecollision::SceneCollision;
use crate::resources::sceneresource::SceneResource;

pub trait SceneObject: Send + Sync {
    fn base(&self) -> &GameObject;
    fn base_mut(&mut self) -> &mut GameObject;

    /// Polymorphic copy. The copy's base goes through
    /// [`GameObject::clone`], so it gets a new id and re-parented parts.
    fn clone_object(&self) -> Box<dyn SceneObject>;

    fn object_type(&self) -> ObjectType {
        self.base().object_type()
    }

    fn init(&mut self) -> bool {
        self.base_mut().init()
    }

    fn update(&mut self, delta: f32) {
        self.base_mut().update(delta);
    }

    fn collision(&mut self, sink: &mut SceneCollision, delta: f32) {
        self.base_mut().collision(sink, delta);
    }

    fn post_update(&mut self, delta: f32) {
        self.base_mut().post_update(delta);
    }

    fn prev_render(&mut self, camera: &SceneCamera) {
        self.base_mut().prev_render(camera);
    }

    fn render(&mut self, surface: &mut dyn Surface, resources: &SceneResource) {
        self.base_mut().render(surface, resources);
    }

    /// `own` (one of this object's colliders) started touching `other`.
    fn on_collision_begin(&mut self, _own: &ColliderKey, _other: &ColliderKey) {}

    /// `own` stopped touching `other`.
    fn on_collision_end(&mut self, _own: &ColliderKey, _other: &ColliderKey) {}
}

/// ECS component holding one scene object.
#[derive(Component)]
pub struct ObjectSlot(pub Box<dyn SceneObject>);

impl ObjectSlot {
    pub fn new(object: impl SceneObject + 'static) -> Self {
        Self(Box::new(object))
    }

    pub fn object(&self) -> &dyn SceneObject {
        self.0.as_ref()
    }

    pub fn object_mut(&mut self) -> &mut dyn SceneObject {
        self.0.as_mut()
    }
}

impl Clone for Box<dyn SceneObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}
