//! UI sub-components attached to a game object.
//!
//! Widgets run in lockstep with their owner: updated after its colliders,
//! given a collision hook during the collision phase, and drawn after the
//! owner's sprite. Unlike colliders they are never pruned by the object.

use crate::components::identity::{ObjectId, SceneId};
use crate::components::transform::ObjectTransform;
use crate::resources::rendertarget::Surface;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetCore {
    owner: Option<ObjectId>,
    scene: Option<SceneId>,
}

pub trait Widget: Send + Sync {
    fn core(&self) -> &WidgetCore;
    fn core_mut(&mut self) -> &mut WidgetCore;

    fn clone_box(&self) -> Box<dyn Widget>;

    fn update(&mut self, owner: &ObjectTransform, delta: f32);

    fn post_update(&mut self, _owner: &ObjectTransform, _delta: f32) {}

    fn collision(&mut self, _delta: f32) {}

    fn render(&self, surface: &mut dyn Surface, owner: &ObjectTransform);

    /// Feed a normalized value (health, charge) to the widget.
    fn set_value(&mut self, _value: f32) {}

    fn owner(&self) -> Option<ObjectId> {
        self.core().owner
    }

    fn set_owner(&mut self, owner: ObjectId) {
        self.core_mut().owner = Some(owner);
    }

    fn scene(&self) -> Option<SceneId> {
        self.core().scene
    }

    fn set_scene(&mut self, scene: Option<SceneId>) {
        self.core_mut().scene = scene;
    }
}
