//! Camera follow system.

use bevy_ecs::prelude::*;

use crate::objects::ObjectSlot;
use crate::resources::camera::SceneCamera;

/// Move the camera onto its target. A target that no longer exists leaves
/// the camera where it is; the view is clamped to the world either way.
pub fn follow_camera(mut camera: ResMut<SceneCamera>, query: Query<&ObjectSlot>) {
    let Some(target) = camera.target else {
        camera.clamp_to_world();
        return;
    };
    let found = query
        .iter()
        .map(|slot| slot.object().base())
        .find(|base| base.id() == target && base.is_active())
        .map(|base| base.pos());
    match found {
        Some(pos) => camera.follow(pos),
        None => camera.clamp_to_world(),
    }
}
