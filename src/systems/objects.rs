//! Frame-phase systems over every [`ObjectSlot`].
//!
//! Each system walks all scene objects and calls one lifecycle method on the
//! active ones. They only make sense in the order the scene chains them; see
//! [`Scene`](crate::scene::Scene).

use bevy_ecs::prelude::*;
use log::debug;

use crate::objects::ObjectSlot;
use crate::resources::camera::SceneCamera;
use crate::resources::scenecollision::SceneCollision;
use crate::resources::worldtime::WorldTime;

pub fn update_objects(world_time: Res<WorldTime>, mut query: Query<&mut ObjectSlot>) {
    let dt = world_time.delta;
    for mut slot in query.iter_mut() {
        let object = slot.object_mut();
        if object.base().is_active() {
            object.update(dt);
        }
    }
}

/// Despawn objects that were destroyed, including by their own update.
pub fn despawn_destroyed(query: Query<(Entity, &ObjectSlot)>, mut commands: Commands) {
    for (entity, slot) in query.iter() {
        let base = slot.object().base();
        if !base.is_active() {
            debug!("Despawning '{}' ({:?})", base.name(), base.id());
            commands.entity(entity).try_despawn();
        }
    }
}

/// Collision pass: every object hands its colliders to the sink.
pub fn register_colliders(
    world_time: Res<WorldTime>,
    mut sink: ResMut<SceneCollision>,
    mut query: Query<&mut ObjectSlot>,
) {
    let dt = world_time.delta;
    for mut slot in query.iter_mut() {
        let object = slot.object_mut();
        if object.base().is_active() {
            object.collision(&mut sink, dt);
        }
    }
}

pub fn post_update_objects(world_time: Res<WorldTime>, mut query: Query<&mut ObjectSlot>) {
    let dt = world_time.delta;
    for mut slot in query.iter_mut() {
        let object = slot.object_mut();
        if object.base().is_active() {
            object.post_update(dt);
        }
    }
}

/// Runs once the camera is final for the frame.
pub fn prev_render_objects(camera: Res<SceneCamera>, mut query: Query<&mut ObjectSlot>) {
    for mut slot in query.iter_mut() {
        let object = slot.object_mut();
        if object.base().is_active() {
            object.prev_render(&camera);
        }
    }
}
