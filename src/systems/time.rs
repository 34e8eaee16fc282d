//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::events::collision::CollisionMessage;
use crate::resources::worldtime::WorldTime;

/// Advance the `WorldTime` resource by the unscaled frame delta `dt`.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}

/// Advance the ECS message queue for [`CollisionMessage`] so readers only
/// see the last two frames of changes.
pub fn update_collision_messages(mut messages: ResMut<Messages<CollisionMessage>>) {
    messages.update();
}
