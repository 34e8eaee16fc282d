//! Collision resolution and dispatch.
//!
//! [`resolve_collisions`] turns this frame's registrations into
//! [`CollisionMessage`]s. [`dispatch_collisions`] reads them back, keeps every
//! collider's collision list in sync and calls the owners' begin/end hooks.

use bevy_ecs::prelude::*;

use crate::components::collider::ColliderKey;
use crate::events::collision::CollisionMessage;
use crate::objects::{ObjectSlot, SceneObject};
use crate::resources::scenecollision::SceneCollision;

pub fn resolve_collisions(
    mut sink: ResMut<SceneCollision>,
    mut writer: MessageWriter<CollisionMessage>,
) {
    writer.write_batch(sink.resolve());
}

pub fn dispatch_collisions(
    mut reader: MessageReader<CollisionMessage>,
    mut query: Query<&mut ObjectSlot>,
) {
    let messages: Vec<CollisionMessage> = reader.read().cloned().collect();
    if messages.is_empty() {
        return;
    }

    for mut slot in query.iter_mut() {
        let object = slot.object_mut();
        let id = object.base().id();
        for message in &messages {
            let (a, b) = message.pair();
            for (own, other) in [(a, b), (b, a)] {
                if own.owner == id {
                    apply(object, message, own, other);
                }
            }
        }
    }
}

fn apply(
    object: &mut dyn SceneObject,
    message: &CollisionMessage,
    own: &ColliderKey,
    other: &ColliderKey,
) {
    let Some(collider) = object.base_mut().collider_by_key_mut(own) else {
        return;
    };
    match message {
        CollisionMessage::Begin { .. } => {
            collider.add_collision(other.clone());
            object.on_collision_begin(own, other);
        }
        CollisionMessage::End { .. } => {
            collider.remove_collision(other);
            object.on_collision_end(own, other);
        }
    }
}
