//! Collision messages.
//!
//! [`SceneCollision::resolve`](crate::resources::scenecollision::SceneCollision::resolve)
//! compares this frame's overlapping pairs with the previous frame's and
//! produces a [`CollisionMessage`] for every pair that started or stopped
//! touching. The frame pipeline writes them to the ECS message queue and then
//! applies them to the colliders' collision lists.

use bevy_ecs::message::Message;

use crate::components::collider::ColliderKey;

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum CollisionMessage {
    /// `a` and `b` overlap this frame but did not last frame.
    Begin { a: ColliderKey, b: ColliderKey },
    /// `a` and `b` overlapped last frame but no longer do.
    End { a: ColliderKey, b: ColliderKey },
}

impl CollisionMessage {
    pub fn pair(&self) -> (&ColliderKey, &ColliderKey) {
        match self {
            CollisionMessage::Begin { a, b } | CollisionMessage::End { a, b } => (a, b),
        }
    }

    /// The other side of the pair, if `key` is one of them.
    pub fn partner_of(&self, key: &ColliderKey) -> Option<&ColliderKey> {
        let (a, b) = self.pair();
        if a == key {
            Some(b)
        } else if b == key {
            Some(a)
        } else {
            None
        }
    }
}
