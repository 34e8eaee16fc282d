//! Per-frame collision sink.
//!
//! Objects register their colliders during the collision pass. Resolution is a
//! plain all-pairs AABB test over what was registered this frame: two
//! colliders touch when both are enabled, belong to different owners and their
//! bounds overlap. The set of touching pairs is kept for one frame so
//! [`SceneCollision::resolve`] can report which pairs began and which ended.

use bevy_ecs::prelude::Resource;
use log::trace;
use raylib::prelude::Vector2;
use rustc_hash::FxHashSet;

use crate::components::collider::{Collider, ColliderKey, bounds_overlap};
use crate::events::collision::CollisionMessage;

#[derive(Debug, Clone)]
pub struct ColliderEntry {
    pub key: ColliderKey,
    pub min: Vector2,
    pub max: Vector2,
    pub enabled: bool,
}

#[derive(Resource, Debug, Default)]
pub struct SceneCollision {
    entries: Vec<ColliderEntry>,
    contacts: FxHashSet<(ColliderKey, ColliderKey)>,
}

impl SceneCollision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider for this frame. Inactive or ownerless colliders are
    /// ignored.
    pub fn add_collider(&mut self, collider: &dyn Collider) {
        if !collider.is_active() {
            return;
        }
        let Some(key) = collider.key() else {
            return;
        };
        let (min, max) = collider.bounds();
        self.entries.push(ColliderEntry {
            key,
            min,
            max,
            enabled: collider.enable(),
        });
    }

    pub fn registered(&self) -> &[ColliderEntry] {
        &self.entries
    }

    /// Pairs touching as of the last [`resolve`](Self::resolve).
    pub fn contacts(&self) -> impl Iterator<Item = &(ColliderKey, ColliderKey)> {
        self.contacts.iter()
    }

    pub fn partners_of<'a>(&'a self, key: &'a ColliderKey) -> impl Iterator<Item = &'a ColliderKey> {
        self.contacts.iter().filter_map(move |(a, b)| {
            if a == key {
                Some(b)
            } else if b == key {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Test every registered pair, clear the registrations and return what
    /// changed since the previous call. Ends come before begins.
    pub fn resolve(&mut self) -> Vec<CollisionMessage> {
        let mut current: FxHashSet<(ColliderKey, ColliderKey)> = FxHashSet::default();

        for (i, a) in self.entries.iter().enumerate() {
            if !a.enabled {
                continue;
            }
            for b in &self.entries[i + 1..] {
                if !b.enabled || a.key.owner == b.key.owner {
                    continue;
                }
                if bounds_overlap((a.min, a.max), (b.min, b.max)) {
                    current.insert(ordered(&a.key, &b.key));
                }
            }
        }
        self.entries.clear();

        let mut ended: Vec<_> = self.contacts.difference(&current).cloned().collect();
        let mut began: Vec<_> = current.difference(&self.contacts).cloned().collect();
        ended.sort();
        began.sort();

        let mut messages = Vec::with_capacity(ended.len() + began.len());
        messages.extend(ended.into_iter().map(|(a, b)| CollisionMessage::End { a, b }));
        messages.extend(began.into_iter().map(|(a, b)| CollisionMessage::Begin { a, b }));

        if !messages.is_empty() {
            trace!("Collision changes: {:?}", messages);
        }
        self.contacts = current;
        messages
    }

    /// Forget every registration and contact.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.contacts.clear();
    }
}

fn ordered(a: &ColliderKey, b: &ColliderKey) -> (ColliderKey, ColliderKey) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}
