//! Identity shared by scene objects and their sub-components.
//!
//! Objects and scenes refer to each other through small copyable handles
//! instead of pointers. [`ObjectId`] is handed to colliders and widgets as
//! their owner, [`SceneId`] is the non-owning back-reference to the scene an
//! object lives in.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Unique handle of a constructed (or cloned) game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocate a fresh id. Every call returns a different value.
    pub fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Handle of a scene. Objects keep it as a back-reference only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(u32);

impl SceneId {
    pub fn next() -> Self {
        SceneId(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Name plus liveness flags.
///
/// `active` turns false once the owner is destroyed and never comes back;
/// `enable` is a soft toggle that skips per-frame work while keeping the
/// owner alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    active: bool,
    enable: bool,
}

impl Default for Identity {
    fn default() -> Self {
        Self::new("")
    }
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            enable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark for removal. The owning container drops it on its next pass.
    pub fn destroy(&mut self) {
        self.active = false;
    }

    pub fn enable(&self) -> bool {
        self.enable
    }

    pub fn set_enable(&mut self, enable: bool) {
        self.enable = enable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids_are_unique() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_identity_destroy_is_permanent() {
        let mut identity = Identity::new("player");
        assert!(identity.is_active());
        identity.destroy();
        identity.set_enable(true);
        assert!(!identity.is_active());
        assert_eq!(identity.name(), "player");
    }
}
