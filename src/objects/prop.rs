//! Plain object: scenery, pickups, anything driven entirely from outside.

use crate::components::gameobject::GameObject;
use crate::objects::SceneObject;

#[derive(Debug, Clone)]
pub struct Prop {
    base: GameObject,
}

impl Prop {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: GameObject::new(name),
        }
    }

    pub fn from_base(base: GameObject) -> Self {
        Self { base }
    }
}

impl SceneObject for Prop {
    fn base(&self) -> &GameObject {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameObject {
        &mut self.base
    }

    fn clone_object(&self) -> Box<dyn SceneObject> {
        Box::new(self.clone())
    }
}
