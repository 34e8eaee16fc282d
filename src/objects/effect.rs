//! One-shot visual effect. Plays its current clip and destroys itself when
//! the clip ends.

use log::debug;

use crate::components::animation::AnimationEvent;
use crate::components::gameobject::{GameObject, ObjectType};
use crate::objects::SceneObject;
use crate::resources::sceneresource::SceneResource;

#[derive(Debug, Clone)]
pub struct Effect {
    base: GameObject,
    /// Notify names seen so far, in order.
    notified: Vec<String>,
}

impl Effect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: GameObject::new(name).with_type(ObjectType::Effect),
            notified: Vec::new(),
        }
    }

    /// Effect playing `sequence` once at its natural duration.
    pub fn with_sequence(
        name: impl Into<String>,
        resources: &SceneResource,
        sequence: &str,
    ) -> Self {
        let mut effect = Self::new(name);
        effect
            .base
            .add_animation(resources, sequence, false, None, 1.0, false);
        effect
    }

    pub fn notified(&self) -> &[String] {
        &self.notified
    }
}

impl SceneObject for Effect {
    fn base(&self) -> &GameObject {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameObject {
        &mut self.base
    }

    fn clone_object(&self) -> Box<dyn SceneObject> {
        Box::new(self.clone())
    }

    fn update(&mut self, delta: f32) {
        self.base.update(delta);
        for event in self.base.drain_animation_events() {
            match event {
                AnimationEvent::Ended(clip) => {
                    debug!("Effect '{}' finished '{}'", self.base.name(), clip);
                    self.base.destroy();
                }
                AnimationEvent::Notify { name, .. } => self.notified.push(name),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::{AnimationFrameData, AnimationSequence, TextureType};
    use crate::resources::texturestore::Texture;

    fn resources() -> SceneResource {
        let mut resources = SceneResource::new();
        resources.insert_texture(Texture::from_dimensions("fx", 64, 16));
        resources.insert_animation(
            AnimationSequence::new("spark", "fx", TextureType::Atlas)
                .with_play_time(0.4)
                .with_frame(AnimationFrameData::new(0.0, 0.0, 16.0, 16.0))
                .with_frame(AnimationFrameData::new(16.0, 0.0, 16.0, 16.0))
                .with_frame(AnimationFrameData::new(32.0, 0.0, 16.0, 16.0))
                .with_frame(AnimationFrameData::new(48.0, 0.0, 16.0, 16.0)),
        );
        resources
    }

    #[test]
    fn test_destroys_itself_when_clip_ends() {
        let resources = resources();
        let mut effect = Effect::with_sequence("hit", &resources, "spark");
        effect.base_mut().add_animation_notify("spark", 2, "peak");

        effect.update(0.25);
        assert!(effect.base().is_active());
        assert_eq!(effect.notified(), &["peak".to_string()]);

        effect.update(0.25);
        assert!(!effect.base().is_active());
    }

    #[test]
    fn test_unknown_sequence_never_ends() {
        let resources = resources();
        let mut effect = Effect::with_sequence("dud", &resources, "missing");
        effect.update(10.0);
        assert!(effect.base().is_active());
        assert!(effect.base().animation().is_some());
    }
}
