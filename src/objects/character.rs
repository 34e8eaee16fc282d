//! Jumping and falling object with hit points.
//!
//! After the base PostUpdate a character with `floor_check` set compares its
//! sprite bottom against `floor_y`; once an airborne character reaches the
//! floor it is snapped onto it and lands.

use log::debug;

use crate::components::collider::ColliderKey;
use crate::components::gameobject::{GameObject, ObjectType};
use crate::objects::SceneObject;

#[derive(Debug, Clone)]
pub struct Character {
    base: GameObject,
    /// World Y of the floor line.
    pub floor_y: f32,
    pub hit_points: f32,
    pub max_hit_points: f32,
    /// Taken from `hit_points` whenever a collision begins.
    pub contact_damage: f32,
}

impl Character {
    pub fn new(name: impl Into<String>, floor_y: f32) -> Self {
        let mut base = GameObject::new(name).with_type(ObjectType::Character);
        base.set_physics_simulate(true);
        base.kinematics_mut().floor_check = true;
        Self {
            base,
            floor_y,
            hit_points: 100.0,
            max_hit_points: 100.0,
            contact_damage: 0.0,
        }
    }

    pub fn with_hit_points(mut self, hit_points: f32) -> Self {
        self.hit_points = hit_points;
        self.max_hit_points = hit_points;
        self
    }

    pub fn with_contact_damage(mut self, damage: f32) -> Self {
        self.contact_damage = damage;
        self
    }

    /// Apply damage (zero while damage is disabled). Destroys the character
    /// when hit points run out. Returns the damage actually taken.
    pub fn take_damage(&mut self, damage: f32) -> f32 {
        let taken = self.base.set_damage(damage);
        self.hit_points -= taken;
        if taken > 0.0 && self.hit_points <= 0.0 {
            debug!("'{}' ran out of hit points", self.base.name());
            self.base.destroy();
        }
        taken
    }

    pub fn is_on_floor(&self) -> bool {
        !self.base.kinematics().is_airborne()
    }

    fn check_floor(&mut self) {
        let kinematics = self.base.kinematics();
        if !kinematics.floor_check || !kinematics.is_airborne() {
            return;
        }
        let bottom = self.base.get_bottom();
        if bottom >= self.floor_y {
            self.base.transform_mut().pos.y -= bottom - self.floor_y;
            self.base.land();
        }
    }
}

impl SceneObject for Character {
    fn base(&self) -> &GameObject {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameObject {
        &mut self.base
    }

    fn clone_object(&self) -> Box<dyn SceneObject> {
        Box::new(self.clone())
    }

    /// Widgets get the remaining health fraction before the base pass.
    fn post_update(&mut self, delta: f32) {
        let health = if self.max_hit_points > 0.0 {
            self.hit_points / self.max_hit_points
        } else {
            0.0
        };
        for widget in self.base.widgets_mut() {
            widget.set_value(health);
        }
        self.base.post_update(delta);
        self.check_floor();
    }

    fn on_collision_begin(&mut self, _own: &ColliderKey, _other: &ColliderKey) {
        if self.contact_damage > 0.0 {
            self.take_damage(self.contact_damage);
        }
    }
}
