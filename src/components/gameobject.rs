//! The base game object and its per-frame lifecycle.
//!
//! A [`GameObject`] owns its spatial state, an optional [`AnimationState`],
//! an ordered list of colliders and an ordered list of widgets. The scene
//! drives it through a fixed sequence every frame:
//!
//! 1. [`update`](GameObject::update) – start hook, lifetime, animation,
//!    fall/jump arc, collider and widget updates
//! 2. [`collision`](GameObject::collision) – register colliders with the
//!    scene's collision sink (resolution happens outside the object)
//! 3. [`post_update`](GameObject::post_update) – adopt the animation frame
//!    size, second collider/widget pass after resolution
//! 4. [`prev_render`](GameObject::prev_render) – camera-relative position and
//!    the cull test (camera must be final for the frame)
//! 5. [`render`](GameObject::render) – draw, then snapshot `prev_pos` and
//!    clear `velocity` as the very last step
//!
//! The object never stores pointers to its scene or textures. It keeps a
//! [`SceneId`] handle and a texture key; the collaborators it needs for a
//! call are passed in explicitly.
//!
//! Concrete object kinds wrap a `GameObject` and implement
//! [`SceneObject`](crate::objects::SceneObject).

use std::sync::Arc;

use log::warn;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::animation::{AnimationEvent, AnimationState};
use crate::components::collider::{Collider, ColliderKey};
use crate::components::identity::{Identity, ObjectId, SceneId};
use crate::components::kinematics::Kinematics;
use crate::components::transform::ObjectTransform;
use crate::components::widget::Widget;
use crate::resources::animationstore::{AnimationFrameData, TextureType};
use crate::resources::camera::SceneCamera;
use crate::resources::rendertarget::Surface;
use crate::resources::scenecollision::SceneCollision;
use crate::resources::sceneresource::SceneResource;

/// Default movement speed in pixels per second.
pub const DEFAULT_MOVE_SPEED: f32 = 200.0;

/// Kind tag of a game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ObjectType {
    #[default]
    GameObject,
    Character,
    Effect,
}

pub struct GameObject {
    identity: Identity,
    id: ObjectId,
    object_type: ObjectType,
    scene: Option<SceneId>,

    transform: ObjectTransform,
    move_speed: f32,
    time_scale: f32,
    /// Source offset into a static texture.
    image_start: Vector2,

    started: bool,
    /// Seconds left to live; 0 or less means unlimited.
    life_time: f32,
    camera_cull: bool,

    kinematics: Kinematics,

    damage_enable: bool,
    is_note: bool,
    is_selected: bool,
    time: f32,
    is_scene_end: bool,
    input_time: f32,

    animation: Option<AnimationState>,
    colliders: Vec<Box<dyn Collider>>,
    next_collider_slot: u32,
    widgets: Vec<Box<dyn Widget>>,
    texture: Option<Arc<str>>,
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            id: ObjectId::next(),
            object_type: ObjectType::GameObject,
            scene: None,
            transform: ObjectTransform::default(),
            move_speed: DEFAULT_MOVE_SPEED,
            time_scale: 1.0,
            image_start: Vector2::zero(),
            started: false,
            life_time: 0.0,
            camera_cull: false,
            kinematics: Kinematics::default(),
            damage_enable: true,
            is_note: false,
            is_selected: false,
            time: 0.0,
            is_scene_end: false,
            input_time: 0.0,
            animation: None,
            colliders: Vec::new(),
            next_collider_slot: 0,
            widgets: Vec::new(),
            texture: None,
        }
    }

    pub fn with_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    // ----------------------------------------------------------- identity

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.identity.set_name(name);
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn set_object_type(&mut self, object_type: ObjectType) {
        self.object_type = object_type;
    }

    pub fn is_active(&self) -> bool {
        self.identity.is_active()
    }

    pub fn destroy(&mut self) {
        self.identity.destroy();
    }

    pub fn enable(&self) -> bool {
        self.identity.enable()
    }

    pub fn set_enable(&mut self, enable: bool) {
        self.identity.set_enable(enable);
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Attach to a scene. Animation, colliders and widgets follow.
    pub fn set_scene(&mut self, scene: SceneId) {
        self.scene = Some(scene);
        if let Some(animation) = self.animation.as_mut() {
            animation.set_scene(self.scene);
        }
        for collider in &mut self.colliders {
            collider.set_scene(self.scene);
        }
        for widget in &mut self.widgets {
            widget.set_scene(self.scene);
        }
    }

    // ------------------------------------------------------------ spatial

    pub fn transform(&self) -> &ObjectTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut ObjectTransform {
        &mut self.transform
    }

    pub fn pos(&self) -> Vector2 {
        self.transform.pos
    }

    pub fn set_pos(&mut self, x: f32, y: f32) {
        self.transform.pos = Vector2::new(x, y);
    }

    pub fn prev_pos(&self) -> Vector2 {
        self.transform.prev_pos
    }

    pub fn render_pos(&self) -> Vector2 {
        self.transform.render_pos
    }

    pub fn size(&self) -> Vector2 {
        self.transform.size
    }

    pub fn set_size(&mut self, x: f32, y: f32) {
        self.transform.size = Vector2::new(x, y);
    }

    pub fn set_pivot(&mut self, x: f32, y: f32) {
        self.transform.pivot = Vector2::new(x, y);
    }

    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.transform.offset = Vector2::new(x, y);
    }

    pub fn velocity(&self) -> Vector2 {
        self.transform.velocity
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    pub fn set_image_start(&mut self, x: f32, y: f32) {
        self.image_start = Vector2::new(x, y);
    }

    /// Move along `dir` at the object's own speed.
    pub fn move_by(&mut self, dir: Vector2, delta: f32) {
        self.move_with_speed(dir, self.move_speed, delta);
    }

    /// The displacement is added to `pos` and accumulated into `velocity`.
    pub fn move_with_speed(&mut self, dir: Vector2, speed: f32, delta: f32) {
        let step = dir * (speed * delta * self.time_scale);
        self.transform.velocity += step;
        self.transform.pos += step;
    }

    /// Size of what is on screen: the current animation frame, else `size`.
    pub fn frame_size(&self) -> Vector2 {
        self.current_frame()
            .map(|frame| frame.size)
            .unwrap_or(self.transform.size)
    }

    /// Lowest on-screen Y of the sprite in world space.
    pub fn get_bottom(&self) -> f32 {
        let size = self.frame_size();
        self.transform.pos.y + (1.0 - self.transform.pivot.y) * size.y + self.transform.offset.y
    }

    pub fn is_camera_culled(&self) -> bool {
        self.camera_cull
    }

    // ---------------------------------------------------------- lifecycle

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn life_time(&self) -> f32 {
        self.life_time
    }

    /// Destroy the object after `seconds`. 0 disables the countdown.
    pub fn set_life_time(&mut self, seconds: f32) {
        self.life_time = seconds;
    }

    pub fn init(&mut self) -> bool {
        true
    }

    /// Runs once, on the first update.
    pub fn start(&mut self) {
        self.started = true;
        self.kinematics.anchor(self.transform.pos.y);
    }

    pub fn update(&mut self, delta: f32) {
        if !self.started {
            self.start();
        }

        if self.life_time > 0.0 {
            self.life_time -= delta;
            if self.life_time <= 0.0 {
                self.destroy();
                return;
            }
        }

        if let Some(animation) = self.animation.as_mut() {
            animation.update(delta);
        }

        if let Some(y) = self.kinematics.advance(delta) {
            self.transform.pos.y = y;
        }

        let transform = &self.transform;
        self.colliders.retain_mut(|collider| {
            if !collider.is_active() {
                return false;
            }
            if collider.enable() {
                collider.update(transform, delta);
            }
            true
        });

        for widget in &mut self.widgets {
            widget.update(&self.transform, delta);
        }
    }

    pub fn post_update(&mut self, delta: f32) {
        if let Some(frame) = self.current_frame() {
            self.transform.size = frame.size;
        }

        let transform = &self.transform;
        self.colliders.retain_mut(|collider| {
            if !collider.is_active() {
                return false;
            }
            if collider.enable() {
                collider.post_update(transform, delta);
            }
            true
        });

        for widget in &mut self.widgets {
            widget.post_update(&self.transform, delta);
        }
    }

    /// Hand every collider to the scene's sink, then run widget hooks.
    pub fn collision(&mut self, sink: &mut SceneCollision, delta: f32) {
        for collider in &self.colliders {
            sink.add_collider(collider.as_ref());
        }

        for widget in &mut self.widgets {
            widget.collision(delta);
        }
    }

    /// Compute the camera-relative position and whether the sprite is fully
    /// outside the camera's resolution rectangle.
    pub fn prev_render(&mut self, camera: &SceneCamera) {
        self.transform.render_pos = self.transform.pos - camera.pos;

        let size = self.frame_size();
        let lt = self.transform.top_left(size);
        let resolution = camera.resolution;

        self.camera_cull = lt.x + size.x <= 0.0
            || lt.x >= resolution.x
            || lt.y + size.y <= 0.0
            || lt.y >= resolution.y;
    }

    /// Draw the sprite (skipped while culled), colliders and widgets, then
    /// snapshot `prev_pos` and clear `velocity`.
    pub fn render(&mut self, surface: &mut dyn Surface, resources: &SceneResource) {
        if !self.camera_cull {
            self.draw_sprite(surface, resources);
        }

        let transform = &self.transform;
        self.colliders.retain_mut(|collider| {
            if !collider.is_active() {
                return false;
            }
            if collider.enable() {
                collider.render(surface, transform);
            }
            true
        });

        for widget in &self.widgets {
            widget.render(surface, &self.transform);
        }

        self.transform.prev_pos = self.transform.pos;
        self.transform.velocity = Vector2::zero();
    }

    fn draw_sprite(&self, surface: &mut dyn Surface, resources: &SceneResource) {
        if let Some(clip) = self.animation.as_ref().and_then(|a| a.current_clip()) {
            let Some(frame) = clip.current_frame_data() else {
                return;
            };
            let Some(texture) = resources.find_texture(clip.sequence.tex_key()) else {
                return;
            };
            let lt = self.transform.top_left(frame.size);
            let image = match clip.sequence.texture_type() {
                TextureType::Atlas => 0,
                TextureType::Frame => clip.frame,
            };
            texture.render(surface, lt, frame.start_pos, frame.size, image);
            return;
        }

        let Some(key) = self.texture.as_deref() else {
            return;
        };
        if let Some(texture) = resources.find_texture(key) {
            let lt = self.transform.top_left(self.transform.size);
            texture.render(surface, lt, self.image_start, self.transform.size, 0);
        }
    }

    // ---------------------------------------------------------- colliders

    /// Take ownership of a collider and re-parent it to this object. Each
    /// collider gets its own slot, so same-named colliders keep distinct keys.
    pub fn add_collider(&mut self, mut collider: Box<dyn Collider>) {
        collider.set_owner(self.id);
        collider.set_slot(self.next_collider_slot);
        collider.set_scene(self.scene);
        self.next_collider_slot += 1;
        self.colliders.push(collider);
    }

    pub fn colliders(&self) -> &[Box<dyn Collider>] {
        &self.colliders
    }

    pub fn colliders_mut(&mut self) -> &mut [Box<dyn Collider>] {
        &mut self.colliders
    }

    /// First collider whose name matches exactly.
    pub fn find_collider(&self, name: &str) -> Option<&dyn Collider> {
        self.colliders
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn find_collider_mut(&mut self, name: &str) -> Option<&mut Box<dyn Collider>> {
        self.colliders.iter_mut().find(|c| c.name() == name)
    }

    /// The collider registered under `key`, if it still belongs to this object.
    pub fn collider_by_key_mut(&mut self, key: &ColliderKey) -> Option<&mut Box<dyn Collider>> {
        if key.owner != self.id {
            return None;
        }
        self.colliders
            .iter_mut()
            .find(|c| c.slot() == key.slot && c.name() == key.name)
    }

    // ------------------------------------------------------------ widgets

    pub fn add_widget(&mut self, mut widget: Box<dyn Widget>) {
        widget.set_owner(self.id);
        widget.set_scene(self.scene);
        self.widgets.push(widget);
    }

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.widgets
    }

    // ---------------------------------------------------------- animation

    pub fn animation(&self) -> Option<&AnimationState> {
        self.animation.as_ref()
    }

    /// Create the animation state if it does not exist yet.
    pub fn create_animation(&mut self) -> &mut AnimationState {
        let id = self.id;
        let scene = self.scene;
        self.animation.get_or_insert_with(|| {
            let mut animation = AnimationState::new();
            animation.set_owner(id);
            animation.set_scene(scene);
            animation
        })
    }

    /// Add a clip for `sequence_name`, creating the animation state first if
    /// needed. `play_time: None` uses the sequence's own duration.
    pub fn add_animation(
        &mut self,
        resources: &SceneResource,
        sequence_name: &str,
        looping: bool,
        play_time: Option<f32>,
        play_scale: f32,
        reverse: bool,
    ) -> bool {
        self.create_animation().add_animation(
            resources,
            sequence_name,
            looping,
            play_time,
            play_scale,
            reverse,
        )
    }

    pub fn set_animation_play_time(&mut self, name: &str, play_time: f32) {
        if let Some(animation) = self.animation.as_mut() {
            animation.set_play_time(name, play_time);
        }
    }

    pub fn set_animation_play_scale(&mut self, name: &str, play_scale: f32) {
        if let Some(animation) = self.animation.as_mut() {
            animation.set_play_scale(name, play_scale);
        }
    }

    pub fn set_current_animation(&mut self, name: &str) {
        if let Some(animation) = self.animation.as_mut() {
            animation.set_current(name);
        }
    }

    pub fn change_animation(&mut self, name: &str) {
        if let Some(animation) = self.animation.as_mut() {
            animation.change(name);
        }
    }

    /// False when there is no animation at all.
    pub fn check_current_animation(&self, name: &str) -> bool {
        self.animation
            .as_ref()
            .map(|a| a.is_current(name))
            .unwrap_or(false)
    }

    pub fn set_animation_reverse(&mut self, name: &str, reverse: bool) {
        if let Some(animation) = self.animation.as_mut() {
            animation.set_reverse(name, reverse);
        }
    }

    pub fn set_animation_loop(&mut self, name: &str, looping: bool) {
        if let Some(animation) = self.animation.as_mut() {
            animation.set_loop(name, looping);
        }
    }

    pub fn add_animation_notify(&mut self, clip: &str, frame: usize, name: &str) {
        if let Some(animation) = self.animation.as_mut() {
            animation.add_notify(clip, frame, name);
        }
    }

    pub fn drain_animation_events(&mut self) -> Vec<AnimationEvent> {
        self.animation
            .as_mut()
            .map(|a| a.drain_events())
            .unwrap_or_default()
    }

    fn current_frame(&self) -> Option<AnimationFrameData> {
        self.animation.as_ref().and_then(|a| a.current_frame())
    }

    // ------------------------------------------------------------ texture

    pub fn texture_key(&self) -> Option<&str> {
        self.texture.as_deref()
    }

    /// Bind an already loaded texture and adopt its size. A missing texture
    /// unbinds and leaves `size` as it was.
    pub fn set_texture(&mut self, resources: &SceneResource, name: &str) {
        match resources.find_texture(name) {
            Some(texture) => {
                self.texture = Some(Arc::from(name));
                self.transform.size = texture.size();
            }
            None => {
                warn!("'{}': texture '{}' not found", self.name(), name);
                self.texture = None;
            }
        }
    }

    pub fn set_texture_from_file(
        &mut self,
        resources: &mut SceneResource,
        name: &str,
        file: &str,
        path_key: &str,
    ) {
        if let Err(e) = resources.load_texture(name, file, path_key) {
            warn!("{}", e);
        }
        self.set_texture(resources, name);
    }

    pub fn set_texture_full_path(
        &mut self,
        resources: &mut SceneResource,
        name: &str,
        full_path: &std::path::Path,
    ) {
        if let Err(e) = resources.load_texture_full_path(name, full_path) {
            warn!("{}", e);
        }
        self.set_texture(resources, name);
    }

    pub fn set_texture_frames(
        &mut self,
        resources: &mut SceneResource,
        name: &str,
        files: &[&str],
        path_key: &str,
    ) {
        if let Err(e) = resources.load_texture_frames(name, files, path_key) {
            warn!("{}", e);
        }
        self.set_texture(resources, name);
    }

    /// Set the transparent color of the bound texture. No-op without one.
    pub fn set_texture_color_key(
        &self,
        resources: &mut SceneResource,
        r: u8,
        g: u8,
        b: u8,
        frame: Option<usize>,
    ) {
        if let Some(key) = self.texture.as_deref() {
            resources.set_color_key(key, r, g, b, frame);
        }
    }

    // ------------------------------------------------------------ physics

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    pub fn set_physics_simulate(&mut self, simulate: bool) {
        self.kinematics.simulate = simulate;
    }

    pub fn set_jump_velocity(&mut self, velocity: f32) {
        self.kinematics.jump_velocity = velocity;
    }

    pub fn set_gravity_accel(&mut self, accel: f32) {
        self.kinematics.gravity_accel = accel;
    }

    /// Jump from the current position. False while already jumping.
    pub fn jump(&mut self) -> bool {
        self.kinematics.jump(self.transform.pos.y)
    }

    pub fn start_fall(&mut self) {
        self.kinematics.start_fall(self.transform.pos.y);
    }

    pub fn land(&mut self) {
        self.kinematics.land(self.transform.pos.y);
    }

    // ----------------------------------------------------------- gameplay

    /// Damage actually taken: `damage`, or 0 while damage is disabled.
    pub fn set_damage(&self, damage: f32) -> f32 {
        if !self.damage_enable {
            return 0.0;
        }
        damage
    }

    pub fn damage_enable(&self) -> bool {
        self.damage_enable
    }

    pub fn set_damage_enable(&mut self, enable: bool) {
        self.damage_enable = enable;
    }

    pub fn is_note(&self) -> bool {
        self.is_note
    }

    pub fn set_note(&mut self, is_note: bool) {
        self.is_note = is_note;
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn is_scene_end(&self) -> bool {
        self.is_scene_end
    }

    pub fn set_scene_end(&mut self, end: bool) {
        self.is_scene_end = end;
    }

    pub fn input_time(&self) -> f32 {
        self.input_time
    }

    pub fn set_input_time(&mut self, time: f32) {
        self.input_time = time;
    }
}

/// Copy-construction.
///
/// The copy gets a fresh [`ObjectId`], deep copies of the animation state,
/// colliders and widgets (each re-parented to the copy and the copy's scene)
/// and `started == false` so it runs its own first-frame setup. Collision
/// lists and the cull flag start empty.
impl Clone for GameObject {
    fn clone(&self) -> Self {
        let id = ObjectId::next();
        let scene = self.scene;

        let animation = self.animation.as_ref().map(|source| {
            let mut animation = source.clone();
            animation.set_owner(id);
            animation.set_scene(scene);
            animation
        });

        let colliders = self
            .colliders
            .iter()
            .map(|source| {
                let mut collider = source.clone_box();
                collider.clear_collision_list();
                collider.set_owner(id);
                collider.set_scene(scene);
                collider
            })
            .collect();

        let widgets = self
            .widgets
            .iter()
            .map(|source| {
                let mut widget = source.clone_box();
                widget.set_owner(id);
                widget.set_scene(scene);
                widget
            })
            .collect();

        Self {
            identity: self.identity.clone(),
            id,
            object_type: self.object_type,
            scene,
            transform: self.transform,
            move_speed: self.move_speed,
            time_scale: self.time_scale,
            image_start: self.image_start,
            started: false,
            life_time: self.life_time,
            camera_cull: false,
            kinematics: self.kinematics,
            damage_enable: self.damage_enable,
            is_note: self.is_note,
            is_selected: self.is_selected,
            time: self.time,
            is_scene_end: self.is_scene_end,
            input_time: self.input_time,
            animation,
            colliders,
            next_collider_slot: self.next_collider_slot,
            widgets,
            texture: self.texture.clone(),
        }
    }
}

impl Drop for GameObject {
    fn drop(&mut self) {
        for collider in &mut self.colliders {
            collider.clear_collision_list();
        }
    }
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name())
            .field("id", &self.id)
            .field("object_type", &self.object_type)
            .field("pos", &self.transform.pos)
            .field("active", &self.is_active())
            .field("colliders", &self.colliders.len())
            .field("widgets", &self.widgets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::BoxCollider;
    use crate::resources::animationstore::AnimationSequence;
    use crate::resources::rendertarget::{DrawCommand, RecordingSurface};
    use crate::resources::texturestore::{Texture, TextureFrame};

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn resources() -> SceneResource {
        let mut resources = SceneResource::new();
        resources.insert_texture(Texture::from_dimensions("sheet", 64, 32));
        resources.insert_texture(Texture::from_frames("run", vec![TextureFrame::new(8, 8); 3]));
        resources.insert_animation(
            AnimationSequence::new("walk", "sheet", TextureType::Atlas)
                .with_play_time(0.2)
                .with_frame(AnimationFrameData::new(0.0, 0.0, 16.0, 32.0))
                .with_frame(AnimationFrameData::new(16.0, 0.0, 16.0, 30.0)),
        );
        resources.insert_animation(
            AnimationSequence::new("run", "run", TextureType::Frame)
                .with_play_time(0.3)
                .with_frame(AnimationFrameData::new(0.0, 0.0, 8.0, 8.0))
                .with_frame(AnimationFrameData::new(0.0, 0.0, 8.0, 8.0))
                .with_frame(AnimationFrameData::new(0.0, 0.0, 8.0, 8.0)),
        );
        resources
    }

    fn boxed(name: &str, w: f32, h: f32) -> Box<dyn Collider> {
        Box::new(BoxCollider::new(name, w, h))
    }

    fn texture_draws(surface: &RecordingSurface) -> Vec<DrawCommand> {
        surface.texture_draws().cloned().collect()
    }

    // ==================== Lifecycle ====================

    #[test]
    fn test_first_update_starts_and_anchors() {
        let mut obj = GameObject::new("a");
        obj.set_pos(3.0, 42.0);
        assert!(!obj.is_started());
        obj.update(0.016);
        assert!(obj.is_started());
        assert_eq!(obj.kinematics().fall_start_y, 42.0);
    }

    #[test]
    fn test_lifetime_destroys_on_expiring_call_without_other_work() {
        let res = resources();
        let mut obj = GameObject::new("spark");
        obj.add_animation(&res, "walk", true, None, 1.0, false);
        obj.set_life_time(0.25);

        obj.update(0.1);
        obj.update(0.1);
        assert!(obj.is_active());
        let frame_before = obj.animation().unwrap().current_clip().unwrap().frame;
        let time_before = obj.animation().unwrap().current_clip().unwrap().time;

        obj.update(0.1);
        assert!(!obj.is_active());
        let clip = obj.animation().unwrap().current_clip().unwrap();
        assert_eq!(clip.frame, frame_before);
        assert_eq!(clip.time, time_before);
    }

    #[test]
    fn test_lifetime_expiry_skips_physics_and_colliders() {
        let mut obj = GameObject::new("debris");
        obj.set_pos(0.0, 100.0);
        obj.set_physics_simulate(true);
        obj.add_collider(boxed("body", 4.0, 4.0));
        obj.set_life_time(0.25);
        obj.start_fall();

        obj.update(0.1);
        obj.update(0.1);
        assert!(obj.is_active());
        let y_before = obj.pos().y;
        assert!(y_before > 100.0);
        let bounds_before = obj.colliders()[0].bounds();

        // a collider update would follow this move
        obj.set_pos(50.0, y_before);
        obj.update(0.1);

        assert!(!obj.is_active());
        assert_eq!(obj.pos().y, y_before);
        assert_eq!(obj.colliders()[0].bounds(), bounds_before);
    }

    #[test]
    fn test_zero_lifetime_is_unlimited() {
        let mut obj = GameObject::new("a");
        for _ in 0..100 {
            obj.update(1.0);
        }
        assert!(obj.is_active());
    }

    // ==================== Kinematics ====================

    #[test]
    fn test_pure_fall_follows_closed_form() {
        let mut obj = GameObject::new("rock");
        obj.set_pos(0.0, 100.0);
        obj.set_physics_simulate(true);
        obj.start_fall();
        obj.update(0.1);
        // t = 0.1 * 10
        assert!(approx_eq(obj.pos().y, 100.0 + 0.5 * 9.8));
        obj.update(0.1);
        assert!(approx_eq(obj.pos().y, 100.0 + 0.5 * 9.8 * 4.0));
    }

    #[test]
    fn test_no_fall_without_simulation() {
        let mut obj = GameObject::new("rock");
        obj.set_pos(0.0, 100.0);
        obj.start_fall();
        obj.update(0.5);
        assert_eq!(obj.pos().y, 100.0);
    }

    #[test]
    fn test_jump_refused_while_jumping() {
        let mut obj = GameObject::new("hero");
        obj.set_physics_simulate(true);
        obj.set_jump_velocity(20.0);
        assert!(obj.jump());
        obj.update(0.05);
        assert!(obj.pos().y < 0.0);
        assert!(!obj.jump());
    }

    // ==================== Movement ====================

    #[test]
    fn test_move_accumulates_velocity_until_render() {
        let res = resources();
        let mut obj = GameObject::new("a");
        obj.set_time_scale(0.5);
        obj.move_by(Vector2::new(1.0, 0.0), 0.1);
        obj.move_with_speed(Vector2::new(0.0, 1.0), 100.0, 0.1);
        assert!(approx_eq(obj.pos().x, 10.0));
        assert!(approx_eq(obj.pos().y, 5.0));
        assert!(approx_eq(obj.velocity().x, 10.0));

        let mut surface = RecordingSurface::new();
        obj.prev_render(&SceneCamera::new(100.0, 100.0));
        obj.render(&mut surface, &res);
        assert_eq!(obj.prev_pos(), obj.pos());
        assert_eq!(obj.velocity(), Vector2::zero());
    }

    #[test]
    fn test_prev_pos_sentinel_before_first_render() {
        let obj = GameObject::new("a");
        assert_eq!(obj.prev_pos().y, -1.0);
    }

    // ==================== Culling ====================

    fn culled_at(x: f32, y: f32) -> bool {
        let mut obj = GameObject::new("box");
        obj.set_size(10.0, 10.0);
        obj.set_pos(x, y);
        obj.prev_render(&SceneCamera::new(100.0, 100.0));
        obj.is_camera_culled()
    }

    #[test]
    fn test_cull_edges_are_exact() {
        assert!(culled_at(-10.0, 50.0));
        assert!(!culled_at(-9.5, 50.0));
        assert!(culled_at(100.0, 50.0));
        assert!(!culled_at(99.5, 50.0));
        assert!(culled_at(50.0, -10.0));
        assert!(!culled_at(50.0, -9.5));
        assert!(culled_at(50.0, 100.0));
        assert!(!culled_at(50.0, 99.5));
    }

    #[test]
    fn test_cull_uses_camera_position() {
        let mut obj = GameObject::new("box");
        obj.set_size(10.0, 10.0);
        obj.set_pos(500.0, 10.0);
        let mut camera = SceneCamera::new(100.0, 100.0);
        obj.prev_render(&camera);
        assert!(obj.is_camera_culled());
        camera.pos = Vector2::new(450.0, 0.0);
        obj.prev_render(&camera);
        assert!(!obj.is_camera_culled());
        assert_eq!(obj.render_pos(), Vector2::new(50.0, 10.0));
    }

    #[test]
    fn test_culled_object_skips_sprite_only() {
        let res = resources();
        let mut obj = GameObject::new("far");
        obj.set_texture(&res, "sheet");
        obj.add_collider(boxed("body", 4.0, 4.0));
        obj.set_pos(1000.0, 1000.0);
        obj.update(0.0);
        obj.prev_render(&SceneCamera::new(100.0, 100.0));

        let mut surface = RecordingSurface::new();
        obj.render(&mut surface, &res);
        assert!(texture_draws(&surface).is_empty());
        assert_eq!(surface.commands.len(), 1);
        assert_eq!(obj.prev_pos(), obj.pos());
    }

    // ==================== Rendering ====================

    #[test]
    fn test_static_texture_sets_size_and_draws_from_image_start() {
        let res = resources();
        let mut obj = GameObject::new("sign");
        obj.set_texture(&res, "sheet");
        assert_eq!(obj.size(), Vector2::new(64.0, 32.0));
        obj.set_image_start(4.0, 2.0);
        obj.set_pos(10.0, 10.0);
        obj.prev_render(&SceneCamera::new(200.0, 200.0));

        let mut surface = RecordingSurface::new();
        obj.render(&mut surface, &res);
        assert_eq!(
            texture_draws(&surface),
            vec![DrawCommand::Texture {
                name: "sheet".into(),
                frame: 0,
                dest: Vector2::new(10.0, 10.0),
                src: Vector2::new(4.0, 2.0),
                size: Vector2::new(64.0, 32.0),
            }]
        );
    }

    #[test]
    fn test_missing_texture_keeps_size() {
        let res = resources();
        let mut obj = GameObject::new("sign");
        obj.set_size(5.0, 6.0);
        obj.set_texture(&res, "nope");
        assert_eq!(obj.size(), Vector2::new(5.0, 6.0));
        assert!(obj.texture_key().is_none());
    }

    #[test]
    fn test_animation_takes_precedence_over_texture() {
        let res = resources();
        let mut obj = GameObject::new("hero");
        obj.set_texture(&res, "sheet");
        obj.add_animation(&res, "walk", true, None, 1.0, false);
        obj.set_pivot(0.5, 1.0);
        obj.set_pos(50.0, 50.0);
        obj.update(0.15);
        obj.post_update(0.15);
        assert_eq!(obj.size(), Vector2::new(16.0, 30.0));

        obj.prev_render(&SceneCamera::new(100.0, 100.0));
        let mut surface = RecordingSurface::new();
        obj.render(&mut surface, &res);
        assert_eq!(
            texture_draws(&surface),
            vec![DrawCommand::Texture {
                name: "sheet".into(),
                frame: 0,
                dest: Vector2::new(42.0, 20.0),
                src: Vector2::new(16.0, 0.0),
                size: Vector2::new(16.0, 30.0),
            }]
        );
    }

    #[test]
    fn test_sequential_texture_picks_image_by_frame() {
        let res = resources();
        let mut obj = GameObject::new("runner");
        obj.add_animation(&res, "run", true, None, 1.0, false);
        obj.update(0.25);
        obj.prev_render(&SceneCamera::new(100.0, 100.0));
        let mut surface = RecordingSurface::new();
        obj.render(&mut surface, &res);
        match &texture_draws(&surface)[0] {
            DrawCommand::Texture { name, frame, .. } => {
                assert_eq!(name, "run");
                assert_eq!(*frame, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_get_bottom_follows_frame_size() {
        let res = resources();
        let mut obj = GameObject::new("hero");
        obj.set_size(10.0, 10.0);
        obj.set_pivot(0.5, 0.5);
        obj.set_offset(0.0, 2.0);
        obj.set_pos(0.0, 100.0);
        assert!(approx_eq(obj.get_bottom(), 107.0));
        obj.add_animation(&res, "walk", true, None, 1.0, false);
        assert!(approx_eq(obj.get_bottom(), 118.0));
    }

    // ==================== Colliders ====================

    #[test]
    fn test_same_named_colliders_get_distinct_keys() {
        let mut obj = GameObject::new("a");
        obj.add_collider(boxed("hit", 1.0, 1.0));
        obj.add_collider(boxed("hit", 2.0, 2.0));

        let first = obj.colliders()[0].key().unwrap();
        let second = obj.colliders()[1].key().unwrap();
        assert_eq!(first.name, second.name);
        assert_ne!(first, second);

        obj.update(0.0);
        let (min, max) = obj.collider_by_key_mut(&second).unwrap().bounds();
        assert!(approx_eq(max.x - min.x, 2.0));

        let copy = obj.clone();
        assert_eq!(copy.colliders()[1].slot(), second.slot);
        assert!(obj.collider_by_key_mut(&copy.colliders()[1].key().unwrap()).is_none());
    }

    #[test]
    fn test_find_collider_first_exact_match() {
        let mut obj = GameObject::new("a");
        obj.add_collider(boxed("hit", 1.0, 1.0));
        obj.add_collider(boxed("hit", 2.0, 2.0));
        obj.add_collider(boxed("feet", 3.0, 3.0));
        obj.update(0.0);

        let found = obj.find_collider("hit").unwrap();
        let (min, max) = found.bounds();
        assert!(approx_eq(max.x - min.x, 1.0));
        assert!(obj.find_collider("Hit").is_none());
        assert!(obj.find_collider("").is_none());
    }

    #[test]
    fn test_inactive_colliders_are_pruned_in_order() {
        let mut obj = GameObject::new("a");
        obj.add_collider(boxed("one", 1.0, 1.0));
        obj.add_collider(boxed("two", 1.0, 1.0));
        obj.add_collider(boxed("three", 1.0, 1.0));
        obj.find_collider_mut("two").unwrap().destroy();
        obj.update(0.0);
        let names: Vec<_> = obj.colliders().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["one", "three"]);
    }

    #[test]
    fn test_disabled_collider_is_kept_but_not_updated() {
        let mut obj = GameObject::new("a");
        obj.add_collider(boxed("body", 2.0, 2.0));
        obj.find_collider_mut("body").unwrap().set_enable(false);
        obj.set_pos(50.0, 50.0);
        obj.update(0.0);
        let (min, _) = obj.find_collider("body").unwrap().bounds();
        assert_eq!(min, Vector2::zero());
    }

    #[test]
    fn test_collision_registers_every_collider() {
        let mut obj = GameObject::new("a");
        obj.add_collider(boxed("one", 1.0, 1.0));
        obj.add_collider(boxed("two", 1.0, 1.0));
        let mut sink = SceneCollision::new();
        obj.collision(&mut sink, 0.0);
        assert_eq!(sink.registered().len(), 2);
        assert!(sink.registered().iter().all(|e| e.key.owner == obj.id()));
    }

    // ==================== Clone ====================

    #[test]
    fn test_clone_reparents_and_resets_start() {
        let res = resources();
        let scene = SceneId::next();
        let mut src = GameObject::new("orig");
        src.set_scene(scene);
        src.add_animation(&res, "walk", true, None, 1.0, false);
        src.add_collider(boxed("body", 4.0, 4.0));
        src.add_collider(boxed("feet", 2.0, 2.0));
        src.set_life_time(3.0);
        src.update(0.0);
        src.find_collider_mut("body")
            .unwrap()
            .add_collision(crate::components::collider::ColliderKey::new(ObjectId::next(), "x"));

        let copy = src.clone();
        assert_ne!(copy.id(), src.id());
        assert!(!copy.is_started());
        assert_eq!(copy.life_time(), src.life_time());
        assert_eq!(copy.scene(), Some(scene));
        assert_eq!(copy.colliders().len(), 2);
        for collider in copy.colliders() {
            assert_eq!(collider.owner(), Some(copy.id()));
            assert_eq!(collider.scene(), Some(scene));
            assert!(collider.collision_list().is_empty());
        }
        assert_eq!(copy.animation().unwrap().owner(), Some(copy.id()));
        assert_eq!(src.find_collider("body").unwrap().collision_list().len(), 1);
    }

    #[test]
    fn test_clone_parts_are_independent() {
        let mut src = GameObject::new("orig");
        src.add_collider(boxed("body", 4.0, 4.0));
        let mut copy = src.clone();
        copy.find_collider_mut("body").unwrap().destroy();
        copy.update(0.0);
        assert!(copy.colliders().is_empty());
        assert_eq!(src.colliders().len(), 1);
    }

    #[test]
    fn test_set_scene_propagates() {
        let mut obj = GameObject::new("a");
        obj.add_collider(boxed("body", 1.0, 1.0));
        obj.create_animation();
        let scene = SceneId::next();
        obj.set_scene(scene);
        assert_eq!(obj.colliders()[0].scene(), Some(scene));
        assert_eq!(obj.animation().unwrap().scene(), Some(scene));
    }

    // ==================== Gameplay ====================

    #[test]
    fn test_set_damage_respects_enable() {
        let mut obj = GameObject::new("a");
        for d in [7.5, 0.0, -3.0] {
            assert_eq!(obj.set_damage(d), d);
        }
        obj.set_damage_enable(false);
        for d in [7.5, 0.0, -3.0] {
            assert_eq!(obj.set_damage(d), 0.0);
        }
    }

    #[test]
    fn test_animation_calls_without_animation_are_noops() {
        let mut obj = GameObject::new("a");
        obj.set_current_animation("walk");
        obj.change_animation("walk");
        obj.set_animation_loop("walk", false);
        obj.set_animation_reverse("walk", true);
        obj.set_animation_play_time("walk", 1.0);
        obj.set_animation_play_scale("walk", 2.0);
        assert!(!obj.check_current_animation("walk"));
        assert!(obj.animation().is_none());
        assert!(obj.drain_animation_events().is_empty());
    }

    #[test]
    fn test_change_animation_switches_clip() {
        let res = resources();
        let mut obj = GameObject::new("a");
        obj.add_animation(&res, "walk", true, None, 1.0, false);
        obj.add_animation(&res, "run", true, None, 1.0, false);
        assert!(obj.check_current_animation("walk"));
        obj.change_animation("run");
        assert!(obj.check_current_animation("run"));
        assert!(!obj.check_current_animation("walk"));
    }
}
