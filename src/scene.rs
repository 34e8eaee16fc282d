//! Scene: a bevy `World` holding objects and resources, plus the frame
//! schedule that drives them.
//!
//! # Frame
//!
//! [`Scene::update`] advances [`WorldTime`] and runs one chained schedule:
//!
//! 1. `update_collision_messages` – age the collision message queue
//! 2. `update_objects` – Update on every active object
//! 3. `despawn_destroyed` – remove objects destroyed so far
//! 4. `register_colliders` – Collision: colliders go into [`SceneCollision`]
//! 5. `resolve_collisions` – AABB pass, begin/end messages
//! 6. `dispatch_collisions` – collision lists and begin/end hooks
//! 7. `post_update_objects` – PostUpdate
//! 8. `follow_camera` – camera final for the frame
//! 9. `prev_render_objects` – PrevRender
//!
//! [`Scene::render`] then draws every active object onto a [`Surface`].

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::identity::{ObjectId, SceneId};
use crate::events::collision::CollisionMessage;
use crate::objects::{ObjectSlot, SceneObject};
use crate::resources::camera::SceneCamera;
use crate::resources::rendertarget::Surface;
use crate::resources::scenecollision::SceneCollision;
use crate::resources::sceneresource::SceneResource;
use crate::resources::worldtime::WorldTime;
use crate::systems::camera::follow_camera;
use crate::systems::collision::{dispatch_collisions, resolve_collisions};
use crate::systems::objects::{
    despawn_destroyed, post_update_objects, prev_render_objects, register_colliders,
    update_objects,
};
use crate::systems::render::render_pass;
use crate::systems::time::{update_collision_messages, update_world_time};

pub struct Scene {
    id: SceneId,
    world: World,
    frame: Schedule,
}

impl Scene {
    pub fn new(camera: SceneCamera) -> Self {
        let id = SceneId::next();

        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(SceneResource::new());
        world.insert_resource(SceneCollision::new());
        world.insert_resource(camera);
        world.init_resource::<Messages<CollisionMessage>>();

        let mut frame = Schedule::default();
        frame.add_systems(
            (
                update_collision_messages,
                update_objects,
                despawn_destroyed,
                register_colliders,
                resolve_collisions,
                dispatch_collisions,
                post_update_objects,
                follow_camera,
                prev_render_objects,
            )
                .chain(),
        );

        info!("Scene {:?} created", id);
        Self { id, world, frame }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Attach `object` to this scene, run its `init` and spawn it. Returns
    /// `None` when `init` refuses.
    pub fn spawn(&mut self, object: impl SceneObject + 'static) -> Option<Entity> {
        self.spawn_boxed(Box::new(object))
    }

    pub fn spawn_boxed(&mut self, mut object: Box<dyn SceneObject>) -> Option<Entity> {
        object.base_mut().set_scene(self.id);
        if !object.init() {
            warn!("'{}' failed to initialize", object.base().name());
            return None;
        }
        Some(self.world.spawn(ObjectSlot(object)).id())
    }

    /// Spawn a copy of an existing object.
    pub fn clone_object(&mut self, entity: Entity) -> Option<Entity> {
        let copy = self.object(entity)?.clone_object();
        self.spawn_boxed(copy)
    }

    pub fn object(&self, entity: Entity) -> Option<&dyn SceneObject> {
        self.world
            .get::<ObjectSlot>(entity)
            .map(|slot| slot.object())
    }

    pub fn object_mut(&mut self, entity: Entity) -> Option<&mut dyn SceneObject> {
        self.world
            .get_mut::<ObjectSlot>(entity)
            .map(|slot| slot.into_inner().object_mut())
    }

    /// First object named `name`.
    pub fn find_object(&mut self, name: &str) -> Option<Entity> {
        let mut query = self.world.query::<(Entity, &ObjectSlot)>();
        query
            .iter(&self.world)
            .find(|(_, slot)| slot.object().base().name() == name)
            .map(|(entity, _)| entity)
    }

    pub fn find_by_id(&mut self, id: ObjectId) -> Option<Entity> {
        let mut query = self.world.query::<(Entity, &ObjectSlot)>();
        query
            .iter(&self.world)
            .find(|(_, slot)| slot.object().base().id() == id)
            .map(|(entity, _)| entity)
    }

    pub fn object_count(&mut self) -> usize {
        let mut query = self.world.query::<&ObjectSlot>();
        query.iter(&self.world).count()
    }

    pub fn resources(&self) -> &SceneResource {
        self.world.resource::<SceneResource>()
    }

    pub fn resources_mut(&mut self) -> Mut<'_, SceneResource> {
        self.world.resource_mut::<SceneResource>()
    }

    pub fn camera(&self) -> &SceneCamera {
        self.world.resource::<SceneCamera>()
    }

    pub fn camera_mut(&mut self) -> Mut<'_, SceneCamera> {
        self.world.resource_mut::<SceneCamera>()
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Run one frame with the raw delta `dt` in seconds.
    pub fn update(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.frame.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn render(&mut self, surface: &mut dyn Surface) {
        render_pass(&mut self.world, surface);
    }
}
