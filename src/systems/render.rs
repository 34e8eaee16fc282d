//! Render pass.
//!
//! Runs after the frame schedule. Objects are drawn bottom-last (sorted by
//! [`GameObject::get_bottom`](crate::components::gameobject::GameObject::get_bottom))
//! so sprites lower on screen overlap the ones behind them.

use bevy_ecs::prelude::*;

use crate::objects::ObjectSlot;
use crate::resources::rendertarget::Surface;
use crate::resources::sceneresource::SceneResource;

pub fn render_pass(world: &mut World, surface: &mut dyn Surface) {
    world.resource_scope(|world, resources: Mut<SceneResource>| {
        let mut query = world.query::<&mut ObjectSlot>();
        let mut slots: Vec<Mut<ObjectSlot>> = query
            .iter_mut(world)
            .filter(|slot| slot.object().base().is_active())
            .collect();

        slots.sort_by(|a, b| {
            let a = a.object().base().get_bottom();
            let b = b.object().base().get_bottom();
            a.total_cmp(&b)
        });

        for mut slot in slots {
            slot.object_mut().render(surface, &resources);
        }
    });
}
