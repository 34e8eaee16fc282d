//! Stagecraft library.
//!
//! Game objects with animation, colliders and widgets, driven frame by frame
//! through a bevy_ecs schedule. The library is what the demo binary and the
//! integration tests build on.

pub mod components;
pub mod events;
pub mod objects;
pub mod resources;
pub mod scene;
pub mod systems;
