//! Scene systems.
//!
//! Submodules overview
//! - [`camera`] – move the camera onto its follow target
//! - [`collision`] – resolve registered colliders and dispatch begin/end
//! - [`objects`] – one system per object lifecycle phase
//! - [`render`] – draw every active object onto a surface
//! - [`time`] – advance world time and message queues

pub mod camera;
pub mod collision;
pub mod objects;
pub mod render;
pub mod time;
