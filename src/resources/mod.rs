//! ECS resources shared by a scene's objects and systems.
//!
//! Overview
//! - `animationstore` – immutable animation sequences shared between objects
//! - `camera` – scene camera with optional follow target
//! - `gameconfig` – settings loaded from an INI file
//! - `rendertarget` – the drawing surface abstraction and its raylib backend
//! - `scenecollision` – per-frame collider registration and AABB resolution
//! - `sceneresource` – textures, sequences and asset paths of a scene
//! - `texturestore` – texture metadata keyed by name
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod camera;
pub mod gameconfig;
pub mod rendertarget;
pub mod scenecollision;
pub mod sceneresource;
pub mod texturestore;
pub mod worldtime;
