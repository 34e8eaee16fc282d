//! Parts a game object is made of.
//!
//! Submodules overview:
//! - [`animation`] – named clips over shared sequences and their playback
//! - [`boxcollider`] – axis-aligned rectangular collider
//! - [`collider`] – the collider capability and its collision bookkeeping
//! - [`gameobject`] – the base object and its per-frame lifecycle
//! - [`identity`] – name/active/enable plus object and scene handles
//! - [`kinematics`] – analytic fall and jump arc
//! - [`progressbar`] – bar widget drawn relative to its owner
//! - [`transform`] – position, pivot, size and per-frame velocity
//! - [`widget`] – the UI sub-object capability

pub mod animation;
pub mod boxcollider;
pub mod collider;
pub mod gameobject;
pub mod identity;
pub mod kinematics;
pub mod progressbar;
pub mod transform;
pub mod widget;
