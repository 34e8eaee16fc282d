//! Message types exchanged between systems.
//!
//! Submodules:
//! - [`collision`] – collider pairs that started or stopped touching
pub mod collision;
