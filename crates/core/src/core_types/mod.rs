//! Core types and utilities

pub mod gravity;
pub mod vec3;

pub use gravity::{GravitySource, STANDARD_GRAVITY};
pub use vec3::{world_up, Vec3};
