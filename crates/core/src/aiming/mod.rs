//! Aiming: solving modes, dispatch policy and the cannon controller

mod cannon;
mod config;
mod policy;
mod request;

pub use cannon::{Cannon, MountPose, Shot};
pub use config::AimConfig;
pub use policy::{solve, yaw_toward, BarrelState, LaunchSolution};
pub use request::{AimConstraint, AimRequest, SolveMode};
