//! Cannon Aiming Core Library
//!
//! Closed-form drag-free ballistics for a cannon-aiming demo: solving launch
//! angle and speed to hit a target under one of four constraint modes, and
//! sampling the resulting arc into time-stamped poses for visualization.
//!
//! ## Layers
//!
//! - [`physics`]: stateless projectile formulas ([`Ballistics`])
//! - [`geometry`]: plane projection and signed angles
//! - [`trajectory`]: arc sampling ([`TrajectorySampler`])
//! - [`aiming`]: mode dispatch ([`solve`]) and the stateful [`Cannon`]
//!
//! Unreachable targets are not errors. The solvers return `NaN` and the
//! aiming layer keeps the previous barrel state, reporting why in
//! [`LaunchSolution::failure`]. [`AimError`] is reserved for inputs that are
//! never valid.
//!
//! ```
//! use cannon_aim_core::{AimConfig, AimConstraint, Cannon, MountPose, Vec3};
//!
//! let mut cannon = Cannon::new(AimConstraint::Unfixed, AimConfig::default()).unwrap();
//! let pose = MountPose::at(Vec3::zeros());
//! let solution = cannon.aim(Vec3::new(0.0, 0.0, 8.0), &pose, &9.81);
//!
//! assert!(solution.is_solved());
//! assert!(!cannon.trajectory().is_empty());
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod geometry;

pub mod aiming;
pub mod physics;
pub mod trajectory;

// Re-export core types
pub use core_types::{world_up, GravitySource, Vec3, STANDARD_GRAVITY};
pub use error::{AimError, AimErrorCode};

pub use physics::{ApexSolution, ArcAngles, Ballistics, SolveFailure};
pub use trajectory::{SampleCountPolicy, Trajectory, TrajectorySample, TrajectorySampler};

pub use aiming::{
    solve, yaw_toward, AimConfig, AimConstraint, AimRequest, BarrelState, Cannon, LaunchSolution,
    MountPose, Shot, SolveMode,
};
