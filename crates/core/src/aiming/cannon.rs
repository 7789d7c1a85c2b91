//! Stateful cannon mount
//!
//! [`Cannon`] owns everything that persists between aim updates: the active
//! constraint, the barrel pitch/yaw/speed left by the last solve, the current
//! target, and the drawn trajectory. Scene state (where the mount is and which
//! way it faces) is passed in per call as a [`MountPose`].

use nalgebra::{Unit, UnitQuaternion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::AimConfig;
use super::policy::{solve, yaw_toward, BarrelState, LaunchSolution};
use super::request::{AimConstraint, AimRequest};
use crate::core_types::{world_up, GravitySource, Vec3};
use crate::error::AimError;
use crate::geometry::project_on_plane;
use crate::physics::Ballistics;
use crate::trajectory::{SampleCountPolicy, Trajectory, TrajectorySample, TrajectorySampler};

/// Where the mount sits and which way it faces before any yaw is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountPose {
    /// Yaw pivot; the target direction is measured from here
    pub pivot: Vec3,
    /// Muzzle; shots and drawn arcs start here
    pub fire_point: Vec3,
    /// Mount's reference forward direction (zero yaw)
    pub forward: Vec3,
    /// Yaw axis of the turret. Elevation and gravity are always measured
    /// against [`world_up`], so a tilted axis only changes how yaw turns.
    pub up: Vec3,
}

impl MountPose {
    /// Level mount at `position` facing +Z, pivot and muzzle coincident
    pub fn at(position: Vec3) -> Self {
        Self {
            pivot: position,
            fire_point: position,
            forward: Vec3::z(),
            up: world_up(),
        }
    }

    /// Same pose with the muzzle moved to `fire_point`
    pub fn with_fire_point(mut self, fire_point: Vec3) -> Self {
        self.fire_point = fire_point;
        self
    }
}

/// A projectile launched by [`Cannon::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Launch position
    pub origin: Vec3,
    /// Launch velocity
    pub velocity: Vec3,
}

impl Shot {
    /// Drag-free position `t` seconds after launch, falling along [`world_up`]
    pub fn position_at(&self, ballistics: &Ballistics, t: f64) -> Vec3 {
        self.origin + self.velocity * t - world_up() * (0.5 * ballistics.gravity() * t * t)
    }
}

/// Aiming controller for one cannon.
///
/// Aiming never fails: whatever an unreachable target leaves unsolved stays where it was
/// (see [`solve`]). Inputs that could never be valid are rejected up front
/// with [`AimError`].
#[derive(Debug, Clone)]
pub struct Cannon {
    constraint: AimConstraint,
    config: AimConfig,
    barrel: BarrelState,
    yaw_deg: f64,
    target: Vec3,
    sampler: TrajectorySampler,
    last_solution: Option<LaunchSolution>,
}

impl Cannon {
    /// Target aimed at before the first explicit aim
    pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, -2.0, 2.0);

    /// Create a cannon with a level barrel and zero speed.
    ///
    /// # Errors
    ///
    /// Returns [`AimError`] if `constraint` carries an invalid pitch or speed,
    /// or if `config` fails [`AimConfig::validate`].
    pub fn new(constraint: AimConstraint, config: AimConfig) -> Result<Self, AimError> {
        constraint.validate()?;
        config.validate()?;

        info!(
            "Cannon created: mode={}, sampling={:?}, show_trajectory={}",
            constraint.mode(),
            config.sampling,
            config.show_trajectory
        );

        Ok(Self {
            constraint,
            config,
            barrel: BarrelState::default(),
            yaw_deg: 0.0,
            target: Self::DEFAULT_TARGET,
            sampler: TrajectorySampler::new(config.sampling),
            last_solution: None,
        })
    }

    /// Active constraint
    pub fn constraint(&self) -> AimConstraint {
        self.constraint
    }

    /// Switch solving mode. Takes effect on the next aim.
    ///
    /// # Errors
    ///
    /// Returns [`AimError`] if the constraint carries an invalid pitch or
    /// speed; the previous constraint is kept.
    pub fn set_constraint(&mut self, constraint: AimConstraint) -> Result<(), AimError> {
        constraint.validate()?;
        if constraint.mode() != self.constraint.mode() {
            info!("Aim mode changed: {} -> {}", self.constraint.mode(), constraint.mode());
        }
        self.constraint = constraint;
        Ok(())
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    /// Change the trajectory sample count policy
    pub fn set_sampling(&mut self, sampling: SampleCountPolicy) {
        self.config.sampling = sampling;
        self.sampler.set_policy(sampling);
    }

    /// Barrel pitch (degrees, positive = down)
    pub fn pitch_deg(&self) -> f64 {
        self.barrel.pitch_deg
    }

    /// Yaw relative to the mount's forward (degrees, counter-clockwise about up)
    pub fn yaw_deg(&self) -> f64 {
        self.yaw_deg
    }

    /// Launch speed
    pub fn speed(&self) -> f64 {
        self.barrel.speed
    }

    pub fn barrel(&self) -> BarrelState {
        self.barrel
    }

    /// Target of the most recent aim
    pub fn current_target(&self) -> Vec3 {
        self.target
    }

    /// Result of the most recent aim, if any
    pub fn last_solution(&self) -> Option<&LaunchSolution> {
        self.last_solution.as_ref()
    }

    /// Samples of the drawn trajectory; empty when hidden or never drawn
    pub fn trajectory(&self) -> &[TrajectorySample] {
        self.sampler.samples()
    }

    /// Owned copy of the drawn trajectory
    pub fn trajectory_snapshot(&self) -> Trajectory {
        self.sampler.to_trajectory()
    }

    /// Set barrel pitch and yaw directly
    pub fn rotate_to(&mut self, pitch_deg: f64, yaw_deg: f64) {
        self.barrel.pitch_deg = pitch_deg;
        self.yaw_deg = yaw_deg;
    }

    /// Aim at `target`: yaw toward it, solve pitch and speed for the active
    /// mode, and redraw the trajectory if it is shown.
    pub fn aim<G: GravitySource + ?Sized>(
        &mut self,
        target: Vec3,
        pose: &MountPose,
        gravity: &G,
    ) -> LaunchSolution {
        self.target = target;
        let ballistics = Ballistics::from_source(gravity);

        let yaw = yaw_toward(pose.pivot, target, pose.forward, pose.up);
        let yaw = if yaw.is_finite() {
            yaw
        } else {
            debug!("Target directly above or below pivot, keeping yaw={:.2}°", self.yaw_deg);
            self.yaw_deg
        };

        let request = AimRequest::new(pose.fire_point, target, self.constraint);
        let solution = solve(&request, &ballistics, &self.config, self.barrel);

        self.rotate_to(solution.pitch_deg, yaw);
        self.barrel.speed = solution.speed;

        if self.config.show_trajectory {
            let samples = self.sampler.draw(
                &ballistics,
                pose.fire_point,
                target,
                solution.elevation_deg(),
                solution.speed,
                solution.horizontal_distance_override,
            );
            if !samples.iter().all(TrajectorySample::is_finite) {
                debug!("Arc toward {:?} has no finite samples, not drawing it", target);
                self.sampler.clear();
            }
        }

        self.last_solution = Some(solution);
        solution
    }

    /// Launch a shot along the barrel at the current speed, aiming at
    /// `target` first when one is given.
    pub fn fire<G: GravitySource + ?Sized>(
        &mut self,
        target: Option<Vec3>,
        pose: &MountPose,
        gravity: &G,
    ) -> Shot {
        if let Some(target) = target {
            self.aim(target, pose, gravity);
        }

        let shot = Shot {
            origin: pose.fire_point,
            velocity: self.barrel_direction(pose) * self.barrel.speed,
        };
        debug!(
            "Fired: pitch={:.2}°, yaw={:.2}°, speed={:.3}",
            self.barrel.pitch_deg, self.yaw_deg, self.barrel.speed
        );
        shot
    }

    /// Unit vector the barrel points along.
    ///
    /// The mount's forward is flattened onto its own plane and turned by yaw
    /// about `pose.up`. The result is flattened onto the world ground plane
    /// and raised by the elevation `-pitch` toward [`world_up`], the axis
    /// gravity acts along in [`Shot::position_at`] and in the solver.
    pub fn barrel_direction(&self, pose: &MountPose) -> Vec3 {
        let axis = Unit::new_normalize(pose.up);
        let yaw = UnitQuaternion::from_axis_angle(&axis, self.yaw_deg.to_radians());
        let turned = yaw * project_on_plane(pose.forward, axis.into_inner());
        let heading = project_on_plane(turned, world_up()).normalize();

        let elevation = (-self.barrel.pitch_deg).to_radians();
        heading * elevation.cos() + world_up() * elevation.sin()
    }

    /// Show or hide the trajectory. Showing re-aims at the current target so
    /// the arc is up to date; hiding drops the samples.
    pub fn set_show_trajectory<G: GravitySource + ?Sized>(
        &mut self,
        show: bool,
        pose: &MountPose,
        gravity: &G,
    ) {
        self.config.show_trajectory = show;
        if show {
            self.aim(self.target, pose, gravity);
        } else {
            self.sampler.clear();
        }
        info!("Trajectory display {}", if show { "enabled" } else { "disabled" });
    }
}
