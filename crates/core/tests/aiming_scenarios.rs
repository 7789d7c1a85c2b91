//! End-to-end aiming scenarios: mode dispatch, drawn arcs and fired shots
//!
//! Set `RUST_LOG=cannon_aim_core=debug` to see fallback decisions.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use cannon_aim_core::trajectory::sample;
use cannon_aim_core::{
    solve, AimConfig, AimConstraint, AimRequest, Ballistics, BarrelState, Cannon, MountPose,
    SampleCountPolicy, SolveFailure, Vec3,
};
use rayon::prelude::*;

#[ctor::ctor]
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn level_request(x: f64, constraint: AimConstraint) -> AimRequest {
    AimRequest::new(Vec3::zeros(), Vec3::new(0.0, 0.0, x), constraint)
}

#[test]
fn test_fixed_all_is_exact_with_preview_override() {
    let ballistics = Ballistics::default();
    let solution = solve(
        &level_request(10.0, AimConstraint::fixed_all(-45.0, 5.0).unwrap()),
        &ballistics,
        &AimConfig::default(),
        BarrelState::new(-10.0, 1.0),
    );

    assert_eq!(solution.pitch_deg, -45.0);
    assert_eq!(solution.speed, 5.0);
    assert_eq!(
        solution.horizontal_distance_override,
        Some(ballistics.displacement_at_time(45.0, 5.0, 2.0).0)
    );
}

#[test]
fn test_fixed_pitch_speed_under_custom_gravity() {
    let solution = solve(
        &level_request(10.0, AimConstraint::fixed_pitch(-45.0).unwrap()),
        &Ballistics::new(10.0),
        &AimConfig::default(),
        BarrelState::default(),
    );

    assert_abs_diff_eq!(solution.speed, 10.0, epsilon = 1e-6);
    assert_eq!(solution.pitch_deg, -45.0);
}

#[test]
fn test_fixed_speed_out_of_range_keeps_pitch_at_fixed_speed() {
    let previous = BarrelState::new(-35.0, 6.0);
    let solution = solve(
        &level_request(100.0, AimConstraint::fixed_speed(1.0, true).unwrap()),
        &Ballistics::new(10.0),
        &AimConfig::default(),
        previous,
    );

    assert_eq!(solution.pitch_deg, previous.pitch_deg);
    assert_eq!(solution.speed, 1.0);
    assert_eq!(solution.failure, Some(SolveFailure::UnreachableAtFixedSpeed));
    assert_eq!(
        solution.horizontal_distance_override,
        Some(Ballistics::new(10.0).displacement_at_time(35.0, 1.0, 2.0).0)
    );
}

#[test]
fn test_sample_counts() {
    let ballistics = Ballistics::new(10.0);
    let start = Vec3::zeros();
    let target = Vec3::new(0.0, 0.0, 10.0);

    let fixed = sample(
        &ballistics,
        start,
        target,
        45.0,
        10.0,
        None,
        SampleCountPolicy::fixed(20).unwrap(),
    );
    assert_eq!(fixed.len(), 20);

    let adaptive = sample(
        &ballistics,
        start,
        target,
        45.0,
        10.0,
        None,
        SampleCountPolicy::Adaptive,
    );
    assert_eq!(adaptive.len(), 30);
}

#[test]
fn test_sample_heading_follows_velocity() {
    let ballistics = Ballistics::default();
    let (angle, speed) = (40.0_f64, 12.0);
    let trajectory = sample(
        &ballistics,
        Vec3::new(1.0, 0.5, -2.0),
        Vec3::new(7.0, 0.0, 6.0),
        angle,
        speed,
        None,
        SampleCountPolicy::Adaptive,
    );

    let theta = angle.to_radians();
    for s in &trajectory {
        let vx = speed * theta.cos();
        let vy = speed * theta.sin() - ballistics.gravity() * s.t;
        let velocity = s.forward * vx + Vec3::y() * vy;
        assert_relative_eq!(s.heading(), velocity.normalize(), epsilon = 1e-9);
    }

    let times: Vec<f64> = trajectory.iter().map(|s| s.t).collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_every_mode_lands_or_previews_from_cannon() {
    let pose = MountPose::at(Vec3::new(0.0, 1.0, 0.0));
    let target = Vec3::new(-3.0, 0.0, 6.0);
    let constraints = [
        AimConstraint::fixed_pitch(-50.0).unwrap(),
        AimConstraint::fixed_speed(12.0, true).unwrap(),
        AimConstraint::fixed_speed(12.0, false).unwrap(),
        AimConstraint::Unfixed,
    ];

    for constraint in constraints {
        let mut cannon = Cannon::new(constraint, AimConfig::default()).unwrap();
        let solution = cannon.aim(target, &pose, &9.81);
        assert!(solution.is_solved(), "{constraint:?} failed: {solution:?}");

        let last = cannon.trajectory().last().unwrap();
        assert_relative_eq!(last.position, target, epsilon = 1e-6);
    }

    // Fixed-all draws a preview arc of the configured duration instead
    let mut cannon = Cannon::new(
        AimConstraint::fixed_all(-30.0, 5.0).unwrap(),
        AimConfig::default(),
    )
    .unwrap();
    cannon.aim(target, &pose, &9.81);
    let last = cannon.trajectory().last().unwrap();
    assert_relative_eq!(last.t, 2.0, epsilon = 1e-9);
}

#[test]
fn test_fired_shot_passes_through_target() {
    let ballistics = Ballistics::new(9.81);
    // Engine-style gravity vector; only its vertical magnitude is used
    let gravity = Vec3::new(0.0, -9.81, 0.0);
    let pose = MountPose::at(Vec3::new(2.0, 3.0, -1.0));
    let target = Vec3::new(-4.0, 1.5, 7.0);

    let mut cannon = Cannon::new(AimConstraint::Unfixed, AimConfig::default()).unwrap();
    let shot = cannon.fire(Some(target), &pose, &gravity);

    let solution = cannon.last_solution().copied().unwrap();
    let x = (target - pose.fire_point).xz().norm();
    let t = ballistics.total_time(x, solution.elevation_deg(), solution.speed);
    assert_relative_eq!(shot.position_at(&ballistics, t), target, epsilon = 1e-9);
}

#[test]
fn test_parallel_solving_matches_sequential() {
    let ballistics = Ballistics::default();
    let config = AimConfig::default();
    let requests: Vec<AimRequest> = (0..512)
        .map(|i| {
            let i = f64::from(i);
            let target = Vec3::new((i * 0.37).sin() * 15.0, (i * 0.11).cos() * 3.0, i * 0.05 + 1.0);
            let constraint = match (i as usize) % 4 {
                0 => AimConstraint::Unfixed,
                1 => AimConstraint::FixedPitch { pitch_deg: -40.0 },
                2 => AimConstraint::FixedSpeed {
                    speed: 14.0,
                    prefer_small_angle: true,
                },
                _ => AimConstraint::FixedAll {
                    pitch_deg: -20.0,
                    speed: 8.0,
                },
            };
            AimRequest::new(Vec3::zeros(), target, constraint)
        })
        .collect();

    let previous = BarrelState::new(-15.0, 5.0);
    let sequential: Vec<_> = requests
        .iter()
        .map(|r| solve(r, &ballistics, &config, previous))
        .collect();
    let parallel: Vec<_> = requests
        .par_iter()
        .map(|r| solve(r, &ballistics, &config, previous))
        .collect();

    assert_eq!(sequential, parallel);
}
