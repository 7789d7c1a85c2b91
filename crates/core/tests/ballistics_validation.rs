//! Closed-form ballistics laws checked over seeded random launches
//!
//! Each test draws launches from a fixed seed so failures reproduce exactly.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use cannon_aim_core::geometry::signed_angle_deg;
use cannon_aim_core::{Ballistics, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CASES: usize = 200;

/// Random launch that stays clear of vertical and of t = 0
fn random_launch(rng: &mut StdRng) -> (f64, f64, f64) {
    let angle = rng.random_range(5.0..80.0);
    let speed = rng.random_range(1.0..40.0);
    let t = rng.random_range(0.05..3.0);
    (angle, speed, t)
}

#[test]
fn test_speed_from_angle_round_trip() {
    let ballistics = Ballistics::default();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..CASES {
        let (angle, speed, t) = random_launch(&mut rng);
        let (x, y) = ballistics.displacement_at_time(angle, speed, t);

        let solved = ballistics.speed_from_angle(x, y, angle);
        assert_relative_eq!(solved, speed, max_relative = 1e-6);

        // And the arc at that speed reaches (x, y) at the total time
        let total = ballistics.total_time(x, angle, solved);
        let (rx, ry) = ballistics.displacement_at_time(angle, solved, total);
        assert_relative_eq!(rx, x, epsilon = 1e-6, max_relative = 1e-6);
        assert_relative_eq!(ry, y, epsilon = 1e-6, max_relative = 1e-6);
    }
}

#[test]
fn test_both_speed_roots_round_trip() {
    let ballistics = Ballistics::new(10.0);
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..CASES {
        let (angle, speed, t) = random_launch(&mut rng);
        let (x, y) = ballistics.displacement_at_time(angle, speed, t);

        let arcs = ballistics.angle_from_speed(x, y, speed);
        assert!(arcs.is_valid(), "point on the arc must be reachable");

        // The sampled launch angle is one of the two roots
        let nearest = (arcs.low() - angle).abs().min((arcs.high() - angle).abs());
        assert!(nearest < 1e-4, "angle {angle} not in {arcs:?}");

        // Each root needs exactly this speed to reach the point
        for root in [arcs.low(), arcs.high()] {
            let solved = ballistics.speed_from_angle(x, y, root);
            assert_relative_eq!(solved, speed, max_relative = 1e-5);
        }
    }
}

#[test]
fn test_apex_solution_passes_target_and_peaks_at_height() {
    let ballistics = Ballistics::default();
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..CASES {
        let x = rng.random_range(0.5..30.0);
        let y = rng.random_range(-5.0..5.0);
        let h = f64::max(y, 0.0) + rng.random_range(0.1..10.0);

        let solution = ballistics.solve_from_max_height(x, y, h);
        let (rx, ry) = ballistics.displacement_at_time(solution.angle, solution.speed, solution.time);
        assert_relative_eq!(rx, x, epsilon = 1e-9, max_relative = 1e-9);
        assert_relative_eq!(ry, y, epsilon = 1e-9, max_relative = 1e-9);

        let rise = solution.speed * solution.angle.to_radians().sin();
        let apex = rise * rise / (2.0 * ballistics.gravity());
        assert_relative_eq!(apex, h, max_relative = 1e-9);

        // Flight path is level at the apex
        let apex_time = rise / ballistics.gravity();
        assert_abs_diff_eq!(
            ballistics.angle_at_time(solution.angle, solution.speed, apex_time),
            0.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_unreachable_targets_are_nan() {
    let ballistics = Ballistics::new(10.0);

    // Above the line of fire
    assert!(ballistics.speed_from_angle(1.0, 2.0, 30.0).is_nan());

    // Beyond maximum range at this speed
    let arcs = ballistics.angle_from_speed(100.0, 0.0, 1.0);
    assert!(!arcs.is_valid());
    assert!(arcs.angle1.is_nan() && arcs.angle2.is_nan());

    // Apex below the target
    let apex = ballistics.solve_from_max_height(5.0, 3.0, 2.0);
    assert!(apex.angle.is_nan() && apex.speed.is_nan() && apex.time.is_nan());
}

#[test]
fn test_signed_angle_laws() {
    let mut rng = StdRng::seed_from_u64(31);
    let up = Vec3::y();

    for _ in 0..CASES {
        let a = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let b = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        if a.xz().norm() < 1e-3 || b.xz().norm() < 1e-3 {
            continue;
        }

        assert_eq!(signed_angle_deg(a, a, up), 0.0);
        assert_eq!(signed_angle_deg(a, -a, up), 180.0);

        let forward = signed_angle_deg(a, b, up);
        let backward = signed_angle_deg(b, a, up);
        assert!(forward.abs() <= 180.0);
        // Antisymmetric except at exactly 180°, which is unreachable here
        assert_abs_diff_eq!(forward, -backward, epsilon = 1e-9);
    }
}
