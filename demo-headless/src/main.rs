use cannon_aim_core::{
    AimConfig, AimConstraint, AimError, Ballistics, Cannon, MountPose, SampleCountPolicy, Vec3,
};
use clap::Parser;

/// Cannon aiming demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "cannon-aim-demo")]
#[command(about = "Solve a cannon shot and print its sampled trajectory", long_about = None)]
struct Args {
    /// Launch point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true, default_value = "0,0,0")]
    launch: Vec3,

    /// Target point as x,y,z
    #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true, default_value = "0,-2,2")]
    target: Vec3,

    /// Solving mode (fixed-all, fixed-pitch, fixed-speed, unfixed)
    #[arg(short, long, default_value = "fixed-pitch")]
    mode: String,

    /// Barrel pitch in degrees, negative = up (fixed-all, fixed-pitch)
    #[arg(short, long, default_value_t = -45.0, allow_negative_numbers = true)]
    pitch: f64,

    /// Launch speed (fixed-all, fixed-speed)
    #[arg(short, long, default_value_t = 5.0)]
    speed: f64,

    /// Take the high arc in fixed-speed mode
    #[arg(long)]
    high_arc: bool,

    /// Gravity magnitude
    #[arg(short, long, default_value_t = 9.81)]
    gravity: f64,

    /// Fixed number of trajectory samples (0 = adaptive)
    #[arg(short = 'n', long, default_value_t = 0)]
    samples: u32,

    /// Preview arc duration in seconds
    #[arg(long, default_value_t = 2.0)]
    preview_time: f64,

    /// Fire a shot and report where it is at the arc's end time
    #[arg(short, long)]
    fire: bool,

    /// Run validation checks
    #[arg(short, long)]
    validate: bool,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }

    if args.validate {
        run_validation_tests();
    }
}

/// Parse an `x,y,z` point for clap
fn parse_point(s: &str) -> Result<Vec3, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("'{}': {}", c.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {} values", coords.len())),
    }
}

fn run(args: &Args) -> Result<(), AimError> {
    println!("=== Cannon Aim Demo ===\n");

    let constraint = match args.mode.to_lowercase().as_str() {
        "fixed-all" | "all" => AimConstraint::fixed_all(args.pitch, args.speed)?,
        "fixed-speed" | "speed" => AimConstraint::fixed_speed(args.speed, !args.high_arc)?,
        "unfixed" | "free" => AimConstraint::Unfixed,
        "fixed-pitch" | "pitch" => AimConstraint::fixed_pitch(args.pitch)?,
        other => {
            println!("Unknown mode '{}', using fixed-pitch", other);
            AimConstraint::fixed_pitch(args.pitch)?
        }
    };

    let sampling = if args.samples > 0 {
        SampleCountPolicy::fixed(args.samples)?
    } else {
        SampleCountPolicy::Adaptive
    };
    let config = AimConfig {
        preview_time: args.preview_time,
        ..AimConfig::default()
    }
    .with_sampling(sampling);

    let (launch, target) = (args.launch, args.target);
    let pose = MountPose::at(launch);
    let mut cannon = Cannon::new(constraint, config)?;

    println!("Mode: {}", constraint.mode());
    println!(
        "Launch: ({:.2}, {:.2}, {:.2})  Target: ({:.2}, {:.2}, {:.2})  g = {:.3}\n",
        launch.x, launch.y, launch.z, target.x, target.y, target.z, args.gravity
    );

    let solution = cannon.aim(target, &pose, &args.gravity);

    println!("Pitch: {:8.3}°  (elevation {:.3}°)", solution.pitch_deg, solution.elevation_deg());
    println!("Yaw:   {:8.3}°", cannon.yaw_deg());
    println!("Speed: {:8.3}", solution.speed);
    if let Some(distance) = solution.horizontal_distance_override {
        println!("Preview distance: {:.3}", distance);
    }
    if let Some(failure) = solution.failure {
        println!("Fallback: {}", failure);
    }

    println!("\n   #  |   t(s)  |    x     |    y     |    z     | pitch(°)");
    println!("------|---------|----------|----------|----------|---------");
    for (i, s) in cannon.trajectory().iter().enumerate() {
        println!(
            "{:5} | {:7.3} | {:8.3} | {:8.3} | {:8.3} | {:8.2}",
            i + 1,
            s.t,
            s.position.x,
            s.position.y,
            s.position.z,
            s.pitch_deg
        );
    }

    if args.fire {
        let shot = cannon.fire(None, &pose, &args.gravity);
        let ballistics = Ballistics::new(args.gravity);
        if let Some(last) = cannon.trajectory().last() {
            let landing = shot.position_at(&ballistics, last.t);
            println!(
                "\nShot at t = {:.3}s: ({:.3}, {:.3}, {:.3}), miss = {:.2e}",
                last.t,
                landing.x,
                landing.y,
                landing.z,
                (landing - last.position).norm()
            );
        }
    }

    println!("\n=== Done ===");
    Ok(())
}

fn run_validation_tests() {
    println!("\n=== Running Validation Tests ===\n");

    // Test 1: fixed pitch speed under g = 10
    println!("Test 1: Fixed Pitch Speed");
    let ballistics = Ballistics::new(10.0);
    let speed = ballistics.speed_from_angle(10.0, 0.0, 45.0);
    println!("  Speed for 45° over 10 units: {:.6}", speed);
    if (speed - 10.0).abs() < 1e-6 {
        println!("  ✓ PASS: Matches closed form");
    } else {
        println!("  ✗ FAIL: Expected 10.0");
    }

    // Test 2: out-of-range target keeps the pitch and the fixed speed
    println!("\nTest 2: Unreachable Fixed Speed");
    let pose = MountPose::at(Vec3::zeros());
    let kept = AimConstraint::fixed_speed(1.0, true).and_then(|constraint| {
        let mut cannon = Cannon::new(AimConstraint::Unfixed, AimConfig::default())?;
        cannon.aim(Vec3::new(0.0, 0.0, 3.0), &pose, &10.0);
        let before = cannon.barrel();
        cannon.set_constraint(constraint)?;
        cannon.aim(Vec3::new(0.0, 0.0, 100.0), &pose, &10.0);
        Ok(cannon.pitch_deg() == before.pitch_deg && cannon.speed() == 1.0)
    });
    match kept {
        Ok(true) => println!("  ✓ PASS: Previous pitch retained at the fixed speed"),
        Ok(false) => println!("  ✗ FAIL: Barrel changed"),
        Err(err) => println!("  ✗ FAIL: {err}"),
    }

    // Test 3: fired shot passes through the target
    println!("\nTest 3: Shot Hits Target");
    let target = Vec3::new(3.0, -1.0, 4.0);
    let hit = Cannon::new(AimConstraint::Unfixed, AimConfig::default()).map(|mut cannon| {
        let shot = cannon.fire(Some(target), &pose, &9.81);
        cannon
            .trajectory()
            .last()
            .map(|last| (shot.position_at(&Ballistics::default(), last.t) - target).norm())
    });
    match hit {
        Ok(Some(miss)) if miss < 1e-6 => println!("  ✓ PASS: Miss distance {:.2e}", miss),
        Ok(Some(miss)) => println!("  ✗ FAIL: Miss distance {:.3}", miss),
        Ok(None) => println!("  ✗ FAIL: No trajectory drawn"),
        Err(err) => println!("  ✗ FAIL: {err}"),
    }
}
