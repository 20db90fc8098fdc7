//! Aim Sandbox
//!
//! Run with: `cargo run --bin aim_sandbox -- --frames 180`
//!
//! Headless scripted session: the character runs toward a wall, aims down
//! sights, fires, jumps and fires again from the air. Each frame prints the
//! crosshair spread, FOV and any shot; `RUST_LOG=debug` shows the engine's
//! own logging.
//!
//! Script (frame numbers at 60 fps):
//! - 1..=45: run forward (W)
//! - 60: hip fire
//! - 75..=120: aim (right mouse), fire at 100
//! - 130: jump, fire at 140 while airborne
//! - 150: sweep the mouse right and fire past the wall

use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env};
use glam::Vec3;
use log::{LevelFilter, info};

use hipfire_engine::input::{KeyCode, MouseButton};
use hipfire_engine::{Aabb, BoxWorld, ConfigError, EffectLog, FrameReport, ShooterConfig, Simulation};

/// Scripted aim/crosshair sandbox
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (defaults are used for missing values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 180)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

/// A wall 15 m ahead and a pillar off to the right.
fn build_world() -> BoxWorld {
    let mut world = BoxWorld::new();
    world.add_box(
        "wall",
        Aabb::new(Vec3::new(-600.0, 0.0, -1540.0), Vec3::new(600.0, 400.0, -1500.0)),
    );
    world.add_box(
        "pillar",
        Aabb::from_center_half_extents(Vec3::new(400.0, 150.0, -700.0), Vec3::new(40.0, 150.0, 40.0)),
    );
    world
}

fn apply_script(sim: &mut Simulation<BoxWorld, EffectLog>, frame: u64) {
    let router = sim.router_mut();
    match frame {
        1 => router.key_event(KeyCode::W, true),
        46 => router.key_event(KeyCode::W, false),
        60 | 100 | 140 | 160 => router.button_event(MouseButton::Left, true),
        61 | 101 | 141 | 161 => router.button_event(MouseButton::Left, false),
        75 => router.button_event(MouseButton::Right, true),
        121 => router.button_event(MouseButton::Right, false),
        130 => router.key_event(KeyCode::Space, true),
        131 => router.key_event(KeyCode::Space, false),
        150..=159 => router.mouse_motion(60.0, 0.0),
        _ => {}
    }
}

fn print_frame(report: &FrameReport) {
    let anim = &report.animation;
    let mut line = format!(
        "frame {:>4}  spread {:.3}  fov {:>5.1}  speed {:>5.1}  air {:<5}  aim {:<5}",
        report.frame, report.spread, report.fov, anim.speed, anim.is_in_air, anim.aiming
    );
    if let Some(shot) = &report.shot {
        line.push_str(&format!(
            "  SHOT -> {:.0} (blocked: {})",
            shot.beam_end_point, shot.blocked
        ));
    }
    if let Some(err) = &report.fire_error {
        line.push_str(&format!("  MISFIRE: {err}"));
    }
    println!("{line}");
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => ShooterConfig::load(path)?,
        None => ShooterConfig::default(),
    };

    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut sim = Simulation::new(&config, build_world(), EffectLog::new());
    info!("simulating {} frames at dt {:.4}s", args.frames, args.dt);

    let mut shots = 0;
    for frame in 1..=args.frames {
        apply_script(&mut sim, frame);
        let report = sim.step(args.dt);
        if report.shot.is_some() {
            shots += 1;
        }
        print_frame(&report);
    }

    let effects = sim.effects_mut().drain();
    println!(
        "done: {shots} shots, {} effects, character at {:.0}",
        effects.len(),
        sim.character().position()
    );
    Ok(())
}
