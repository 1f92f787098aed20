//! Headless field runner: drives a visualization with simulated frame times.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   JSON field config (default: built-in defaults)
//!   --frames <N>      Frames to simulate (default: 600)
//!   --seed <SEED>     Override the configured seed
//!   --fps <HZ>        Simulated frame rate (default: 60)
//!   --lines           Enable line rendering
//!   --realtime        Pace frames against the wall clock instead of simulating

use std::time::{Duration, Instant};

use wavefield::core::logging;
use wavefield::core::time::FrameClock;
use wavefield::{FieldConfig, FieldVisualization, Viewport};

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> wavefield::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let frames = parse_u64_arg(&args, "--frames").unwrap_or(600);
    let fps = parse_f64_arg(&args, "--fps").filter(|f| *f > 0.0).unwrap_or(60.0);

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => FieldConfig::load(path)?,
        None => FieldConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.seed = Some(seed);
    }
    if args.iter().any(|a| a == "--lines") {
        config.params.lines_enabled = true;
    }
    let realtime = args.iter().any(|a| a == "--realtime");

    println!("=== Wavefield ===");
    println!("Frames: {} at {} fps", frames, fps);
    println!("Seed:   {:?}", config.seed);
    println!("Lines:  {}", config.params.lines_enabled);
    println!("Clock:  {}", if realtime { "wall" } else { "simulated" });
    println!();

    let mut field = FieldVisualization::initialize(Viewport::default(), config)?;
    let frame_ms = 1000.0 / fps;
    let report_every = (fps.round() as u64).max(1);
    let start = Instant::now();
    let mut clock = FrameClock::new();

    for frame in 1..=frames {
        let frame_start = Instant::now();
        let wall_ms = clock.tick();
        if realtime {
            field.tick(wall_ms);
        } else {
            field.tick(frame as f64 * frame_ms);
        }

        if frame % report_every == 0 {
            let view = field.frame();
            let (z_min, z_max) = view
                .positions
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[2]), hi.max(p[2])));
            log::info!(
                "t={:.1}s vertices={} lines={} z=[{:.3}, {:.3}] cam=({:.2}, {:.2}, {:.2}) fov={:.1} scenes={}",
                view.elapsed_ms / 1000.0,
                view.positions.len(),
                view.lines.map_or(0, |l| l.len() / 2),
                z_min,
                z_max,
                view.camera.position.x,
                view.camera.position.y,
                view.camera.position.z,
                view.camera.fov_degrees,
                field.director().scenes_played()
            );
            log::debug!("host fps {:.1}, last frame {:.3} ms", clock.fps(), clock.delta_secs() * 1000.0);
        }

        if realtime {
            let budget = Duration::from_secs_f64(frame_ms / 1000.0);
            if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let wall = start.elapsed();
    let background = field.frame().background.css_gradient();
    field.dispose();

    println!();
    println!(
        "Ran {} frames in {:.2?} ({:.3} ms/frame)",
        clock.frame_count(),
        wall,
        wall.as_secs_f64() * 1000.0 / frames.max(1) as f64
    );
    println!("Background: {}", background);
    Ok(())
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
