#![deny(clippy::all, clippy::pedantic)]

mod levels;

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use physics::PendulumEnv;
use sim::Scheduler;

/// Headless host for the paddle balancing levels: drives the simulation
/// from a monotonic clock the way the browser drives it from animation
/// frames, and logs the running average reward.
#[derive(Parser, Debug)]
#[command(name = "balance", about = "Run a paddle balancing level without a browser")]
struct Args {
    /// Level to run (1 or 2).
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Host frames to simulate before exiting.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Host frame rate in frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of parallel simulations; defaults to the level's pool size.
    #[arg(long)]
    pool: Option<f32>,

    /// Parameter override, repeatable: --set theta_weight=-4
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Seed phrase for the run-seed stream.
    #[arg(long, default_value = "lots of apples")]
    seed: String,
}

fn parse_assignment(s: &str) -> Result<(&str, f32)> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got `{s}`"))?;
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("value for `{name}` is not a number"))?;
    Ok((name.trim(), value))
}

fn log_progress(scheduler: &Scheduler<PendulumEnv>, frame: u32) {
    let score = scheduler
        .average_reward()
        .map_or_else(|| "n/a".to_owned(), |r| format!("{r:.2}"));
    tracing::info!(
        "frame {} complete. {} runs, {} episodes, average reward: {}",
        frame,
        scheduler.runs().len(),
        scheduler.rewards().len(),
        score
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let level = match args.level {
        1 => levels::level1(),
        2 => levels::level2(),
        n => return Err(anyhow!("no such level: {n}")),
    };
    tracing::info!("{}: {}", level.name, level.info);

    let mut scheduler = level.scheduler(&args.seed);
    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        scheduler
            .set_parameter(name, value)
            .with_context(|| format!("cannot set `{name}`"))?;
    }
    if let Some(pool) = args.pool {
        scheduler.set_pool_size(pool);
    }

    let frame_period = Duration::from_secs_f64(1.0 / args.fps);
    let start = Instant::now();
    for frame in 0..args.frames {
        let report = scheduler.advance(start.elapsed().as_secs_f64());
        if report.fell_behind {
            tracing::warn!("frame {}: host clock outran the physics tick cap", frame);
        }
        if (frame + 1) % 120 == 0 {
            log_progress(&scheduler, frame + 1);
        }
        std::thread::sleep(frame_period);
    }

    log_progress(&scheduler, args.frames);
    Ok(())
}
