use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use boxjump::controller::{FrameLoopContext, FrameStatus, InputScript, InputState};
use boxjump::model::SceneDescription;
use boxjump::view::{Renderer, TraceRenderer};
use boxjump::{logging, GameConfig};

/// Headless driver: plays an input script against a scene and logs what
/// the renderer would be handed.
#[derive(Debug, Parser)]
#[command(name = "boxjump", version, about)]
struct Args {
    /// Tunables (RON). Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scene description (RON). Defaults to the built-in course.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Timed key presses (RON). Defaults to the built-in demo run.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Frames to simulate before stopping.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Pace frames against the wall clock instead of stepping instantly.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let scene = match &args.scene {
        Some(path) => SceneDescription::load(path).with_context(|| format!("loading scene {}", path.display()))?,
        None => SceneDescription::demo(),
    };
    let script = match &args.script {
        Some(path) => InputScript::load(path).with_context(|| format!("loading script {}", path.display()))?,
        None => InputScript::demo(),
    };

    let fps = if args.fps.is_finite() && args.fps > 0.0 { args.fps } else { 60.0 };
    let frame_time = 1.0 / fps;

    let mut ctx = FrameLoopContext::new(&config, &scene).context("building world")?;
    let mut renderer = TraceRenderer::new(fps.round().max(1.0) as u64);
    let mut input = InputState::new();

    info!(frames = args.frames, fps, realtime = args.realtime, "simulation starting");

    let start = Instant::now();
    let mut last = f32::NEG_INFINITY;
    for i in 0..args.frames {
        let now = if args.realtime {
            let target = start + Duration::from_secs_f32(i as f32 * frame_time);
            if let Some(wait) = target.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
            start.elapsed().as_secs_f32()
        } else {
            i as f32 * frame_time
        };

        for event in script.events_between(last, now) {
            ctx.handle_event(&mut input, &event);
        }
        last = now;

        if ctx.update(&input, now)? == FrameStatus::Quit {
            break;
        }
        renderer.draw_frame(&ctx.render_frame())?;
    }

    let position = ctx.player_position()?;
    info!(
        frames = ctx.frame(),
        drawn = renderer.frames_drawn(),
        position = ?position,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(())
}
