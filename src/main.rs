//! Flick Marble headless driver
//!
//! Loads tuning and stage data, optionally scripts one flick, and runs the
//! simulation at the configured tick rate while logging the marble.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;

use flick_marble::consts::DEFAULT_STAGE;
use flick_marble::renderer::{DrawList, render_frame};
use flick_marble::sim::{InputSnapshot, SimulationState, tick};
use flick_marble::{StageSet, Tuning};

/// Command line options for the headless driver.
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flick-marble simulation")]
struct CliOptions {
    /// JSON tuning file (missing knobs keep their defaults).
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// JSON stage file; the built-in stages are used when omitted.
    #[arg(long, value_name = "FILE")]
    stages: Option<PathBuf>,

    /// Stage to play.
    #[arg(long, default_value = DEFAULT_STAGE)]
    stage: String,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 240)]
    ticks: u64,

    /// Drag from the marble by DX,DY and release (pull-back direction).
    #[arg(long, value_name = "DX,DY", value_parser = parse_pair, allow_hyphen_values = true)]
    flick: Option<DVec2>,

    /// Sleep between ticks to run at the tick rate.
    #[arg(long)]
    realtime: bool,
}

fn parse_pair(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got `{s}`"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad DX: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad DY: {e}"))?;
    Ok(DVec2::new(x, y))
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        log::warn!("No tuning file given, using defaults");
        return Ok(Tuning::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    Tuning::from_json(&raw).with_context(|| format!("invalid tuning in {}", path.display()))
}

fn load_stages(path: Option<&PathBuf>) -> Result<StageSet> {
    let Some(path) = path else {
        return Ok(StageSet::builtin());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read stage file {}", path.display()))?;
    StageSet::from_json(&raw).with_context(|| format!("invalid stage data in {}", path.display()))
}

/// Press on the marble, drag halfway, then release at `origin + drag`
fn script_flick(input: &mut InputSnapshot, tick_index: u64, origin: DVec2, drag: DVec2) {
    match tick_index {
        0 => {
            input.pointer_down = true;
            input.pointer_pos = origin;
        }
        1 => input.pointer_pos = origin + drag * 0.5,
        2 => {
            input.pointer_up = true;
            input.pointer_pos = origin + drag;
        }
        _ => {}
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = CliOptions::parse();

    let tuning = load_tuning(cli.tuning.as_ref())?;
    let stages = load_stages(cli.stages.as_ref())?;
    let stage = stages
        .get(&cli.stage)
        .with_context(|| format!("available stages: {}", stages.names().collect::<Vec<_>>().join(", ")))?
        .clone();

    let interval = tuning.tick_interval();
    let mut state = SimulationState::new(tuning, stage);
    let origin = state.marble.pos;
    let mut input = InputSnapshot::default();
    let mut frame = DrawList::new();

    let start = Instant::now();
    for i in 0..cli.ticks {
        if let Some(drag) = cli.flick {
            script_flick(&mut input, i, origin, drag);
        }

        let report = tick(&mut state, &mut input);

        if let Some(vel) = report.launched {
            log::info!("tick {}: launched at ({:.2}, {:.2})", state.time_ticks, vel.x, vel.y);
        }
        if report.bounce.any() {
            log::info!(
                "tick {}: bounce x={} y={} at ({:.2}, {:.2})",
                state.time_ticks,
                report.bounce.x,
                report.bounce.y,
                state.marble.pos.x,
                state.marble.pos.y
            );
        }

        frame.reset();
        render_frame(&state, &mut frame);
        log::trace!("tick {}: {} draw command(s)", state.time_ticks, frame.commands.len());

        if cli.realtime {
            thread::sleep(interval);
        }
    }

    let marble = &state.marble;
    log::info!(
        "Done: {} ticks in {:.1?}; marble at ({:.2}, {:.2}) speed {:.4}; camera at ({:.2}, {:.2})",
        state.time_ticks,
        start.elapsed(),
        marble.pos.x,
        marble.pos.y,
        marble.speed(),
        state.camera.pos.x,
        state.camera.pos.y
    );

    Ok(())
}
