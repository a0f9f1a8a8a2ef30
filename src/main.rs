use anyhow::{bail, Result};
use clap::Parser;

use gaze_fade::cli::Cli;
use gaze_fade::frame::FixedFrames;
use gaze_fade::{create_ring_scene, load_scene, Stage};

// === Constants ===

const PROGRESS_INTERVAL_SECS: f32 = 5.0;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let description = match &cli.scene {
        Some(path) => load_scene(path)?,
        None => {
            if cli.labels == 0 {
                bail!("--labels must be at least 1");
            }
            create_ring_scene(cli.labels, cli.radius)
        }
    };

    let mut stage = Stage::new(description)?;
    let turn_per_sec = cli.turn_rate.to_radians();
    let progress_every = ((PROGRESS_INTERVAL_SECS / cli.dt.max(f32::EPSILON)) as u64).max(1);

    log::info!(
        "Simulating {} labels for up to {} frames (dt = {:.4}s, turn = {} deg/s)",
        stage.controllers().len(),
        cli.frames,
        cli.dt,
        cli.turn_rate
    );

    let mut frames_run = 0;
    for frame in FixedFrames::new(cli.dt, Some(cli.frames)) {
        frames_run = frame.number;

        for id in stage.tick(frame.delta) {
            log::info!("frame {} ({:.2}s): label {} fully visible", frame.number, frame.time, id);
        }

        if stage.all_latched() {
            break;
        }

        if frame.number % progress_every == 0 {
            log::debug!(
                "t = {:.1}s: {} in view, {} fading in, {} latched",
                frame.time,
                stage.in_view_count(),
                stage.fading_in_count(),
                stage.latched_count()
            );
        }

        stage.camera.turn(turn_per_sec * frame.delta);
    }

    println!("Simulated {} frames", frames_run);
    for controller in stage.controllers() {
        let label = controller.target();
        println!(
            "  {} {:<16} alpha {:.3} {:?}",
            controller.id(),
            label.text,
            controller.state().alpha(),
            controller.phase()
        );
    }
    println!(
        "{}/{} labels fully visible",
        stage.latched_count(),
        stage.controllers().len()
    );

    Ok(())
}
