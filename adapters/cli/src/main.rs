#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lane Defence experience.

mod args;
mod headless;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use lane_defence_core::WINDOW_TITLE;
use lane_defence_rendering::{Color, Presentation, RenderingBackend, Scene};
use lane_defence_rendering_macroquad::MacroquadBackend;
use lane_defence_simulation::{FlowInput, FlowStatus, GameFlow};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::CliArgs;

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, headless = args.headless, "starting lane defence");

    if args.headless {
        let summary = headless::run(seed, args.ticks, &args.plants);
        let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{json}");
        return Ok(());
    }

    let mut flow = GameFlow::new(seed);
    let mut scene = Scene::new();
    scene::populate(&mut scene, &flow);
    let presentation = Presentation::new(WINDOW_TITLE, Color::WHITE, scene);

    MacroquadBackend::new()
        .with_vsync(args.vsync_enabled())
        .with_asset_root(args.assets)
        .run(presentation, move |frame, input, scene| {
            let status = flow.advance(
                frame,
                FlowInput {
                    presses: &input.presses,
                    forfeit: input.forfeit,
                    quit: input.quit,
                },
            );
            scene::populate(scene, &flow);
            scene.audio.extend(flow.drain_audio());
            scene.exit_requested = status == FlowStatus::Exit;
        })
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
