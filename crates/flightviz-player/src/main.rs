//! flightviz - replay a drone flight over a map.
//!
//! Type `start`, `stop` or `quit` on stdin. The current frame is written to
//! the output PNG after every redraw.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flightviz_core::AssetKind;
use flightviz_player::{
    control, loader, run_player, source, AnimationController, Config, PlayerOptions, PngSurface,
};

/// Replay a drone flight over a map image
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Flight data JSON file or http(s) URL [env: FLIGHTVIZ_DATA]
    #[arg(long)]
    data: Option<String>,

    /// Background map image [env: FLIGHTVIZ_MAP]
    #[arg(long)]
    map: Option<PathBuf>,

    /// Drone icon image [env: FLIGHTVIZ_DRONE]
    #[arg(long)]
    drone: Option<PathBuf>,

    /// Impact marker image [env: FLIGHTVIZ_MARKER]
    #[arg(long)]
    marker: Option<PathBuf>,

    /// PNG file that receives the current frame [env: FLIGHTVIZ_OUTPUT]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Start once assets are loaded and exit when playback ends
    #[arg(long)]
    autoplay: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(data) = self.data {
            config.data_source = data;
        }
        if let Some(map) = self.map {
            config.map_path = map;
        }
        if let Some(drone) = self.drone {
            config.drone_path = drone;
        }
        if let Some(marker) = self.marker {
            config.marker_path = marker;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flightviz_player=info".parse()?)
                .add_directive("flightviz=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let options = PlayerOptions {
        autoplay: args.autoplay,
    };
    let mut config = Config::from_env();
    args.apply(&mut config);

    tracing::info!("Starting flightviz...");

    let surface = PngSurface::new(
        config.animation.surface_width,
        config.animation.surface_height,
        config.output_path.clone(),
    );
    let mut controller = AnimationController::new(config.animation.clone(), surface);

    for kind in AssetKind::ALL {
        controller.install_asset(kind, flightviz_core::AssetState::Loading);
    }
    let loads = loader::spawn_asset_loads(&config);

    if let Some(samples) = source::load_flight_data(&config.data_source).await {
        controller.load_flight(&samples);
    }

    let (tx, rx) = mpsc::channel(16);
    // Autoplay ignores stdin; the sender stays alive so the loop keeps running.
    let _controls = if options.autoplay {
        None
    } else {
        tracing::info!("Controls: start | stop | quit");
        Some(control::spawn_stdin_controls(tx.clone()))
    };

    run_player(&mut controller, rx, loads, options).await;
    drop(tx);

    let frames = controller.into_surface().finish().await;
    tracing::info!("Wrote {} frames to {}", frames, config.output_path.display());
    Ok(())
}
