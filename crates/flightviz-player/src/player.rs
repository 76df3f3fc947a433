//! Player event loop.
//!
//! Everything runs on one task: control commands, asset completions and
//! controller timers are awaited together and handled one at a time, so the
//! controller never sees concurrent access.

use flightviz_core::{AssetKind, AssetState, Surface};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::control::Control;
use crate::controller::AnimationController;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerOptions {
    /// Start as soon as assets settle and exit when playback ends
    pub autoplay: bool,
}

enum Step {
    Control(Option<Control>),
    Asset(Option<Result<(AssetKind, AssetState), tokio::task::JoinError>>),
    Timer,
}

/// Run until shutdown is requested (or, with autoplay, until playback ends).
pub async fn run_player<S: Surface>(
    controller: &mut AnimationController<S>,
    mut commands: mpsc::Receiver<Control>,
    mut loads: JoinSet<(AssetKind, AssetState)>,
    options: PlayerOptions,
) {
    let mut autoplay_pending = options.autoplay;

    loop {
        let running = controller.is_running();
        let loading = !loads.is_empty();

        let step = tokio::select! {
            command = commands.recv() => Step::Control(command),
            loaded = loads.join_next(), if loading => Step::Asset(loaded),
            event = controller.next_event(), if running => {
                if let Some(event) = event {
                    tracing::trace!("{:?}", event);
                }
                Step::Timer
            }
        };

        match step {
            Step::Control(Some(Control::Start)) => {
                controller.start();
            }
            Step::Control(Some(Control::Stop)) => controller.stop(),
            Step::Control(Some(Control::Shutdown)) | Step::Control(None) => {
                controller.stop();
                tracing::info!("Player shutting down");
                return;
            }
            Step::Asset(Some(Ok((kind, state)))) => controller.install_asset(kind, state),
            Step::Asset(Some(Err(e))) => tracing::error!("Asset load task failed: {}", e),
            Step::Asset(None) | Step::Timer => {}
        }

        if autoplay_pending && loads.is_empty() {
            autoplay_pending = false;
            if let Err(reason) = controller.readiness() {
                tracing::error!("Cannot autoplay: {}", reason);
                return;
            }
            controller.start();
        } else if options.autoplay && !autoplay_pending && !controller.is_running() {
            tracing::info!("Playback finished");
            return;
        }
    }
}
