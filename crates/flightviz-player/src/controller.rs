//! Animation controller.
//!
//! Owns the playback state, the trajectory and the surface, and drives the
//! renderer from three independently cancellable timers:
//!
//! - the repeating tick, every `total_duration / sample_count`
//! - the one-shot marker show, `total_duration / 2` after start
//! - the one-shot marker hide, `marker_hold` after the marker was shown
//!
//! Timers only fire from [`AnimationController::next_event`], so all state
//! changes happen on the task that owns the controller. `stop()` drops every
//! armed timer, which guarantees none of them fires afterwards.

use std::future::pending;
use std::pin::Pin;
use thiserror::Error;
use tokio::time::{interval_at, sleep, Instant, Interval, MissedTickBehavior, Sleep};

use flightviz_core::{
    build_trajectory, halfway_index, render_frame, AnimationConfig, AnimationState, AssetKind,
    AssetSet, AssetState, FlightSample, Frame, Position, Surface,
};

/// Why `start()` did nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartBlocked {
    #[error("playback already running")]
    AlreadyRunning,
    #[error("no flight data loaded")]
    NoFlightData,
    #[error("assets not ready: {0}")]
    AssetsNotReady(String),
}

/// What a fired timer did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// Drew the frame at this trajectory index
    Tick(usize),
    /// Tick past the last position; playback stopped
    Finished,
    MarkerShown(Position),
    MarkerHidden,
}

#[derive(Default)]
struct Timers {
    tick: Option<Interval>,
    marker_show: Option<Pin<Box<Sleep>>>,
    marker_hide: Option<Pin<Box<Sleep>>>,
}

impl Timers {
    fn cancel_all(&mut self) {
        *self = Self::default();
    }

    fn any_armed(&self) -> bool {
        self.tick.is_some() || self.marker_show.is_some() || self.marker_hide.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum Fired {
    Tick,
    MarkerShow,
    MarkerHide,
}

pub struct AnimationController<S> {
    config: AnimationConfig,
    surface: S,
    assets: AssetSet,
    sample_count: usize,
    positions: Vec<Position>,
    halfway: usize,
    state: AnimationState,
    timers: Timers,
}

impl<S: Surface> AnimationController<S> {
    /// A controller with no flight and no assets; `start()` is inert until both arrive.
    pub fn new(config: AnimationConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            assets: AssetSet::new(),
            sample_count: 0,
            positions: Vec::new(),
            halfway: 0,
            state: AnimationState::default(),
            timers: Timers::default(),
        }
    }

    /// Replace the flight and rebuild the trajectory. Stops any playback.
    pub fn load_flight(&mut self, samples: &[FlightSample]) {
        self.stop_timers();
        self.sample_count = samples.len();
        self.positions = build_trajectory(samples, self.config.origin(), self.config.scale);
        self.halfway = halfway_index(self.positions.len());
        tracing::info!(
            "Trajectory built: {} positions from {} samples",
            self.positions.len(),
            self.sample_count
        );
        self.draw_initial_frame();
    }

    /// Record a load result for one asset.
    ///
    /// The first frame is drawn once every asset is ready.
    pub fn install_asset(&mut self, kind: AssetKind, state: AssetState) {
        let was_ready = self.assets.all_ready();
        tracing::debug!("Asset {} is {}", kind, state.label());
        self.assets.set(kind, state);

        if !was_ready && self.assets.all_ready() {
            tracing::info!("All assets ready");
            self.draw_initial_frame();
        } else if self.assets.any_failed() {
            tracing::warn!("Playback unavailable: {}", self.describe_missing());
        }
    }

    /// Whether `start()` would begin playback right now.
    pub fn readiness(&self) -> Result<(), StartBlocked> {
        if self.state.running {
            return Err(StartBlocked::AlreadyRunning);
        }
        if self.sample_count == 0 {
            return Err(StartBlocked::NoFlightData);
        }
        if !self.assets.all_ready() {
            return Err(StartBlocked::AssetsNotReady(self.describe_missing()));
        }
        Ok(())
    }

    /// Begin playback from the first position.
    ///
    /// Does nothing (and returns false) when already running, without flight
    /// data, or before all assets are ready.
    pub fn start(&mut self) -> bool {
        if let Err(reason) = self.readiness() {
            tracing::debug!("Start ignored: {}", reason);
            return false;
        }
        let Some(step) = self.config.step_interval(self.sample_count) else {
            return false;
        };

        let now = Instant::now();
        self.state.current_index = 0;
        self.state.running = true;
        self.halfway = halfway_index(self.positions.len());

        // A stalled loop drops the missed ticks and resumes on the original
        // step grid instead of drawing a burst of catch-up frames.
        let mut tick = interval_at(now + step, step);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.timers.tick = Some(tick);
        self.timers.marker_show = Some(Box::pin(tokio::time::sleep_until(
            now + self.config.marker_delay(),
        )));
        self.timers.marker_hide = None;

        tracing::info!(
            "Playback started: {} positions, {:?} per step",
            self.positions.len(),
            step
        );
        true
    }

    /// Cancel every pending timer and return to the rest frame.
    ///
    /// Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        let was_running = self.state.running;
        self.stop_timers();
        if !self.positions.is_empty() {
            self.draw(0);
        }
        if was_running {
            tracing::info!("Playback stopped");
        }
    }

    fn stop_timers(&mut self) {
        self.timers.cancel_all();
        self.state.reset();
    }

    /// Wait for the next armed timer and apply it.
    ///
    /// Returns `None` straight away when nothing is scheduled. Cancel-safe:
    /// dropping the future before it resolves changes nothing.
    pub async fn next_event(&mut self) -> Option<AnimationEvent> {
        if !self.timers.any_armed() {
            return None;
        }

        let fired = {
            let timers = &mut self.timers;
            // Ties resolve in scheduling order: tick, then show, then hide.
            tokio::select! {
                biased;
                _ = next_tick(&mut timers.tick) => Fired::Tick,
                _ = expire(&mut timers.marker_show) => Fired::MarkerShow,
                _ = expire(&mut timers.marker_hide) => Fired::MarkerHide,
            }
        };

        Some(match fired {
            Fired::Tick => self.on_tick(),
            Fired::MarkerShow => self.on_marker_show(),
            Fired::MarkerHide => self.on_marker_hide(),
        })
    }

    /// Process timers until playback ends on its own or is stopped.
    pub async fn run_to_completion(&mut self) {
        while self.next_event().await.is_some() {}
    }

    fn on_tick(&mut self) -> AnimationEvent {
        let index = self.state.current_index;
        if index < self.positions.len() {
            self.draw(index);
            self.state.current_index += 1;
            tracing::trace!("Tick {}", index);
            AnimationEvent::Tick(index)
        } else {
            self.stop();
            AnimationEvent::Finished
        }
    }

    fn on_marker_show(&mut self) -> AnimationEvent {
        self.timers.marker_show = None;
        let at = self.positions[self.halfway];
        self.state.marker_visible = true;
        self.state.marker_position = Some(at);
        self.draw(self.current_frame());
        self.timers.marker_hide = Some(Box::pin(sleep(self.config.marker_hold)));
        tracing::debug!("Marker shown at ({:.1}, {:.1})", at.x, at.y);
        AnimationEvent::MarkerShown(at)
    }

    fn on_marker_hide(&mut self) -> AnimationEvent {
        self.timers.marker_hide = None;
        self.state.marker_visible = false;
        self.draw(self.current_frame());
        tracing::debug!("Marker hidden");
        AnimationEvent::MarkerHidden
    }

    /// The frame to redraw outside a tick: the next index, clamped to the path.
    fn current_frame(&self) -> usize {
        self.state
            .current_index
            .min(self.positions.len().saturating_sub(1))
    }

    fn draw_initial_frame(&mut self) {
        if !self.state.running && !self.positions.is_empty() && self.assets.all_ready() {
            self.draw(0);
        }
    }

    fn draw(&mut self, index: usize) {
        let frame = Frame {
            index,
            positions: &self.positions,
            marker_visible: self.state.marker_visible,
            marker_position: self.state.marker_position,
        };
        if let Err(e) = render_frame(&mut self.surface, &frame, &self.assets, self.config.stroke) {
            tracing::warn!("Frame {} not drawn: {}", index, e);
        }
    }

    fn describe_missing(&self) -> String {
        self.assets
            .missing()
            .iter()
            .map(|(kind, state)| match state {
                AssetState::Failed(reason) => format!("{kind} failed ({reason})"),
                other => format!("{kind} {}", other.label()),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give up the surface, cancelling anything still scheduled.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Number of timers still armed, for diagnostics.
    pub fn pending_timers(&self) -> usize {
        [
            self.timers.tick.is_some(),
            self.timers.marker_show.is_some(),
            self.timers.marker_hide.is_some(),
        ]
        .iter()
        .filter(|armed| **armed)
        .count()
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending::<()>().await,
    }
}

async fn expire(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(timer) => timer.as_mut().await,
        None => pending::<()>().await,
    }
}
