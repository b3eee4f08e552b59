use chrono::{Local, Utc};
use statum::{machine, state};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use super::message::{JoyMessage, FRAME_ID};
use super::transport::JoyTransport;
use crate::controller::ControllerState;

/// Publish period of the joystick message (20 Hz)
pub const PUBLISH_PERIOD_MS: u64 = 50;

#[derive(Clone, Debug)]
pub struct BroadcastSettings {
    pub publish_period_ms: u64,
    pub frame_id: String,
    pub stats_interval_secs: i64,
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self {
            publish_period_ms: PUBLISH_PERIOD_MS,
            frame_id: FRAME_ID.to_string(),
            stats_interval_secs: 30,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("Failed to initialize broadcaster: {0}")]
    InitializationError(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    pub published: u64,
    pub rejected: u64,
}

#[state]
#[derive(Debug, Clone)]
pub enum BroadcastState {
    Idle,
    Broadcasting,
}

#[machine]
pub struct Broadcaster<S: BroadcastState> {
    settings: BroadcastSettings,

    // Outbound sink
    transport: Box<dyn JoyTransport>,

    // Read side of the controller state
    state_receiver: watch::Receiver<ControllerState>,

    stats: BroadcastStats,
}

impl<S: BroadcastState> Broadcaster<S> {
    pub fn settings(&self) -> &BroadcastSettings {
        &self.settings
    }

    pub fn stats(&self) -> BroadcastStats {
        self.stats
    }
}

impl Broadcaster<Idle> {
    pub fn create(
        settings: Option<BroadcastSettings>,
        transport: Box<dyn JoyTransport>,
        state_receiver: watch::Receiver<ControllerState>,
    ) -> Result<Self, BroadcastError> {
        let settings = settings.unwrap_or_default();
        if settings.publish_period_ms == 0 {
            return Err(BroadcastError::InitializationError(
                "publish period must be non-zero".to_string(),
            ));
        }
        debug!(
            "Creating broadcaster for {} with settings: {:?}",
            transport.describe(),
            settings
        );
        Ok(Self::new(
            settings,
            transport,
            state_receiver,
            BroadcastStats::default(),
        ))
    }

    pub fn start(self) -> Broadcaster<Broadcasting> {
        info!(
            "Broadcasting joystick state every {} ms as '{}'",
            self.settings.publish_period_ms, self.settings.frame_id
        );
        self.transition()
    }
}

impl Broadcaster<Broadcasting> {
    /// Publish one snapshot of the current state
    ///
    /// A rejected message is counted and dropped; the next tick carries fresh
    /// state anyway.
    pub fn publish_current(&mut self) -> JoyMessage {
        let message = {
            let state = self.state_receiver.borrow_and_update();
            JoyMessage::snapshot(&state, Utc::now(), &self.settings.frame_id)
        };

        match self.transport.publish(&message) {
            Ok(()) => {
                self.stats.published += 1;
                trace!("Published {}", message);
            }
            Err(e) => {
                self.stats.rejected += 1;
                trace!("Transport rejected message: {}", e);
            }
        }
        message
    }

    /// Stop publishing and close the transport. Close failures are only logged.
    pub fn stop(mut self) -> Broadcaster<Idle> {
        info!(
            "Stopping broadcaster after {} published, {} rejected messages",
            self.stats.published, self.stats.rejected
        );
        if let Err(e) = self.transport.close() {
            debug!("Ignoring transport close error: {}", e);
        }
        self.transition()
    }
}

/// Running broadcaster task
pub struct BroadcasterHandle {
    task: JoinHandle<BroadcastStats>,
}

impl BroadcasterHandle {
    pub fn spawn(
        settings: Option<BroadcastSettings>,
        transport: Box<dyn JoyTransport>,
        state_receiver: watch::Receiver<ControllerState>,
        shutdown: CancellationToken,
    ) -> Result<Self, BroadcastError> {
        let broadcaster = Broadcaster::create(settings, transport, state_receiver)?.start();

        let task = tokio::spawn(async move {
            debug!("Broadcaster task started");
            let stopped = run_broadcast_loop(broadcaster, shutdown).await;
            stopped.stats()
        });

        Ok(Self { task })
    }

    /// Wait for the task to finish after the shutdown token fired
    pub async fn join(self) -> BroadcastStats {
        match self.task.await {
            Ok(stats) => stats,
            Err(e) => {
                error!("Broadcaster task failed: {}", e);
                BroadcastStats::default()
            }
        }
    }
}

async fn run_broadcast_loop(
    mut broadcaster: Broadcaster<Broadcasting>,
    shutdown: CancellationToken,
) -> Broadcaster<Idle> {
    let settings = broadcaster.settings().clone();
    let mut interval_timer =
        tokio::time::interval(tokio::time::Duration::from_millis(settings.publish_period_ms));

    let stats_interval = chrono::Duration::seconds(settings.stats_interval_secs);
    let mut last_stats_time = Local::now();
    let mut last_stats = broadcaster.stats();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval_timer.tick() => {}
        }

        broadcaster.publish_current();

        let now = Local::now();
        if now - last_stats_time > stats_interval {
            let stats = broadcaster.stats();
            let published = stats.published - last_stats.published;
            let rejected = stats.rejected - last_stats.rejected;
            let elapsed_seconds = (now - last_stats_time).num_seconds().max(1);
            info!(
                "Broadcast stats: {} published, {} rejected in {} seconds ({:.1} msg/s)",
                published,
                rejected,
                elapsed_seconds,
                published as f64 / elapsed_seconds as f64
            );
            if rejected > 0 && published == 0 {
                warn!("No message accepted by the transport in the last {} seconds", elapsed_seconds);
            }
            last_stats = stats;
            last_stats_time = now;
        }
    }

    broadcaster.stop()
}
