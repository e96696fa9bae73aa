//! Geolocation-driven "nearby places" polling.
//!
//! [`NearbyWatcher`] asks a [`PositionSource`] for the current position on a
//! fixed interval and re-runs the nearby query every tick. The latest result
//! is published on a `watch` channel.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tourism_core::error::CoreError;
use tourism_core::geo::Coordinates;
use tourism_core::models::Place;

use crate::http::BackendClient;

/// Default polling interval for nearby lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Something that knows where the user is.
#[async_trait]
pub trait PositionSource: Send + Sync + 'static {
    async fn current_position(&self) -> Result<Coordinates, CoreError>;
}

/// A position that never moves.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, CoreError> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbySnapshot {
    pub position: Coordinates,
    pub places: Vec<Place>,
}

pub struct NearbyWatcher {
    updates: watch::Receiver<Option<NearbySnapshot>>,
    handle: JoinHandle<()>,
}

impl NearbyWatcher {
    /// Start polling. The task runs until `cancel` is triggered.
    pub fn spawn<S: PositionSource>(
        client: BackendClient,
        source: S,
        radius_km: f64,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        tracing::debug!("Nearby watcher cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Some(snapshot) = poll_once(&client, &source, radius_km).await {
                            tx.send_replace(Some(snapshot));
                        }
                    }
                }
            }
        });

        Self {
            updates: rx,
            handle,
        }
    }

    /// Receiver for snapshots; `None` until the first successful poll.
    pub fn subscribe(&self) -> watch::Receiver<Option<NearbySnapshot>> {
        self.updates.clone()
    }

    pub fn latest(&self) -> Option<NearbySnapshot> {
        self.updates.borrow().clone()
    }

    /// Wait for the polling task to finish after cancellation.
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Nearby watcher task failed");
        }
    }
}

async fn poll_once<S: PositionSource>(
    client: &BackendClient,
    source: &S,
    radius_km: f64,
) -> Option<NearbySnapshot> {
    let position = match source.current_position().await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "Position unavailable, keeping previous results");
            return None;
        }
    };

    match client.nearby_by_coordinates(position, radius_km).await {
        Ok(places) => Some(NearbySnapshot { position, places }),
        Err(e) => {
            tracing::warn!(error = %e, "Nearby lookup failed, keeping previous results");
            None
        }
    }
}
