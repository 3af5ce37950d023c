//! Station Sync Background Service.
//! This service polls the Kstar portal and publishes the station metrics to Home Assistant.

use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::integration::homeassistant::{self, StationMetric};
use crate::integration::kstar::{self, Snapshot};

pub struct StationSyncBackgroundService {
    kstar: Arc<kstar::Client>,
    homeassistant: Arc<homeassistant::Client>,
    sync_interval: Duration,
}

/// What Home Assistant currently shows.
#[derive(Default)]
struct Published {
    snapshot: Option<Snapshot>,
    unavailable: bool,
}

impl StationSyncBackgroundService {
    /// Creates a new instance of `StationSyncBackgroundService`.
    pub fn new(
        kstar: Arc<kstar::Client>,
        homeassistant: Arc<homeassistant::Client>,
        sync_interval: Duration,
    ) -> Self {
        StationSyncBackgroundService {
            kstar,
            homeassistant,
            sync_interval,
        }
    }

    /// Run the background service until the shutdown token is cancelled.
    /// The first sync happens immediately.
    pub async fn run(&self, shutdown_token: CancellationToken) {
        let mut interval = interval(self.sync_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut published = Published::default();

        loop {
            tokio::select! {
                biased;
                _ = shutdown_token.cancelled() => break,
                _ = interval.tick() => {}
            }
            tokio::select! {
                biased;
                _ = shutdown_token.cancelled() => break,
                _ = self.sync_cycle(&mut published) => {}
            }
        }
        log::info!("Station sync stopped");
    }

    /// One polling cycle. A failed fetch marks the sensors unavailable once.
    async fn sync_cycle(&self, published: &mut Published) {
        match self.sync_station(published.snapshot.as_ref()).await {
            Ok(snapshot) => {
                published.snapshot = Some(snapshot);
                published.unavailable = false;
            }
            Err(e) => {
                log::error!("Error syncing station: {e:#}");
                published.snapshot = None;
                let fetch_failed = e.downcast_ref::<kstar::Error>().is_some();
                if fetch_failed && !published.unavailable {
                    match self.mark_unavailable().await {
                        Ok(()) => published.unavailable = true,
                        Err(e) => log::error!("Failed to mark station sensors unavailable: {e}"),
                    }
                }
            }
        }
    }

    /// Fetches a station snapshot and publishes the metrics that changed since `last_snapshot`.
    pub async fn sync_station(
        &self,
        last_snapshot: Option<&Snapshot>,
    ) -> Result<Snapshot, anyhow::Error> {
        let snapshot = self.kstar.fetch_snapshot().await?;
        for metric in StationMetric::iter() {
            let Some(value) = snapshot.get(metric.key()) else {
                continue;
            };
            if last_snapshot.and_then(|last| last.get(metric.key())).as_ref() == Some(&value) {
                continue;
            }
            let state = value.to_string();
            self.homeassistant.set_station_metric(metric, &state).await?;
            log::debug!("Updated {metric} in Home Assistant: {state}");
        }
        Ok(snapshot)
    }

    /// Marks every station sensor as unavailable.
    pub async fn mark_unavailable(&self) -> Result<(), homeassistant::Error> {
        for metric in StationMetric::iter() {
            self.homeassistant
                .set_station_metric_unavailable(metric)
                .await?;
        }
        log::warn!("Station sensors marked unavailable");
        Ok(())
    }
}
