//! Dependency injection container for kstarsolar.

use std::sync::Arc;

use super::config::{Config, ConfigError};
use crate::integration::{homeassistant, kstar};
use crate::services;

/// Container for application dependencies.
pub struct Container {
    config: Arc<Config>,
    kstar: Arc<kstar::Client>,
    homeassistant: Arc<homeassistant::Client>,
    station_sync: Arc<services::StationSyncBackgroundService>,
}

impl Container {
    /// Creates a new instance of the dependency injection container.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let config = Arc::new(config);

        let kstar = Arc::new(
            kstar::Client::new(
                config.kstar_url()?,
                config.kstar_station_id.clone(),
                config.kstar_auth()?,
            )
            .with_login_path(config.kstar_login_path.clone())
            .with_timeout(config.kstar_timeout.into()),
        );

        let homeassistant = Arc::new(homeassistant::Client::new(
            config.homeassistant_url.clone(),
            config.homeassistant_token.clone(),
        ));

        let station_sync = Arc::new(services::StationSyncBackgroundService::new(
            Arc::clone(&kstar),
            Arc::clone(&homeassistant),
            config.sync_interval.into(),
        ));

        Ok(Self {
            config,
            kstar,
            homeassistant,
            station_sync,
        })
    }

    /// Returns a reference to the application config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the station sync service.
    pub fn station_sync(&self) -> Arc<services::StationSyncBackgroundService> {
        Arc::clone(&self.station_sync)
    }

    /// Returns a reference to the Kstar client.
    pub fn kstar_client(&self) -> Arc<kstar::Client> {
        Arc::clone(&self.kstar)
    }

    /// Returns a reference to the Home Assistant client.
    pub fn homeassistant_client(&self) -> Arc<homeassistant::Client> {
        Arc::clone(&self.homeassistant)
    }

    /// Shutdown the container and clean up resources.
    pub async fn shutdown(&self) {
        self.kstar.close().await;
    }
}
