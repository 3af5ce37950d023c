//! Server
use crate::core::config::{APP_NAME, APP_VERSION, Config, ConfigError};
use crate::core::container::Container;
use tokio_util::sync::CancellationToken;

/// Run the server with the given configuration until the shutdown token is cancelled.
pub async fn server(config: Config, shutdown_token: CancellationToken) -> Result<(), ConfigError> {
    let container = Container::new(config)?;
    log::info!(
        "{APP_NAME} v{APP_VERSION} started for station {}",
        container.kstar_client().station_id()
    );
    container.station_sync().run(shutdown_token).await;
    container.shutdown().await;
    Ok(())
}
