//! Home Assistant Client.
//! This client is the higher level API client for Home Assistant.

use super::Result;
use super::http_client::HttpClient;
use super::schemas::StateCreateOrUpdate;
use super::sensors::StationMetric;
use reqwest::Url;

/// State Home Assistant shows for an entity without a current reading.
const UNAVAILABLE: &str = "unavailable";

pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Creates a new instance of `Client`.
    pub fn new(url: Url, token: String) -> Self {
        let http = HttpClient::new(url, token);
        Client { http }
    }

    /// Set the reading of a station metric in Home Assistant.
    pub async fn set_station_metric(&self, metric: StationMetric, state: &str) -> Result<()> {
        let body = Self::create_station_metric_state(metric, state);
        self.http.set_state(&metric.entity_id(), &body).await
    }

    /// Mark a station metric as unavailable in Home Assistant.
    pub async fn set_station_metric_unavailable(&self, metric: StationMetric) -> Result<()> {
        self.set_station_metric(metric, UNAVAILABLE).await
    }

    /// Create the state of a station metric with its display attributes.
    fn create_station_metric_state(metric: StationMetric, state: &str) -> StateCreateOrUpdate {
        let descriptor = metric.descriptor();
        StateCreateOrUpdate {
            state: state.to_string(),
            attributes: Some(
                [
                    ("unit_of_measurement".to_string(), descriptor.unit.to_string()),
                    ("friendly_name".to_string(), metric.friendly_name()),
                    ("device_class".to_string(), descriptor.device_class.to_string()),
                    ("state_class".to_string(), descriptor.state_class.to_string()),
                    ("icon".to_string(), descriptor.icon.to_string()),
                ]
                .into_iter()
                .collect(),
            ),
        }
    }
}
