//! Integration tests for the Home Assistant client.
use crate::mockserver_homeassistant::HomeAssistantMockServer;
use kstarsolar::integration::homeassistant::{Client, Error, StationMetric};
use rstest::fixture;
use rstest::*;
use strum::IntoEnumIterator;


#[fixture]
/// Combined fixture yielding a client and its HomeAssistantMockServer
async fn client_server() -> (Client, HomeAssistantMockServer) {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
    let server = HomeAssistantMockServer::start().await;
    let client = Client::new(server.url(), server.token());
    (client, server)
}

#[rstest]
#[tokio::test]
async fn test_client_set_station_metric(#[future] client_server: (Client, HomeAssistantMockServer)) {
    let (client, server) = client_server.await;
    let mock = server.mock_set_real_power("1234.5").await;

    let result = client
        .set_station_metric(StationMetric::RealPower, "1234.5")
        .await;

    mock.assert_async().await;
    assert!(result.is_ok());
}

#[rstest]
#[tokio::test]
async fn test_client_set_station_metric_unavailable(
    #[future] client_server: (Client, HomeAssistantMockServer),
) {
    let (client, server) = client_server.await;
    let mock = server.mock_set_real_power("unavailable").await;

    let result = client
        .set_station_metric_unavailable(StationMetric::RealPower)
        .await;

    mock.assert_async().await;
    assert!(result.is_ok());
}

#[rstest]
#[tokio::test]
async fn test_client_set_every_metric(#[future] client_server: (Client, HomeAssistantMockServer)) {
    let (client, server) = client_server.await;
    let mock = server.mock_set_any_state().await;

    for metric in StationMetric::iter() {
        client
            .set_station_metric(metric, "1")
            .await
            .expect("cannot set metric");
    }

    assert_eq!(mock.hits_async().await, StationMetric::iter().count());
}

#[rstest]
#[tokio::test]
async fn test_client_reliability_server_error(
    #[future] client_server: (Client, HomeAssistantMockServer),
) {
    let (client, server) = client_server.await;
    let mock = server.mock_error_any_state().await;

    let result_call_1 = client
        .set_station_metric(StationMetric::RealPower, "1")
        .await;
    let result_call_2 = client
        .set_station_metric(StationMetric::RealPower, "1")
        .await;

    assert!(mock.hits_async().await > 2, "should retry on server error");
    assert!(
        matches!(result_call_1, Err(Error::RequestFailed(_))),
        "request should fail due to server error"
    );
    assert!(
        matches!(result_call_2, Err(Error::RequestRejected)),
        "circuit breaker should reject the request due to repeated failures"
    );
}

#[rstest]
#[tokio::test]
async fn test_client_unauthorized_is_not_retried(
    #[future] client_server: (Client, HomeAssistantMockServer),
) {
    let (client, server) = client_server.await;
    let mock = server.mock_unauthorized_real_power().await;

    let result = client
        .set_station_metric(StationMetric::RealPower, "1")
        .await;

    assert_eq!(mock.hits_async().await, 1, "client errors are not retried");
    assert!(matches!(result, Err(Error::RequestFailed(_))));
}
