//! Kstar Client.
//! Fetches station snapshots, re-authenticating and retrying once when the token expired.
//!
//! A client serves a single logical caller: the credentials and the session sit behind
//! one lock that is held for the whole duration of a fetch.
use async_lock::Mutex;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use strum_macros::Display;

use super::auth::Authenticator;
use super::credentials::{AuthMethod, Credentials};
use super::schemas::StationResponse;
use super::session::{self, Session};
use super::snapshot::Snapshot;
use super::{Error, Result};

const STATION_DETAIL_PATH: &str = "/prod-api/station/detail/earn";
pub const DEFAULT_LOGIN_PATH: &str = "/prod-api/oauth/login";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClientStatus {
    Unauthenticated,
    Authenticated,
    /// The last fetch failed. The next fetch starts over from the held credentials.
    Failed,
}

struct ClientState {
    credentials: Credentials,
    session: Session,
    status: ClientStatus,
}

pub struct Client {
    base_url: Url,
    station_id: String,
    authenticator: Authenticator,
    state: Mutex<ClientState>,
}

impl Client {
    /// Creates a new instance of `Client`.
    pub fn new(url: Url, station_id: String, auth: AuthMethod) -> Self {
        Client {
            authenticator: Authenticator::new(url.clone(), DEFAULT_LOGIN_PATH.to_string()),
            base_url: url,
            station_id,
            state: Mutex::new(ClientState {
                credentials: Credentials::new(auth),
                session: Session::new(DEFAULT_TIMEOUT),
                status: ClientStatus::Unauthenticated,
            }),
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.state.get_mut().session = Session::new(timeout);
        self
    }

    /// Set the path of the login endpoint used in password mode.
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.authenticator = Authenticator::new(self.base_url.clone(), login_path.into());
        self
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub async fn status(&self) -> ClientStatus {
        self.state.lock().await.status
    }

    /// Returns `true` if an access token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.credentials.access_token().is_some()
    }

    pub async fn is_session_open(&self) -> bool {
        self.state.lock().await.session.is_open()
    }

    /// Acquire credentials with the configured auth method.
    pub async fn authenticate(&self) -> Result<()> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        self.authenticator
            .authenticate(&mut state.credentials, &mut state.session)
            .await?;
        state.status = ClientStatus::Authenticated;
        Ok(())
    }

    /// Renew credentials, falling back to a full login in password mode.
    pub async fn reauthenticate(&self) -> Result<()> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        self.authenticator
            .reauthenticate(&mut state.credentials, &mut state.session)
            .await?;
        state.status = ClientStatus::Authenticated;
        Ok(())
    }

    /// Fetch the current metrics of the station.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let result = self.fetch_with_reauth(state).await;
        state.status = match &result {
            Ok(_) => ClientStatus::Authenticated,
            Err(_) if state.credentials.access_token().is_some() => ClientStatus::Failed,
            Err(_) => state.status,
        };
        result
    }

    /// Release the HTTP session. The next fetch opens a new one.
    pub async fn close(&self) {
        if self.state.lock().await.session.close() {
            log::debug!("Kstar session closed");
        }
    }

    async fn fetch_with_reauth(&self, state: &mut ClientState) -> Result<Snapshot> {
        if state.credentials.access_token().is_none() {
            log::debug!("No access token, authenticating");
            self.authenticator
                .authenticate(&mut state.credentials, &mut state.session)
                .await?;
        }

        let error = match self.request_station_detail(state).await {
            Ok(snapshot) => return Ok(snapshot),
            Err(e) if e.is_retryable() => e,
            Err(e) => return Err(e),
        };

        log::warn!("Station request failed, re-authenticating: {error}");
        self.authenticator
            .reauthenticate(&mut state.credentials, &mut state.session)
            .await?;
        state.session.close();
        self.request_station_detail(state).await.map_err(|e| {
            log::error!("Station request failed after re-authentication: {e}");
            Error::FetchFailed(Box::new(e))
        })
    }

    /// Internal method to perform the station detail request.
    async fn request_station_detail(&self, state: &mut ClientState) -> Result<Snapshot> {
        log::debug!("Sending station detail request for station {}", self.station_id);
        let http = state.session.open(state.credentials.access_token())?;
        let url = session::endpoint(&self.base_url, STATION_DETAIL_PATH)?;
        let response = http
            .get(url)
            .query(&[("stationId", self.station_id.as_str())])
            .send()
            .await?;
        // Some gateways answer an expired bearer with 403.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(Error::AccessDenied);
        }
        let text = response.error_for_status()?.text().await?;
        let body: StationResponse = serde_json::from_str(&text)?;
        let snapshot = body.into_snapshot()?;
        log::debug!("Station detail received with {} metrics", snapshot.len());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(
            Url::parse("http://localhost:9003").unwrap(),
            "station-1".to_string(),
            AuthMethod::RefreshToken("refresh-1".to_string()),
        )
    }

    #[tokio::test]
    async fn test_client_new() {
        let client = client();

        assert_eq!(client.station_id(), "station-1");
        assert_eq!(client.status().await, ClientStatus::Unauthenticated);
        assert!(!client.is_authenticated().await);
        assert!(!client.is_session_open().await);
    }

    #[tokio::test]
    async fn test_close_without_session() {
        let client = client().with_timeout(Duration::from_secs(5));

        client.close().await;
        client.close().await;

        assert!(!client.is_session_open().await);
    }

    #[test]
    fn test_client_status_display() {
        assert_eq!(ClientStatus::Authenticated.to_string(), "Authenticated");
        assert_eq!(ClientStatus::Failed.to_string(), "Failed");
    }
}
