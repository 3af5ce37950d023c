//! Kstar credential manager.
//! Acquires and renews access tokens. Retry orchestration is left to the caller.
use reqwest::Url;
use reqwest::header::{ORIGIN, REFERER};

use super::credentials::{AuthMethod, Credentials, RefreshToken, TokenGrant};
use super::schemas::{LoginResponse, TokenResponse};
use super::session::{self, Session};
use super::{Error, Result};

const TOKEN_PATH: &str = "/prod-api/oauth/token";
/// OAuth client of the portal web application.
const CLIENT_ID: &str = "kstar";
const CLIENT_SECRET: &str = "kstarSecret";

pub(crate) struct Authenticator {
    base_url: Url,
    login_path: String,
}

impl Authenticator {
    pub fn new(base_url: Url, login_path: String) -> Self {
        Authenticator {
            base_url,
            login_path,
        }
    }

    /// Acquire credentials with the configured auth method.
    /// The session is closed so the next request carries the new token.
    pub async fn authenticate(
        &self,
        credentials: &mut Credentials,
        session: &mut Session,
    ) -> Result<()> {
        let grant = match credentials.method() {
            AuthMethod::RefreshToken(_) => {
                let refresh_token = credentials
                    .refresh_token()
                    .cloned()
                    .ok_or_else(|| Error::AuthFailed("no refresh token configured".to_string()))?;
                self.request_token_refresh(session, &refresh_token).await?
            }
            AuthMethod::Password { username, password } => {
                self.request_login(session, username, password).await?
            }
        };
        credentials.store(grant);
        session.close();
        log::info!("Authenticated with the Kstar portal");
        Ok(())
    }

    /// Renew credentials with the held refresh token.
    /// In password mode any refresh failure falls back to a full login.
    pub async fn reauthenticate(
        &self,
        credentials: &mut Credentials,
        session: &mut Session,
    ) -> Result<()> {
        if let Some(refresh_token) = credentials.refresh_token().cloned() {
            match self.request_token_refresh(session, &refresh_token).await {
                Ok(grant) => {
                    credentials.store(grant);
                    session.close();
                    log::info!("Kstar access token refreshed");
                    return Ok(());
                }
                Err(e) if matches!(credentials.method(), AuthMethod::RefreshToken(_)) => {
                    log::error!("Kstar token refresh failed: {e}");
                    return Err(e);
                }
                Err(e) => log::warn!("Kstar token refresh failed, logging in again: {e}"),
            }
        }
        self.authenticate(credentials, session).await
    }

    /// Exchange a refresh token for a new access token.
    async fn request_token_refresh(
        &self,
        session: &mut Session,
        refresh_token: &RefreshToken,
    ) -> Result<TokenGrant> {
        log::debug!("Sending token refresh request");
        let http = session.open(None)?;
        let url = self.endpoint(TOKEN_PATH)?;
        let origin = self.origin();
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];
        let response = http
            .post(url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .header(ORIGIN, origin)
            .header(REFERER, format!("{origin}/"))
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::AuthFailed(format!("token request failed: {e}")))?;
        let text = Self::success_text(response, "token").await?;
        let body: TokenResponse = serde_json::from_str(&text)
            .map_err(|e| Error::AuthFailed(format!("invalid token response: {e}")))?;
        body.into_grant()
    }

    /// Log in with username and password.
    async fn request_login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<TokenGrant> {
        log::debug!("Sending login request for user {username}");
        let http = session.open(None)?;
        let url = self.endpoint(&self.login_path)?;
        let origin = self.origin();
        let params = [("username", username), ("password", password)];
        let response = http
            .post(url)
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .header(ORIGIN, origin)
            .header(REFERER, format!("{origin}/"))
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::AuthFailed(format!("login request failed: {e}")))?;
        let text = Self::success_text(response, "login").await?;
        let body: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| Error::AuthFailed(format!("invalid login response: {e}")))?;
        body.into_grant()
    }

    /// Read the body of a 2xx response, or fail with the status.
    async fn success_text(response: reqwest::Response, endpoint: &str) -> Result<String> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::AuthFailed(format!("{endpoint} response unreadable: {e}")))?;
        if !status.is_success() {
            let description = serde_json::from_str::<TokenResponse>(&text)
                .ok()
                .and_then(|body| body.error_description)
                .map(|description| format!(": {description}"))
                .unwrap_or_default();
            return Err(Error::AuthFailed(format!(
                "{endpoint} endpoint returned {status}{description}"
            )));
        }
        Ok(text)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        session::endpoint(&self.base_url, path)
    }

    fn origin(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}
