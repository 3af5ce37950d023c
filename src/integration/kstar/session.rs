//! Kstar HTTP session.
//! Wraps the HTTP client together with the portal headers and the bearer authorization.
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA,
    USER_AGENT,
};
use reqwest::Url;
use std::time::Duration;

use super::credentials::AccessToken;
use super::{Error, Result};

/// The portal only serves browser-like clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

pub(crate) struct Session {
    timeout: Duration,
    http: Option<reqwest::Client>,
}

impl Session {
    pub fn new(timeout: Duration) -> Self {
        Session {
            timeout,
            http: None,
        }
    }

    /// Get the open HTTP client, or open one authorized with `access_token`.
    pub fn open(&mut self, access_token: Option<&AccessToken>) -> Result<reqwest::Client> {
        if let Some(http) = &self.http {
            return Ok(http.clone());
        }
        log::debug!("Opening Kstar session");
        let http = reqwest::Client::builder()
            .default_headers(Self::headers(access_token)?)
            .timeout(self.timeout)
            .build()?;
        self.http = Some(http.clone());
        Ok(http)
    }

    /// Drop the HTTP client. Returns `true` if a session was open.
    pub fn close(&mut self) -> bool {
        self.http.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.http.is_some()
    }

    fn headers(access_token: Option<&AccessToken>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        if let Some(token) = access_token {
            let mut value = HeaderValue::from_str(&format!("bearer {}", token.as_str()))
                .map_err(|_| {
                    Error::AuthFailed("access token is not a valid header value".to_string())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

/// Resolve `path` below `base_url`, keeping any path prefix of the base.
pub(crate) fn endpoint(base_url: &Url, path: &str) -> Result<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
}
