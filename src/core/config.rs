//! Application configuration loaded from environment variables.
use envconfig::Envconfig;
use humantime::Duration;
use reqwest::Url;
use thiserror::Error;

use crate::integration::kstar::AuthMethod;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Envconfig)]
pub struct Config {
    #[allow(dead_code)]
    #[envconfig(from = "APP_LOG", default = "error")]
    pub app_log: String,
    #[allow(dead_code)]
    #[envconfig(from = "APP_LOG_STYLE", default = "always")]
    pub app_log_style: String,
    #[envconfig(from = "KSTAR_URL", default = "http://solar.kstar.com.cn:9003")]
    pub kstar_url: String,
    #[envconfig(from = "KSTAR_STATION_ID")]
    pub kstar_station_id: String,
    #[envconfig(from = "KSTAR_REFRESH_TOKEN")]
    pub kstar_refresh_token: Option<String>,
    #[envconfig(from = "KSTAR_USERNAME")]
    pub kstar_username: Option<String>,
    #[envconfig(from = "KSTAR_PASSWORD")]
    pub kstar_password: Option<String>,
    #[envconfig(from = "KSTAR_LOGIN_PATH", default = "/prod-api/oauth/login")]
    pub kstar_login_path: String,
    #[envconfig(from = "KSTAR_TIMEOUT", default = "30s")]
    pub kstar_timeout: Duration,
    #[envconfig(from = "HOMEASSISTANT_URL")]
    pub homeassistant_url: Url,
    #[envconfig(from = "HOMEASSISTANT_TOKEN")]
    pub homeassistant_token: String,
    #[envconfig(from = "SYNC_INTERVAL", default = "5m")]
    pub sync_interval: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid Kstar URL '{0}'")]
    InvalidKstarUrl(String),
    #[error("Missing Kstar credentials: set KSTAR_REFRESH_TOKEN, or KSTAR_USERNAME and KSTAR_PASSWORD")]
    MissingCredentials,
    #[error("Ambiguous Kstar credentials: KSTAR_REFRESH_TOKEN cannot be combined with KSTAR_USERNAME/KSTAR_PASSWORD")]
    AmbiguousCredentials,
}

impl Config {
    /// The Kstar portal URL. A missing scheme defaults to `http://`.
    pub fn kstar_url(&self) -> Result<Url, ConfigError> {
        let host = self.kstar_url.trim().trim_end_matches('/');
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        Url::parse(&host).map_err(|_| ConfigError::InvalidKstarUrl(self.kstar_url.clone()))
    }

    /// The Kstar auth method. Exactly one of refresh token or username and password must be set.
    pub fn kstar_auth(&self) -> Result<AuthMethod, ConfigError> {
        let refresh_token = non_empty(&self.kstar_refresh_token);
        let username = non_empty(&self.kstar_username);
        let password = non_empty(&self.kstar_password);
        match (refresh_token, username, password) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ConfigError::AmbiguousCredentials),
            (Some(token), None, None) => Ok(AuthMethod::RefreshToken(token.to_string())),
            (None, Some(username), Some(password)) => Ok(AuthMethod::Password {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn configure_logger() {
    let env = env_logger::Env::default()
        .filter_or("APP_LOG", "info")
        .write_style_or("APP_LOG_STYLE", "always");
    env_logger::init_from_env(env);
}
