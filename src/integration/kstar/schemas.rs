//! Kstar API Schemas
//! Response bodies of the Kstar portal endpoints.
use serde::Deserialize;
use serde_json::Value;

use super::credentials::{AccessToken, RefreshToken, TokenGrant};
use super::snapshot::Snapshot;
use super::{Error, Result};

const SUCCESS_CODE: i64 = 200;
const UNKNOWN_ERROR: &str = "Unknown error";

/// Response of `POST /prod-api/oauth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub value: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<TokenValue>,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenValue {
    pub value: Option<String>,
}

impl TokenResponse {
    pub fn into_grant(self) -> Result<TokenGrant> {
        let access_token = self.value.and_then(AccessToken::new).ok_or_else(|| {
            Error::AuthFailed(format!(
                "token refresh rejected: {}",
                self.error_description.as_deref().unwrap_or(UNKNOWN_ERROR)
            ))
        })?;
        let refresh_token = self
            .refresh_token
            .and_then(|token| token.value)
            .and_then(RefreshToken::new);
        Ok(TokenGrant {
            access_token,
            refresh_token,
        })
    }
}

/// Response of the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: Option<LoginToken>,
    #[serde(alias = "msg")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginToken {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl LoginResponse {
    pub fn into_grant(self) -> Result<TokenGrant> {
        let message = self.message;
        let token = self.token;
        let access_token = token
            .as_ref()
            .and_then(|token| token.access_token.clone())
            .and_then(AccessToken::new)
            .ok_or_else(|| {
                Error::AuthFailed(format!(
                    "login rejected: {}",
                    message.as_deref().unwrap_or(UNKNOWN_ERROR)
                ))
            })?;
        let refresh_token = token
            .and_then(|token| token.refresh_token)
            .and_then(RefreshToken::new);
        Ok(TokenGrant {
            access_token,
            refresh_token,
        })
    }
}

/// Response of `GET /prod-api/station/detail/earn`.
/// Fields stay loosely typed so a failure body is never rejected before its code is read.
#[derive(Debug, Deserialize)]
pub struct StationResponse {
    pub code: Option<Value>,
    pub message: Option<Value>,
    pub data: Option<Value>,
}

impl StationResponse {
    /// The body-level status code. Some deployments send it as a string.
    pub fn code(&self) -> Option<i64> {
        match self.code.as_ref()? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match &self.message {
            Some(Value::String(text)) => text.clone(),
            None | Some(Value::Null) => UNKNOWN_ERROR.to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn into_snapshot(self) -> Result<Snapshot> {
        let code = self.code();
        if code != Some(SUCCESS_CODE) {
            return Err(Error::ApiError {
                code,
                message: self.message(),
            });
        }
        match self.data {
            None | Some(Value::Null) => Ok(Snapshot::default()),
            Some(data @ Value::Object(_)) => {
                serde_json::from_value(data).map_err(|e| Error::ApiError {
                    code,
                    message: format!("invalid station data: {e}"),
                })
            }
            Some(other) => Err(Error::ApiError {
                code,
                message: format!("station data is not an object: {other}"),
            }),
        }
    }
}
