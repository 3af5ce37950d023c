//! Kstar credentials.
//! Token values never appear in `Debug` output.
use std::fmt;

/// How the client obtains its access token.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Exchange a refresh token copied from the portal session.
    RefreshToken(String),
    /// Log in to the portal with a username and password.
    Password { username: String, password: String },
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::RefreshToken(_) => f
                .debug_tuple("RefreshToken")
                .field(&"[REDACTED]")
                .finish(),
            AuthMethod::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Short-lived bearer token for station requests.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct AccessToken(String);

impl AccessToken {
    /// Returns `None` for an empty token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Longer-lived token exchanged for new access tokens.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct RefreshToken(String);

impl RefreshToken {
    /// Returns `None` for an empty token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// Tokens granted by the token or login endpoint.
#[derive(Debug)]
pub(crate) struct TokenGrant {
    pub access_token: AccessToken,
    pub refresh_token: Option<RefreshToken>,
}

/// Credential state of one client.
#[derive(Debug)]
pub(crate) struct Credentials {
    method: AuthMethod,
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
}

impl Credentials {
    pub fn new(method: AuthMethod) -> Self {
        let refresh_token = match &method {
            AuthMethod::RefreshToken(token) => RefreshToken::new(token.as_str()),
            AuthMethod::Password { .. } => None,
        };
        Credentials {
            method,
            access_token: None,
            refresh_token,
        }
    }

    pub fn method(&self) -> &AuthMethod {
        &self.method
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    /// Store a grant. A grant without a rotated refresh token keeps the current one.
    pub fn store(&mut self, grant: TokenGrant) {
        self.access_token = Some(grant.access_token);
        if let Some(refresh_token) = grant.refresh_token {
            self.refresh_token = Some(refresh_token);
        }
    }
}
