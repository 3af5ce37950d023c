//! Kstar Cloud Integration Module
//! The integration is done via the Kstar monitoring portal HTTP JSON API.
mod auth;
mod client;
mod credentials;
mod error;
mod schemas;
mod session;
mod snapshot;

pub use client::{Client, ClientStatus, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT};
pub use credentials::AuthMethod;
pub use error::{Error, ErrorKind, Result};
pub use snapshot::{MetricValue, Snapshot};
