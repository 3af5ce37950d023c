//! Home Assistant Integration Module
//! The integration is done via HTTP JSON API.
mod client;
mod error;
mod http_client;
mod schemas;
mod sensors;

pub use client::Client;
pub use error::{Error, Result};
pub use sensors::{SensorDescriptor, StationMetric};
