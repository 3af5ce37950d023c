//! kstarsolar - Sync Kstar solar station data to Home Assistant.
pub mod core;
pub mod integration;
pub mod server;
pub mod services;
