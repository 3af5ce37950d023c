//! Application core: configuration and dependency wiring.
pub mod config;
pub mod container;
