//! External services the bridge talks to.
pub mod homeassistant;
pub mod kstar;
