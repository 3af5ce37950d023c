//! Background services.
pub mod stationsync;

pub use stationsync::StationSyncBackgroundService;
