use crate::constants;
use core_types::{PortFilter, SerialConfig};
use serde::Deserialize;
use std::time::Duration;

/// Deployment settings for a drawer session
///
/// Every field falls back to `constants` when missing, so an empty JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Baud rate passed to `open()`
    pub baud_rate: u32,
    /// Bytes written on every activation
    pub payload: Vec<u8>,
    /// Delay before the busy indicator returns to Idle (milliseconds)
    pub busy_min_display_ms: u64,
    /// Filters shown to the user when a new device is requested
    pub request_filters: Vec<PortFilter>,
    /// Run one activation at startup if a device is already authorized
    pub auto_activate: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            baud_rate: constants::port::BAUD_RATE,
            payload: constants::port::DRAWER_COMMAND.to_vec(),
            busy_min_display_ms: constants::feedback::BUSY_MIN_DISPLAY_MS,
            request_filters: Vec::new(),
            auto_activate: true,
        }
    }
}

impl DrawerConfig {
    /// Parse a deployment's JSON settings; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig::new(self.baud_rate)
    }

    pub fn busy_min_display(&self) -> Duration {
        Duration::from_millis(self.busy_min_display_ms)
    }
}
