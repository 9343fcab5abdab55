use serde::{Deserialize, Serialize};
use std::fmt;

pub mod transport;
pub use transport::{DeviceHandle, SerialHost, StreamWriter, TransportError};

/// Serial parameters passed to `DeviceHandle::open`.
///
/// Only the baud rate is negotiated. Data bits, parity, stop bits and flow
/// control are left at the host's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialConfig {
    pub baud_rate: u32,
}

impl SerialConfig {
    pub fn new(baud_rate: u32) -> Self {
        Self { baud_rate }
    }
}

/// Identifying information a host reports for a device handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortInfo {
    pub usb_vendor_id: Option<u16>,
    pub usb_product_id: Option<u16>,
}

impl PortInfo {
    pub fn usb(vendor_id: u16, product_id: u16) -> Self {
        Self {
            usb_vendor_id: Some(vendor_id),
            usb_product_id: Some(product_id),
        }
    }
}

impl fmt::Display for PortInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.usb_vendor_id, self.usb_product_id) {
            (Some(vid), Some(pid)) => write!(f, "USB {:04X}:{:04X}", vid, pid),
            (Some(vid), None) => write!(f, "USB {:04X}:????", vid),
            _ => write!(f, "serial port (no USB info)"),
        }
    }
}

/// Narrows the host's device picker to matching USB devices.
///
/// An empty filter list lets the user pick any serial device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortFilter {
    #[serde(default)]
    pub usb_vendor_id: Option<u16>,
    #[serde(default)]
    pub usb_product_id: Option<u16>,
}
