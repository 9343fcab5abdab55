use crate::{PortFilter, PortInfo, SerialConfig};
use thiserror::Error;

/// Errors raised by the host serial capability.
///
/// Variants follow the failure classes a WebSerial host reports; other hosts
/// map their errors onto the closest one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The user dismissed the device picker without choosing a device.
    #[error("No device selected")]
    NotFound,
    /// The platform refused access to the device or the picker.
    #[error("Access denied: {0}")]
    Security(String),
    /// The host has no serial capability.
    #[error("Serial API not supported")]
    NotSupported,
    /// The device is already open, closing, or its stream is locked.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// The device went away or the OS could not open it.
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO Error: {0}")]
    Io(String),
}

/// The host-provided serial capability (e.g. `navigator.serial`).
///
/// All methods are async and run on a single-threaded executor, so no `Send`
/// bounds are placed on the futures or the handles.
#[allow(async_fn_in_trait)]
pub trait SerialHost {
    type Handle: DeviceHandle;

    /// Devices the user has already authorized for this origin.
    async fn list_authorized(&self) -> Result<Vec<Self::Handle>, TransportError>;

    /// Ask the user to authorize a new device.
    async fn request_new(&self, filters: &[PortFilter]) -> Result<Self::Handle, TransportError>;
}

/// One serial device, open or openable.
#[allow(async_fn_in_trait)]
pub trait DeviceHandle {
    type Writer: StreamWriter;

    fn info(&self) -> PortInfo;

    async fn open(&self, config: &SerialConfig) -> Result<(), TransportError>;

    /// Acquire the exclusive writer for the device's output stream.
    ///
    /// Fails when the device has no writable stream (not open, closed
    /// underneath) or another writer holds the lock.
    fn writer(&self) -> Result<Self::Writer, TransportError>;

    async fn close(&self) -> Result<(), TransportError>;
}

/// An exclusive lock over a device's output stream.
#[allow(async_fn_in_trait)]
pub trait StreamWriter {
    async fn write(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Give the stream lock back without closing the device.
    fn release_lock(self);
}
