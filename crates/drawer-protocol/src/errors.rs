//! Error Handling Guidelines
//!
//! Every session failure is handled where it happens and reduced to an
//! outcome for the activation gate. Messages say what failed and carry the
//! transport's own message when there is one:
//!
//! - ✅ "Failed to open serial port: Network error: device disconnected"
//! - ❌ "Error"

use thiserror::Error;

/// Failures of one open → write → close session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawerError {
    /// User dismissed the device picker
    #[error("Device selection cancelled")]
    SelectionCancelled,

    /// Platform refused the device request
    #[error("Device selection denied: {0}")]
    SelectionDenied(String),

    /// Transport refused to open the device
    #[error("Failed to open serial port: {0}")]
    OpenFailed(String),

    /// Open device has no obtainable writer
    #[error("Could not write to serial port: {0}")]
    WriteUnavailable(String),

    /// Writer rejected the payload
    #[error("Write to serial port failed: {0}")]
    WriteFailed(String),

    /// Transport refused to close the device
    #[error("Failed to close serial port: {0}")]
    CloseFailed(String),

    /// Write attempted without an open device
    #[error("No serial port open")]
    NotOpen,

    /// Connection state machine rejected a transition
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),
}
