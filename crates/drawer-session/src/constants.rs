//! Fixed transport and timing values for the drawer session
//!
//! These are the defaults behind `DrawerConfig`. Change them there for a
//! deployment; change them here only with the drawer hardware at hand.

/// Serial transport parameters
pub mod port {
    /// Baud rate the drawer interface is opened at
    ///
    /// **Value**: 9600
    ///
    /// **Rationale**: Receipt printer and cash drawer kick interfaces run at
    /// 9600 8N1. Only the baud rate is passed to `open()`; data bits, parity,
    /// stop bits and flow control stay at the host defaults (8N1, none).
    pub const BAUD_RATE: u32 = 9600;

    /// Bytes sent to the drawer on every activation
    ///
    /// **Value**: `"hello"` in ASCII, `[104, 101, 108, 108, 111]`
    ///
    /// Sent as a single write call. Stands in for the device command.
    pub const DRAWER_COMMAND: [u8; 5] = [104, 101, 108, 108, 111];
}

/// Busy indicator timing
pub mod feedback {
    /// Delay between session completion and returning to Idle (milliseconds)
    ///
    /// **Value**: 200ms
    ///
    /// **Rationale**: With a previously authorized device the whole
    /// open → write → close cycle finishes in a few milliseconds. Without
    /// the delay the button flickers and the operator never sees that the
    /// press was taken.
    pub const BUSY_MIN_DISPLAY_MS: u64 = 200;
}
