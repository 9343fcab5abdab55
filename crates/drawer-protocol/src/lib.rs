//! # Drawer Protocol
//!
//! State and error types for the cash drawer connection lifecycle.
//!
//! This crate has no dependency on any UI framework or on web-sys, so the
//! state machines can be tested in native Rust.
//!
//! - **ConnectionState**: open → write → close FSM driven by the controller
//! - **ActivationState**: process-wide Idle/Busy flag driven by the gate
//! - **DrawerError**: every failure a session can run into
//!
//! ```text
//! trigger → ActivationGate (Idle → Busy)
//!              ↓
//!           ConnectionController: Idle → Opening → Open → Writing → Open → Closing → Idle
//!              ↓
//!           ActivationGate (Busy → Idle)
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod errors;
pub mod state;

pub use errors::DrawerError;
pub use state::{ActivationState, ConnectionState};
