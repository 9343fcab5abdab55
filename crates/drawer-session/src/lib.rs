//! # Drawer Session
//!
//! The three components that turn one button press into one open → write →
//! close cycle against a serial cash drawer.
//!
//! - **PortRegistry**: reuses a previously authorized device, or prompts for one
//! - **ConnectionController**: owns the (single) open handle and its state machine
//! - **ActivationGate**: lets one session run at a time and drives the busy indicator
//!
//! Everything runs on a single-threaded executor. Components share state
//! through `Cell`/`RefCell`, and no borrow is held across an await point.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod config;
pub mod constants;
pub mod controller;
pub mod gate;
pub mod registry;

pub use config::DrawerConfig;
pub use controller::{ConnectOutcome, ConnectionController};
pub use gate::{ActivationGate, ActivationOutcome, FeedbackSink, SessionOutcome};
pub use registry::{PortRegistry, Selection};
