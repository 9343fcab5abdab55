//! # Drawer Runtime
//!
//! Platform glue shared by the drawer crates:
//! - **logging**: `drawer_debug!` / `drawer_info!` / `drawer_warn!` / `drawer_error!`
//! - **timer**: an async `sleep` for the browser event loop and for native tests

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::todo
)]

pub mod logging;
pub mod timer;

pub use timer::sleep;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
    #[cfg(target_arch = "wasm32")]
    pub use web_sys;
}
