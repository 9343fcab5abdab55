//! WebSerial host for the drawer session.
//!
//! `WebSerialHost` wraps `navigator.serial`; its handles wrap `SerialPort`.
//! Only available on wasm32, and the build needs
//! `RUSTFLAGS="--cfg=web_sys_unstable_apis"` (set in `.cargo/config.toml`).
//! DOM error classification is plain Rust and available everywhere.

pub mod errors;

#[cfg(target_arch = "wasm32")]
mod host;

pub use errors::classify_dom_error;

#[cfg(target_arch = "wasm32")]
pub use host::{WebSerialHost, WebSerialPort, WebSerialWriter};
