//! Browser entry point: one button wired to the activation gate.
//!
//! Build with `trunk build --release` (WebSerial needs the
//! `web_sys_unstable_apis` cfg from `.cargo/config.toml`).

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(app::App);
}
