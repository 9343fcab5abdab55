use std::time::Duration;

/// Suspend the current task for `duration`.
///
/// Uses the browser's `setTimeout` on WASM and the tokio timer on native.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Suspend the current task for `duration`.
///
/// Uses the browser's `setTimeout` on WASM and the tokio timer on native.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
