/// Logging macros for the drawer session
///
/// - WASM: written to `web_sys::console`, so they show up in devtools
/// - Native: forwarded to `tracing` at the matching level
///
/// Debug output is compiled only in debug builds. Warnings and errors are
/// always compiled; they are the only record of a failed session.
///
/// # Example
/// ```
/// use drawer_runtime::drawer_debug;
/// drawer_debug!("Controller: {:?} → {:?}", "Idle", "Opening");
/// ```
#[macro_export]
macro_rules! drawer_debug {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            #[cfg(target_arch = "wasm32")]
            $crate::__private::web_sys::console::log_1(&format!($($arg)*).into());
            #[cfg(not(target_arch = "wasm32"))]
            $crate::__private::tracing::debug!("{}", format!($($arg)*));
        }
    };
}

/// Log info-level message
///
/// Use for completed lifecycle steps (port opened, payload sent, port closed)
#[macro_export]
macro_rules! drawer_info {
    ($($arg:tt)*) => {
        {
            #[cfg(target_arch = "wasm32")]
            $crate::__private::web_sys::console::info_1(&format!($($arg)*).into());
            #[cfg(not(target_arch = "wasm32"))]
            $crate::__private::tracing::info!("{}", format!($($arg)*));
        }
    };
}

/// Log warning-level message
#[macro_export]
macro_rules! drawer_warn {
    ($($arg:tt)*) => {
        {
            #[cfg(target_arch = "wasm32")]
            $crate::__private::web_sys::console::warn_1(&format!($($arg)*).into());
            #[cfg(not(target_arch = "wasm32"))]
            $crate::__private::tracing::warn!("{}", format!($($arg)*));
        }
    };
}

/// Log error-level message
#[macro_export]
macro_rules! drawer_error {
    ($($arg:tt)*) => {
        {
            #[cfg(target_arch = "wasm32")]
            $crate::__private::web_sys::console::error_1(&format!($($arg)*).into());
            #[cfg(not(target_arch = "wasm32"))]
            $crate::__private::tracing::error!("{}", format!($($arg)*));
        }
    };
}
