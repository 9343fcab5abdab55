use core_types::TransportError;

/// Map a rejected WebSerial promise (a `DOMException`) onto `TransportError`.
///
/// WebSerial reports failures only through the exception name:
/// - `requestPort()` rejects with `NotFoundError` when the picker is dismissed
///   and `SecurityError` when the page may not ask
/// - `open()` rejects with `InvalidStateError` if the port is already open and
///   `NetworkError` if the OS could not open it
pub fn classify_dom_error(name: &str, message: &str) -> TransportError {
    match name {
        "NotFoundError" => TransportError::NotFound,
        "SecurityError" | "NotAllowedError" => TransportError::Security(message.to_string()),
        "NotSupportedError" => TransportError::NotSupported,
        "InvalidStateError" => TransportError::InvalidState(message.to_string()),
        "NetworkError" => TransportError::Network(message.to_string()),
        _ => TransportError::Io(format!("{}: {}", name, message)),
    }
}
