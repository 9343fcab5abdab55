use crate::registry::PortRegistry;
use core_types::{DeviceHandle, PortInfo, SerialConfig, SerialHost, StreamWriter};
use drawer_protocol::{ConnectionState, DrawerError};
use drawer_runtime::{drawer_debug, drawer_error, drawer_info, drawer_warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Result of `ConnectionController::connect`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A handle is open and held by the controller
    Connected,
    /// No authorized device and the prompt produced none
    NoDevice,
    /// The transport refused to open the resolved device
    OpenFailed(DrawerError),
    /// A handle is already held or another connect is in progress
    Busy,
    /// `disconnect()` ran while the device was opening; it was closed again
    Cancelled,
}

impl ConnectOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// ConnectionController owns at most one open device handle
///
/// Responsibilities:
/// - Resolve a device through the registry and open it
/// - Write a payload through the handle's exclusive writer
/// - Close and discard the handle, whatever the transport reports
/// - Track the connection state machine
///
/// The handle lives behind `Rc` so a pending write keeps it alive while
/// `disconnect()` takes the controller's reference out.
pub struct ConnectionController<H: SerialHost> {
    registry: PortRegistry<H>,
    config: SerialConfig,
    port: RefCell<Option<Rc<H::Handle>>>,
    state: Cell<ConnectionState>,
    close_requested: Cell<bool>,
}

impl<H: SerialHost> ConnectionController<H> {
    pub fn new(registry: PortRegistry<H>, config: SerialConfig) -> Self {
        Self {
            registry,
            config,
            port: RefCell::new(None),
            state: Cell::new(ConnectionState::Idle),
            close_requested: Cell::new(false),
        }
    }

    pub fn registry(&self) -> &PortRegistry<H> {
        &self.registry
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.port.borrow().is_some()
    }

    /// Info of the held handle, if one is open
    pub fn port_info(&self) -> Option<PortInfo> {
        self.port.borrow().as_ref().map(|port| port.info())
    }

    fn transition(&self, new_state: ConnectionState) -> Result<(), DrawerError> {
        let old_state = self.state.get();
        if !old_state.can_transition_to(new_state) {
            return Err(DrawerError::InvalidTransition(format!(
                "{:?} → {:?}",
                old_state, new_state
            )));
        }

        self.state.set(new_state);
        drawer_debug!("Controller: {:?} → {:?}", old_state, new_state);
        Ok(())
    }

    /// Transition that the lifecycle guarantees is valid; logged if it is not.
    fn advance(&self, new_state: ConnectionState) {
        if let Err(e) = self.transition(new_state) {
            drawer_warn!("Controller: {}", e);
            self.state.set(new_state);
        }
    }

    /// Resolve a device and open it at the configured baud rate.
    pub async fn connect(&self) -> ConnectOutcome {
        if self.is_open() {
            drawer_error!("Controller: connect() while a port is already open");
            return ConnectOutcome::Busy;
        }
        if let Err(e) = self.transition(ConnectionState::Opening) {
            drawer_error!("Controller: connect() rejected: {}", e);
            return ConnectOutcome::Busy;
        }
        self.close_requested.set(false);

        let Some(port) = self.registry.resolve().await else {
            drawer_debug!("Controller: No device selected");
            self.advance(ConnectionState::Idle);
            return ConnectOutcome::NoDevice;
        };

        let info = port.info();
        match port.open(&self.config).await {
            Ok(()) if self.close_requested.replace(false) => {
                drawer_info!("Controller: Disconnect requested while opening {}", info);
                if let Err(e) = port.close().await {
                    let err = DrawerError::CloseFailed(e.to_string());
                    drawer_error!("Controller: {} ({})", err, info);
                }
                self.advance(ConnectionState::Idle);
                ConnectOutcome::Cancelled
            }
            Ok(()) => {
                *self.port.borrow_mut() = Some(Rc::new(port));
                self.advance(ConnectionState::Open);
                drawer_info!("Controller: Opened {} @ {} baud", info, self.config.baud_rate);
                ConnectOutcome::Connected
            }
            Err(e) => {
                let err = DrawerError::OpenFailed(e.to_string());
                drawer_error!("Controller: {} ({})", err, info);
                self.advance(ConnectionState::Idle);
                ConnectOutcome::OpenFailed(err)
            }
        }
    }

    /// Write `payload` through the open handle's writer, then release the lock.
    ///
    /// Without an open handle this logs and does nothing.
    pub async fn write(&self, payload: &[u8]) -> Result<(), DrawerError> {
        let Some(port) = self.port.borrow().clone() else {
            drawer_error!("Controller: {}", DrawerError::NotOpen);
            return Err(DrawerError::NotOpen);
        };

        if let Err(e) = self.transition(ConnectionState::Writing) {
            drawer_error!("Controller: write() rejected: {}", e);
            return Err(e);
        }

        let mut writer = match port.writer() {
            Ok(writer) => writer,
            Err(e) => {
                let err = DrawerError::WriteUnavailable(e.to_string());
                drawer_error!("Controller: {}", err);
                self.advance(ConnectionState::Open);
                return Err(err);
            }
        };

        let result = writer.write(payload).await;
        writer.release_lock();

        // disconnect() may have taken the handle during the write
        if self.state.get() == ConnectionState::Writing {
            self.advance(ConnectionState::Open);
        }

        match result {
            Ok(()) => {
                drawer_debug!("Controller: Wrote {} bytes", payload.len());
                Ok(())
            }
            Err(e) => {
                let err = DrawerError::WriteFailed(e.to_string());
                drawer_error!("Controller: {}", err);
                Err(err)
            }
        }
    }

    /// Take the handle out of the controller and close it.
    ///
    /// Safe to call at any time and any number of times. The handle is
    /// discarded and the state returns to Idle even when close fails.
    /// During Opening the pending `connect()` closes the device itself once
    /// `open` returns.
    pub async fn disconnect(&self) -> Result<(), DrawerError> {
        let Some(port) = self.port.borrow_mut().take() else {
            if self.state.get() == ConnectionState::Opening {
                drawer_debug!("Controller: disconnect() while opening, close deferred");
                self.close_requested.set(true);
            } else {
                drawer_debug!("Controller: disconnect() with no open port");
            }
            return Ok(());
        };

        self.advance(ConnectionState::Closing);
        let info = port.info();
        let result = port.close().await;
        drop(port);
        self.advance(ConnectionState::Idle);

        match result {
            Ok(()) => {
                drawer_info!("Controller: Closed {}", info);
                Ok(())
            }
            Err(e) => {
                let err = DrawerError::CloseFailed(e.to_string());
                drawer_error!("Controller: {} ({})", err, info);
                Err(err)
            }
        }
    }
}
