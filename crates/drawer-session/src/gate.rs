use crate::config::DrawerConfig;
use crate::controller::{ConnectOutcome, ConnectionController};
use crate::registry::PortRegistry;
use core_types::SerialHost;
use drawer_protocol::ActivationState;
use drawer_runtime::{drawer_debug, drawer_info, drawer_warn, sleep};
use futures_channel::mpsc::UnboundedSender;
use std::cell::Cell;
use std::time::Duration;

/// Receives the gate's busy/idle transitions (UI feedback)
pub trait FeedbackSink {
    fn on_state(&self, state: ActivationState);
}

impl<F: Fn(ActivationState)> FeedbackSink for F {
    fn on_state(&self, state: ActivationState) {
        self(state)
    }
}

impl FeedbackSink for UnboundedSender<ActivationState> {
    fn on_state(&self, state: ActivationState) {
        if let Err(e) = self.unbounded_send(state) {
            drawer_warn!("Gate: Feedback receiver gone, dropped {:?}", e.into_inner());
        }
    }
}

/// How one accepted activation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Payload written and the port closed (or close attempted)
    Delivered,
    /// No device authorized and none granted
    NoDevice,
    /// Device resolved but could not be opened
    OpenFailed,
    /// Device opened but the payload did not go out
    WriteFailed,
    /// Controller refused the sequence or dropped it before writing
    Rejected,
}

impl SessionOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Result of an activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// A session was already in flight; nothing ran
    Ignored,
    /// Startup auto-activation did not apply
    Skipped,
    /// A session ran to completion
    Completed(SessionOutcome),
}

/// ActivationGate runs at most one session at a time
///
/// Every accepted activation goes Idle → Busy, runs
/// connect → write → disconnect, waits the minimum display delay and goes
/// back to Idle. Triggers that arrive while Busy are dropped, not queued.
/// Construct one gate at startup and share it with the UI by reference.
pub struct ActivationGate<H: SerialHost, S: FeedbackSink> {
    controller: ConnectionController<H>,
    sink: S,
    state: Cell<ActivationState>,
    payload: Vec<u8>,
    busy_min_display: Duration,
    auto_activate: bool,
    auto_attempted: Cell<bool>,
}

impl<H: SerialHost, S: FeedbackSink> ActivationGate<H, S> {
    pub fn new(controller: ConnectionController<H>, sink: S, config: &DrawerConfig) -> Self {
        Self {
            controller,
            sink,
            state: Cell::new(ActivationState::Idle),
            payload: config.payload.clone(),
            busy_min_display: config.busy_min_display(),
            auto_activate: config.auto_activate,
            auto_attempted: Cell::new(false),
        }
    }

    /// Build the registry and controller for `host` from `config`.
    pub fn from_host(host: H, sink: S, config: &DrawerConfig) -> Self {
        let registry = PortRegistry::with_filters(host, config.request_filters.clone());
        let controller = ConnectionController::new(registry, config.serial_config());
        Self::new(controller, sink, config)
    }

    pub fn controller(&self) -> &ConnectionController<H> {
        &self.controller
    }

    pub fn state(&self) -> ActivationState {
        self.state.get()
    }

    fn set_state(&self, new_state: ActivationState) {
        let old_state = self.state.get();
        if !old_state.can_transition_to(new_state) {
            drawer_warn!("Gate: Unexpected {:?} → {:?}", old_state, new_state);
        }
        self.state.set(new_state);
        drawer_debug!("Gate: {:?} → {:?}", old_state, new_state);
        self.sink.on_state(new_state);
    }

    /// Handle one external trigger.
    pub async fn activate(&self) -> ActivationOutcome {
        if self.state.get().is_busy() {
            drawer_debug!("Gate: Activation ignored, session in flight");
            return ActivationOutcome::Ignored;
        }

        self.set_state(ActivationState::Busy);
        let outcome = self.run_session().await;
        sleep(self.busy_min_display).await;
        self.set_state(ActivationState::Idle);

        if outcome.is_delivered() {
            drawer_info!("Gate: Drawer command delivered");
        } else {
            drawer_warn!("Gate: Session ended without delivery: {:?}", outcome);
        }
        ActivationOutcome::Completed(outcome)
    }

    /// Activate once at startup if a device is already authorized.
    ///
    /// Only the first call per gate can activate.
    pub async fn auto_activate(&self) -> ActivationOutcome {
        if self.auto_attempted.replace(true) || !self.auto_activate {
            return ActivationOutcome::Skipped;
        }

        if !self.controller.registry().has_authorized().await {
            drawer_debug!("Gate: No authorized device, skipping startup activation");
            return ActivationOutcome::Skipped;
        }

        drawer_info!("Gate: Authorized device present, activating at startup");
        self.activate().await
    }

    async fn run_session(&self) -> SessionOutcome {
        let outcome = match self.controller.connect().await {
            ConnectOutcome::Connected => match self.controller.write(&self.payload).await {
                Ok(()) => SessionOutcome::Delivered,
                Err(_) => SessionOutcome::WriteFailed,
            },
            ConnectOutcome::NoDevice => SessionOutcome::NoDevice,
            ConnectOutcome::OpenFailed(_) => SessionOutcome::OpenFailed,
            // Another sequence owns the handle, or it is already closed
            ConnectOutcome::Busy | ConnectOutcome::Cancelled => return SessionOutcome::Rejected,
        };

        if let Err(e) = self.controller.disconnect().await {
            drawer_warn!("Gate: Session closed with {}", e);
        }
        outcome
    }
}
