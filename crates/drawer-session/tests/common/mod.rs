//! In-memory serial host for exercising the session components natively.

#![allow(dead_code)]

use core_types::{
    DeviceHandle, PortFilter, PortInfo, SerialConfig, SerialHost, StreamWriter, TransportError,
};
use drawer_protocol::ActivationState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

/// Ordered record of every transport call, shared by a host and its ports.
pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// What the device picker does when prompted
#[derive(Debug, Clone)]
pub enum Prompt {
    Grant(MockPort),
    Cancel,
    Deny,
}

struct HostState {
    authorized: RefCell<Vec<MockPort>>,
    prompt: RefCell<Prompt>,
    prompts: Cell<usize>,
    last_filters: RefCell<Vec<PortFilter>>,
    list_error: RefCell<Option<TransportError>>,
    log: EventLog,
}

/// Cloning shares state, so tests keep a clone after moving one into the registry.
#[derive(Clone)]
pub struct MockHost {
    state: Rc<HostState>,
}

impl MockHost {
    pub fn new(log: &EventLog) -> Self {
        Self {
            state: Rc::new(HostState {
                authorized: RefCell::new(Vec::new()),
                prompt: RefCell::new(Prompt::Cancel),
                prompts: Cell::new(0),
                last_filters: RefCell::new(Vec::new()),
                list_error: RefCell::new(None),
                log: log.clone(),
            }),
        }
    }

    pub fn with_authorized(self, ports: Vec<MockPort>) -> Self {
        *self.state.authorized.borrow_mut() = ports;
        self
    }

    pub fn with_prompt(self, prompt: Prompt) -> Self {
        *self.state.prompt.borrow_mut() = prompt;
        self
    }

    pub fn failing_list(self, error: TransportError) -> Self {
        *self.state.list_error.borrow_mut() = Some(error);
        self
    }

    pub fn prompts(&self) -> usize {
        self.state.prompts.get()
    }

    pub fn last_filters(&self) -> Vec<PortFilter> {
        self.state.last_filters.borrow().clone()
    }
}

impl SerialHost for MockHost {
    type Handle = MockPort;

    async fn list_authorized(&self) -> Result<Vec<MockPort>, TransportError> {
        if let Some(error) = self.state.list_error.borrow().clone() {
            return Err(error);
        }
        Ok(self.state.authorized.borrow().clone())
    }

    async fn request_new(&self, filters: &[PortFilter]) -> Result<MockPort, TransportError> {
        self.state.prompts.set(self.state.prompts.get() + 1);
        *self.state.last_filters.borrow_mut() = filters.to_vec();
        self.state.log.borrow_mut().push("prompt".to_string());
        tokio::task::yield_now().await;

        let prompt = self.state.prompt.borrow().clone();
        match prompt {
            Prompt::Grant(port) => Ok(port),
            Prompt::Cancel => Err(TransportError::NotFound),
            Prompt::Deny => Err(TransportError::Security("Access denied".into())),
        }
    }
}

#[derive(Debug, Default)]
struct PortState {
    info: PortInfo,
    open: Cell<bool>,
    baud: Cell<Option<u32>>,
    opens: Cell<usize>,
    closes: Cell<usize>,
    locked: Cell<bool>,
    no_writable: Cell<bool>,
    open_error: RefCell<Option<TransportError>>,
    write_error: RefCell<Option<TransportError>>,
    close_error: RefCell<Option<TransportError>>,
    written: RefCell<Vec<Vec<u8>>>,
}

#[derive(Debug, Clone)]
pub struct MockPort {
    pub name: &'static str,
    state: Rc<PortState>,
    log: EventLog,
}

impl MockPort {
    pub fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            state: Rc::new(PortState::default()),
            log: log.clone(),
        }
    }

    pub fn usb(name: &'static str, vid: u16, pid: u16, log: &EventLog) -> Self {
        Self {
            name,
            state: Rc::new(PortState {
                info: PortInfo::usb(vid, pid),
                ..PortState::default()
            }),
            log: log.clone(),
        }
    }

    pub fn set_open_error(&self, error: Option<TransportError>) {
        *self.state.open_error.borrow_mut() = error;
    }

    pub fn set_write_error(&self, error: Option<TransportError>) {
        *self.state.write_error.borrow_mut() = error;
    }

    pub fn set_close_error(&self, error: Option<TransportError>) {
        *self.state.close_error.borrow_mut() = error;
    }

    pub fn set_no_writable(&self, value: bool) {
        self.state.no_writable.set(value);
    }

    pub fn is_open(&self) -> bool {
        self.state.open.get()
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked.get()
    }

    pub fn baud(&self) -> Option<u32> {
        self.state.baud.get()
    }

    pub fn opens(&self) -> usize {
        self.state.opens.get()
    }

    pub fn closes(&self) -> usize {
        self.state.closes.get()
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.state.written.borrow().clone()
    }

    fn record(&self, event: String) {
        self.log.borrow_mut().push(event);
    }
}

impl DeviceHandle for MockPort {
    type Writer = MockWriter;

    fn info(&self) -> PortInfo {
        self.state.info.clone()
    }

    async fn open(&self, config: &SerialConfig) -> Result<(), TransportError> {
        tokio::task::yield_now().await;
        self.state.opens.set(self.state.opens.get() + 1);
        self.record(format!("open {} @ {}", self.name, config.baud_rate));

        if let Some(error) = self.state.open_error.borrow().clone() {
            return Err(error);
        }
        if self.state.open.get() {
            return Err(TransportError::InvalidState("The port is already open.".into()));
        }
        self.state.open.set(true);
        self.state.baud.set(Some(config.baud_rate));
        Ok(())
    }

    fn writer(&self) -> Result<MockWriter, TransportError> {
        if self.state.no_writable.get() || !self.state.open.get() {
            return Err(TransportError::InvalidState("No writable stream".into()));
        }
        if self.state.locked.get() {
            return Err(TransportError::InvalidState("Stream is locked".into()));
        }
        self.state.locked.set(true);
        Ok(MockWriter { port: self.clone() })
    }

    async fn close(&self) -> Result<(), TransportError> {
        tokio::task::yield_now().await;
        self.state.closes.set(self.state.closes.get() + 1);
        self.record(format!("close {}", self.name));

        if let Some(error) = self.state.close_error.borrow().clone() {
            return Err(error);
        }
        self.state.open.set(false);
        Ok(())
    }
}

pub struct MockWriter {
    port: MockPort,
}

impl StreamWriter for MockWriter {
    async fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        tokio::task::yield_now().await;
        if let Some(error) = self.port.state.write_error.borrow().clone() {
            return Err(error);
        }
        self.port.state.written.borrow_mut().push(data.to_vec());
        self.port
            .record(format!("write {} {:?}", self.port.name, data));
        Ok(())
    }

    fn release_lock(self) {
        self.port.state.locked.set(false);
        self.port.record(format!("release {}", self.port.name));
    }
}

/// Busy/idle notifications with the instant each arrived.
pub type Transitions = Rc<RefCell<Vec<(ActivationState, Instant)>>>;

pub fn recording_sink() -> (Transitions, impl Fn(ActivationState)) {
    let transitions: Transitions = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let transitions = transitions.clone();
        move |state: ActivationState| transitions.borrow_mut().push((state, Instant::now()))
    };
    (transitions, sink)
}

pub fn states(transitions: &Transitions) -> Vec<ActivationState> {
    transitions.borrow().iter().map(|(state, _)| *state).collect()
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}
