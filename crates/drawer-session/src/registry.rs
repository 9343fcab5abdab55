use core_types::{DeviceHandle, PortFilter, SerialHost, TransportError};
use drawer_protocol::DrawerError;
use drawer_runtime::{drawer_debug, drawer_info, drawer_warn};

/// How `PortRegistry::resolve_selection` obtained (or failed to obtain) a handle
#[derive(Debug)]
pub enum Selection<P> {
    /// Reused a device the user authorized earlier
    Authorized(P),
    /// User picked a device in the prompt
    Granted(P),
    /// User dismissed the prompt
    Cancelled,
    /// Platform refused the prompt
    Denied(String),
}

impl<P> Selection<P> {
    pub fn into_handle(self) -> Option<P> {
        match self {
            Self::Authorized(handle) | Self::Granted(handle) => Some(handle),
            Self::Cancelled | Self::Denied(_) => None,
        }
    }
}

/// PortRegistry produces one authorized device handle per session
///
/// Previously authorized devices are preferred; the user is prompted only
/// when there are none.
pub struct PortRegistry<H: SerialHost> {
    host: H,
    filters: Vec<PortFilter>,
}

impl<H: SerialHost> PortRegistry<H> {
    pub fn new(host: H) -> Self {
        Self::with_filters(host, Vec::new())
    }

    pub fn with_filters(host: H, filters: Vec<PortFilter>) -> Self {
        Self { host, filters }
    }

    /// All devices currently authorized for this origin.
    ///
    /// A host failure is logged and reported as an empty list.
    pub async fn list_authorized(&self) -> Vec<H::Handle> {
        match self.host.list_authorized().await {
            Ok(handles) => handles,
            Err(e) => {
                drawer_warn!("Registry: Failed to list authorized ports: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn has_authorized(&self) -> bool {
        !self.list_authorized().await.is_empty()
    }

    /// The last authorized device, if any.
    pub async fn select_authorized(&self) -> Option<H::Handle> {
        let mut selected = None;
        for candidate in self.list_authorized().await {
            drawer_info!("Registry: Authorized candidate {}", candidate.info());
            selected = Some(candidate);
        }
        selected
    }

    /// Prompt the user for a new device.
    pub async fn request_new(&self) -> Result<H::Handle, DrawerError> {
        match self.host.request_new(&self.filters).await {
            Ok(handle) => {
                drawer_info!("Registry: User granted {}", handle.info());
                Ok(handle)
            }
            Err(TransportError::NotFound) => Err(DrawerError::SelectionCancelled),
            Err(e) => Err(DrawerError::SelectionDenied(e.to_string())),
        }
    }

    /// Reuse an authorized device, otherwise prompt, reporting which happened.
    pub async fn resolve_selection(&self) -> Selection<H::Handle> {
        if let Some(handle) = self.select_authorized().await {
            return Selection::Authorized(handle);
        }

        match self.request_new().await {
            Ok(handle) => Selection::Granted(handle),
            Err(DrawerError::SelectionCancelled) => {
                drawer_debug!("Registry: Device prompt dismissed");
                Selection::Cancelled
            }
            Err(e) => {
                drawer_warn!("Registry: {}", e);
                Selection::Denied(e.to_string())
            }
        }
    }

    /// Reuse an authorized device, otherwise prompt. Prompt failures are absent.
    pub async fn resolve(&self) -> Option<H::Handle> {
        self.resolve_selection().await.into_handle()
    }
}
