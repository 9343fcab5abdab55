use crate::errors::classify_dom_error;
use core_types::{
    DeviceHandle, PortFilter, PortInfo, SerialConfig, SerialHost, StreamWriter, TransportError,
};
use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    DomException, Serial, SerialOptions, SerialPort, SerialPortRequestOptions, WritableStream,
    WritableStreamDefaultWriter,
};

fn js_error(value: JsValue) -> TransportError {
    match value.dyn_ref::<DomException>() {
        Some(exception) => classify_dom_error(&exception.name(), &exception.message()),
        None => TransportError::Io(format!("{:?}", value)),
    }
}

/// `navigator.serial` of the current window
pub struct WebSerialHost {
    serial: Serial,
}

impl WebSerialHost {
    pub fn from_window() -> Result<Self, TransportError> {
        let window = web_sys::window().ok_or(TransportError::NotSupported)?;
        let serial = window.navigator().serial();
        if serial.is_undefined() {
            return Err(TransportError::NotSupported);
        }
        Ok(Self { serial })
    }

    fn request_options(filters: &[PortFilter]) -> Result<SerialPortRequestOptions, TransportError> {
        let list = Array::new();
        for filter in filters {
            let entry = Object::new();
            if let Some(vid) = filter.usb_vendor_id {
                Reflect::set(&entry, &"usbVendorId".into(), &JsValue::from(vid))
                    .map_err(js_error)?;
            }
            if let Some(pid) = filter.usb_product_id {
                Reflect::set(&entry, &"usbProductId".into(), &JsValue::from(pid))
                    .map_err(js_error)?;
            }
            list.push(&entry);
        }

        let options = Object::new();
        Reflect::set(&options, &"filters".into(), &list).map_err(js_error)?;
        Ok(options.unchecked_into())
    }
}

impl SerialHost for WebSerialHost {
    type Handle = WebSerialPort;

    async fn list_authorized(&self) -> Result<Vec<WebSerialPort>, TransportError> {
        let ports = JsFuture::from(self.serial.get_ports())
            .await
            .map_err(js_error)?;
        let ports: Array = ports
            .dyn_into()
            .map_err(|_| TransportError::Io("getPorts() did not return an array".into()))?;

        Ok(ports
            .iter()
            .filter_map(|port| port.dyn_into::<SerialPort>().ok())
            .map(|port| WebSerialPort { port })
            .collect())
    }

    async fn request_new(&self, filters: &[PortFilter]) -> Result<WebSerialPort, TransportError> {
        let promise = if filters.is_empty() {
            self.serial.request_port()
        } else {
            self.serial
                .request_port_with_options(&Self::request_options(filters)?)
        };

        let port = JsFuture::from(promise).await.map_err(js_error)?;
        let port: SerialPort = port
            .dyn_into()
            .map_err(|_| TransportError::Io("requestPort() did not return a SerialPort".into()))?;
        Ok(WebSerialPort { port })
    }
}

/// One `SerialPort` granted to this origin
pub struct WebSerialPort {
    port: SerialPort,
}

impl DeviceHandle for WebSerialPort {
    type Writer = WebSerialWriter;

    fn info(&self) -> PortInfo {
        let info = self.port.get_info();
        let usb_id = |key: &str| {
            Reflect::get(&info, &key.into())
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v as u16)
        };

        PortInfo {
            usb_vendor_id: usb_id("usbVendorId"),
            usb_product_id: usb_id("usbProductId"),
        }
    }

    async fn open(&self, config: &SerialConfig) -> Result<(), TransportError> {
        let options = SerialOptions::new(config.baud_rate);
        JsFuture::from(self.port.open(&options))
            .await
            .map_err(js_error)?;
        Ok(())
    }

    fn writer(&self) -> Result<WebSerialWriter, TransportError> {
        // `writable` is null until the port is open and after it closes
        let stream: WritableStream = JsValue::from(self.port.writable())
            .dyn_into()
            .map_err(|_| TransportError::InvalidState("Port has no writable stream".into()))?;
        if stream.locked() {
            return Err(TransportError::InvalidState(
                "Writable stream is locked".into(),
            ));
        }

        let writer = stream.get_writer().map_err(js_error)?;
        Ok(WebSerialWriter { writer })
    }

    async fn close(&self) -> Result<(), TransportError> {
        JsFuture::from(self.port.close()).await.map_err(js_error)?;
        Ok(())
    }
}

/// Default writer of a port's writable stream
pub struct WebSerialWriter {
    writer: WritableStreamDefaultWriter,
}

impl StreamWriter for WebSerialWriter {
    async fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let chunk = Uint8Array::from(data);
        JsFuture::from(self.writer.write_with_chunk(&chunk))
            .await
            .map_err(js_error)?;
        Ok(())
    }

    fn release_lock(self) {
        self.writer.release_lock();
    }
}
