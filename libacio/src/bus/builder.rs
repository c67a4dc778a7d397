//! Builder for a [`Bus`] with its devices.

use super::Bus;
use crate::Result;
use crate::device::Device;

/// Collects devices in bus order and registers them on `build`.
#[derive(Default)]
pub struct BusBuilder {
    devices: Vec<Box<dyn Device>>,
}

impl BusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a device; its nodes follow those of the devices added before.
    pub fn with_device(mut self, device: impl Device + 'static) -> Self {
        self.devices.push(Box::new(device));
        self
    }

    pub fn with_boxed_device(mut self, device: Box<dyn Device>) -> Self {
        self.devices.push(device);
        self
    }

    /// Register every device. Fails if they need more nodes than the bus has.
    pub fn build(self) -> Result<Bus> {
        let mut bus = Bus::new();
        for device in self.devices {
            bus.register_device(device)?;
        }
        Ok(bus)
    }
}
