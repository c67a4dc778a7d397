//! Ordered device list and node address resolution.

use crate::constants::MAX_NODE_ADDR;
use crate::device::{Device, Responder};
use crate::error::{Error, Result};
use crate::protocol::Message;

struct Entry {
    device: Box<dyn Device>,
    /// Nodes owned by every device registered before this one.
    offset: u8,
}

/// Result of offering a message to the registered devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The owning device answered.
    Handled,
    /// A device owns the address but did not understand the message.
    Unhandled,
    /// No device owns the address.
    Unclaimed,
}

/// Devices in registration order. Addresses are handed out contiguously:
/// the first device owns `1..=n1`, the second `n1+1..=n1+n2` and so on.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Vec<Entry>,
    nodes: u8,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `device` and return its first node address.
    pub fn register(&mut self, device: Box<dyn Device>) -> Result<u8> {
        let requested = device.node_count();
        let available = MAX_NODE_ADDR - self.nodes;
        if requested > available {
            return Err(Error::AddressSpaceExhausted {
                requested: requested as usize,
                available: available as usize,
            });
        }

        let offset = self.nodes;
        log::debug!(
            target: "acio",
            "registered {} at nodes {}..={}",
            device.name(),
            offset + 1,
            offset + requested
        );
        self.nodes += requested;
        self.devices.push(Entry { device, offset });
        Ok(offset + 1)
    }

    /// Total number of nodes on the bus.
    pub fn node_count(&self) -> u8 {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|e| e.device.name())
    }

    /// Index and node offset of the device owning `addr`.
    pub fn resolve(&self, addr: u8) -> Option<(usize, u8)> {
        self.devices
            .iter()
            .position(|e| e.device.is_applicable(e.offset, addr))
            .map(|i| (i, self.devices[i].offset))
    }

    /// Hand `msg` to the first device owning its address. The device sees
    /// its node relative to its own range (0 = first node). A device that
    /// declines keeps the message; later devices are not asked.
    pub fn route(&mut self, msg: &Message, out: &mut Responder<'_>) -> Route {
        let Some((index, offset)) = self.resolve(msg.addr) else {
            return Route::Unclaimed;
        };
        let node = msg.addr - offset - 1;
        if self.devices[index].device.handle(node, msg, out) {
            Route::Handled
        } else {
            Route::Unhandled
        }
    }
}
