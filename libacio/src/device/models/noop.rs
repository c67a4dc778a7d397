// libacio/src/device/models/noop.rs

use crate::device::{Device, Responder};
use crate::protocol::Message;

/// Occupies a node range without answering anything, like a board that is
/// wired to the bus but not emulated.
pub struct NoopDevice {
    node_count: u8,
}

impl NoopDevice {
    pub fn new(node_count: u8) -> Self {
        Self { node_count }
    }
}

impl Device for NoopDevice {
    fn name(&self) -> &str {
        "NOOP"
    }

    fn node_count(&self) -> u8 {
        self.node_count
    }

    fn handle(&mut self, _node: u8, _msg: &Message, _out: &mut Responder<'_>) -> bool {
        false
    }
}
