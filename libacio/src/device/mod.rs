// libacio/src/device/mod.rs

pub mod models;
pub mod responder;

pub use models::icca::{HardwareRevision, IccaConfig, IccaDevice, WorkflowState};
pub use models::noop::NoopDevice;
pub use responder::Responder;

use crate::protocol::Message;

/// A board attached to the emulated bus.
///
/// A device owns `node_count` consecutive bus addresses starting right after
/// the addresses of every device registered before it.
pub trait Device: Send {
    /// Short board name used in logs.
    fn name(&self) -> &str;

    /// Number of consecutive node addresses this device occupies.
    fn node_count(&self) -> u8;

    /// Whether `addr` falls inside this device's node range when the device
    /// starts at `node_offset`. Node addresses are 1-based.
    fn is_applicable(&self, node_offset: u8, addr: u8) -> bool {
        let addr = addr as u16;
        let offset = node_offset as u16;
        addr > offset && addr <= offset + self.node_count() as u16
    }

    /// Handle a message addressed to `node` (0-based, relative to this
    /// device's first address). Returns `true` when the message was
    /// understood and a response has been queued on `out`; `false` leaves
    /// the message unanswered.
    fn handle(&mut self, node: u8, msg: &Message, out: &mut Responder<'_>) -> bool;
}
