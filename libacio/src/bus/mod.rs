//! The emulated bus: wire codec in, device dispatch, encoded replies out.

pub mod builder;
pub mod registry;

pub use builder::BusBuilder;
pub use registry::{DeviceRegistry, Route};

use crate::constants::{
    ACIO_CMD_ASSIGN_ADDRS, ACIO_CMD_BROADCAST, ACIO_CMD_CLEAR, ACIO_CMD_KEEPALIVE,
    ACIO_CMD_STARTUP, RESPONSE_BUFFER_CAPACITY,
};
use crate::device::{Device, Responder};
use crate::protocol::{Decoded, FrameDecoder, Message};
use crate::transport::{ByteStream, RingBuffer};
use crate::utils::bytes_to_hex;
use crate::Result;

/// Bus master endpoint seen by the game.
///
/// Bytes written by the game are decoded frame by frame and dispatched
/// synchronously; every reply is encoded into the response buffer before
/// `write` returns.
pub struct Bus {
    decoder: FrameDecoder,
    response: RingBuffer<u8>,
    registry: DeviceRegistry,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            decoder: FrameDecoder::new(),
            response: RingBuffer::new(RESPONSE_BUFFER_CAPACITY),
            registry: DeviceRegistry::new(),
        }
    }

    pub fn builder() -> BusBuilder {
        BusBuilder::new()
    }

    /// Append a device after the ones already registered. Returns the first
    /// node address it was given.
    pub fn register_device(&mut self, device: Box<dyn Device>) -> Result<u8> {
        self.registry.register(device)
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Write `bytes` and return everything queued for the game.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<u8> {
        self.write_all(bytes);
        self.response.drain_all()
    }

    /// Route one decoded message. Returns whether a reply was queued.
    pub fn dispatch(&mut self, msg: &Message) -> bool {
        let mut out = Responder::new(&mut self.response);
        match self.registry.route(msg, &mut out) {
            Route::Handled => true,
            Route::Unhandled => {
                log_unhandled(msg);
                false
            }
            Route::Unclaimed => default_reply(self.registry.node_count(), msg, &mut out),
        }
    }

    /// Drop any partial frame and unread replies.
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.response.clear();
    }
}

/// Answers for messages no device owns.
fn default_reply(nodes: u8, msg: &Message, out: &mut Responder<'_>) -> bool {
    // broadcasts have no sender to answer
    let Some(code) = msg.code() else {
        return false;
    };

    match code {
        ACIO_CMD_ASSIGN_ADDRS if msg.addr == 0 && nodes > 0 => {
            log::debug!(target: "acio", "assigning {} node(s)", nodes);
            out.reply(msg, vec![nodes]);
            true
        }
        ACIO_CMD_CLEAR | ACIO_CMD_STARTUP | ACIO_CMD_KEEPALIVE | ACIO_CMD_BROADCAST => {
            out.reply_status(msg, 0x00);
            true
        }
        _ => {
            log_unhandled(msg);
            false
        }
    }
}

fn log_unhandled(msg: &Message) {
    log::debug!(
        target: "acio",
        "unhandled message: addr={:#04x} code={:#06x} data={}",
        msg.addr,
        msg.code().unwrap_or_default(),
        bytes_to_hex(&msg.payload)
    );
}

impl ByteStream for Bus {
    fn write(&mut self, byte: u8) {
        match self.decoder.push(byte) {
            Some(Decoded::Handshake) => Responder::new(&mut self.response).handshake(),
            Some(Decoded::Frame(msg)) => {
                self.dispatch(&msg);
            }
            None => {}
        }
    }

    fn read(&mut self) -> Option<u8> {
        self.response.get()
    }

    fn bytes_available(&self) -> usize {
        self.response.len()
    }
}
