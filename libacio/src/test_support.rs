//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers build request frames the way a game writes them and wire an
//! ICCA reader to a bus with mock input and a manual clock.
#![allow(dead_code)]

use std::sync::Arc;

use crate::bus::Bus;
use crate::device::{Device, IccaConfig, IccaDevice};
use crate::input::MockInput;
use crate::protocol::{Decoded, Frame, FrameDecoder, Message};
use crate::utils::ManualClock;
use crate::Result;

/// Encode a command the way games send it: a single SOF followed by the
/// stuffed body. (Replies carry two SOFs; a request with two would also
/// trigger a handshake.)
#[doc(hidden)]
pub fn command_frame(addr: u8, code: u16, pid: u8, payload: &[u8]) -> Vec<u8> {
    request_wire(&Message::command(addr, code, pid, payload.to_vec()))
}

#[doc(hidden)]
pub fn broadcast_frame(payload: &[u8]) -> Vec<u8> {
    request_wire(&Message::broadcast(payload.to_vec()))
}

#[doc(hidden)]
pub fn request_wire(msg: &Message) -> Vec<u8> {
    Frame::encode(msg)[1..].to_vec()
}

/// Decode every complete frame in a response byte stream, skipping
/// handshake answers.
#[doc(hidden)]
pub fn decode_responses(bytes: &[u8]) -> Vec<Message> {
    let mut dec = FrameDecoder::new();
    bytes
        .iter()
        .filter_map(|&b| match dec.push(b) {
            Some(Decoded::Frame(m)) => Some(m),
            _ => None,
        })
        .collect()
}

/// A bus with one ICCA reader behind optional leading devices.
#[doc(hidden)]
pub struct IccaHarness {
    pub bus: Bus,
    pub input: Arc<MockInput>,
    pub clock: Arc<ManualClock>,
    /// Bus address of the reader's first unit.
    pub first_addr: u8,
    pid: u8,
}

impl IccaHarness {
    /// Reader alone on the bus. The keypad poller is always disabled; tests
    /// drive scans through status requests.
    pub fn new(config: IccaConfig) -> Result<Self> {
        Self::after(Vec::new(), config)
    }

    /// Reader registered after `leading` devices.
    pub fn after(leading: Vec<Box<dyn Device>>, config: IccaConfig) -> Result<Self> {
        let input = Arc::new(MockInput::new(config.units as usize));
        let clock = Arc::new(ManualClock::new());
        let reader = IccaDevice::with_clock(
            config.with_keypad_thread(false),
            input.clone(),
            clock.clone(),
        )?;

        let mut bus = Bus::new();
        for dev in leading {
            bus.register_device(dev)?;
        }
        let first_addr = bus.register_device(Box::new(reader))?;
        Ok(Self {
            bus,
            input,
            clock,
            first_addr,
            pid: 0,
        })
    }

    /// Send one command to `unit` of the reader and return its reply.
    pub fn request(&mut self, unit: u8, code: u16, payload: &[u8]) -> Option<Message> {
        self.request_addr(self.first_addr + unit, code, payload)
    }

    /// Send one command to a raw bus address.
    pub fn request_addr(&mut self, addr: u8, code: u16, payload: &[u8]) -> Option<Message> {
        self.pid = self.pid.wrapping_add(1);
        let wire = command_frame(addr, code, self.pid, payload);
        decode_responses(&self.bus.feed(&wire)).into_iter().next()
    }
}
