// libacio/src/device/responder.rs

use crate::constants::ACIO_SOF;
use crate::protocol::{Frame, Message};
use crate::transport::RingBuffer;

/// Writes encoded frames into the bus response buffer.
pub struct Responder<'a> {
    buf: &'a mut RingBuffer<u8>,
    frames: usize,
}

impl<'a> Responder<'a> {
    pub fn new(buf: &'a mut RingBuffer<u8>) -> Self {
        Self { buf, frames: 0 }
    }

    /// Encode `msg` and queue it.
    pub fn send(&mut self, msg: &Message) {
        self.put(&Frame::encode(msg));
        self.frames += 1;
    }

    pub fn reply(&mut self, req: &Message, payload: impl Into<Vec<u8>>) {
        self.send(&req.reply(payload));
    }

    pub fn reply_status(&mut self, req: &Message, status: u8) {
        self.send(&req.reply_status(status));
    }

    /// Answer a link handshake with two bare SOF bytes.
    pub fn handshake(&mut self) {
        self.put(&[ACIO_SOF, ACIO_SOF]);
    }

    /// Frames queued through this responder.
    pub fn frames_sent(&self) -> usize {
        self.frames
    }

    fn put(&mut self, bytes: &[u8]) {
        let evicted = self.buf.put_all(bytes.iter().copied());
        if evicted > 0 {
            log::warn!(
                target: "acio",
                "response buffer full, dropped {} unread byte(s)",
                evicted
            );
        }
    }
}
