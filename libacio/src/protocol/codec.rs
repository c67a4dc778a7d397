// libacio/src/protocol/codec.rs

use crate::constants::{
    ACIO_BROADCAST, ACIO_ESCAPE, ACIO_SOF, MSG_BROADCAST_HEADER_SIZE, MSG_HEADER_SIZE,
    READ_BUFFER_CAPACITY,
};
use crate::transport::RingBuffer;

use super::{Frame, Message};

/// Outcome of feeding one wire byte into the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Two consecutive literal SOF bytes outside a frame. The link partner
    /// expects two SOF bytes back.
    Handshake,
    /// A complete frame whose checksum matched.
    Frame(Message),
}

/// Byte-at-a-time ACIO frame decoder.
///
/// The accumulator always starts with a literal SOF. Bytes seen before any
/// SOF are dropped, and every literal SOF restarts the accumulator, so only
/// the most recent frame start is kept. Completeness is decided from the
/// declared data size; checksum failures drop the frame silently.
#[derive(Debug)]
pub struct FrameDecoder {
    buf: RingBuffer<u8>,
    invert: bool,
    sof_run: usize,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::with_capacity(READ_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RingBuffer::new(capacity),
            invert: false,
            sof_run: 0,
        }
    }

    /// Logical bytes currently accumulated, including the leading SOF.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn reset(&mut self) {
        self.buf.clear();
        self.invert = false;
        self.sof_run = 0;
    }

    /// Feed one wire byte.
    pub fn push(&mut self, byte: u8) -> Option<Decoded> {
        if byte == ACIO_SOF && !self.invert {
            self.buf.clear();
            self.buf.put(ACIO_SOF);

            self.sof_run += 1;
            if self.sof_run >= 2 {
                self.sof_run = 0;
                return Some(Decoded::Handshake);
            }
            return None;
        }
        self.sof_run = 0;

        let logical = if self.invert {
            self.invert = false;
            !byte
        } else if byte == ACIO_ESCAPE {
            self.invert = true;
            return None;
        } else {
            byte
        };

        // nothing to attach to without a frame start
        if self.buf.is_empty() {
            return None;
        }

        if self.buf.is_full() {
            log::warn!(
                target: "acio",
                "read buffer overflow after {} bytes, dropping partial frame",
                self.buf.len()
            );
            self.reset();
            return None;
        }
        self.buf.put(logical);

        let total = self.frame_len()?;
        if self.buf.len() < total {
            return None;
        }

        let bytes = self.buf.drain_all();
        let frame = &bytes[1..total];

        #[cfg(feature = "diagnostics")]
        log::info!(target: "acio", "MSG RECV: {}", crate::utils::bytes_to_hex(&bytes));

        match Frame::parse(frame) {
            Ok(msg) => Some(Decoded::Frame(msg)),
            Err(e) => {
                log::debug!(
                    target: "acio",
                    "dropping frame {}: {}",
                    crate::utils::bytes_to_hex(frame),
                    e
                );
                None
            }
        }
    }

    /// Total logical length (SOF through checksum) of the frame being
    /// accumulated, once its data size byte has arrived.
    fn frame_len(&self) -> Option<usize> {
        let addr = *self.buf.peek(1)?;
        let header_len = if addr == ACIO_BROADCAST {
            MSG_BROADCAST_HEADER_SIZE
        } else {
            MSG_HEADER_SIZE
        };
        let size = *self.buf.peek(header_len)? as usize;
        Some(1 + header_len + size + 1)
    }
}
