// libacio/src/protocol/frame.rs

use crate::constants::{
    ACIO_BROADCAST, ACIO_RESPONSE_FLAG, ACIO_SOF, MSG_BROADCAST_HEADER_SIZE, MSG_HEADER_SIZE,
    MSG_MAX_PAYLOAD_LEN,
};
use crate::protocol::checksum::{checksum, escape_into};
use crate::protocol::codec::{Decoded, FrameDecoder};
use crate::{Error, Result};

/// Header shape of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Addressed command: 16-bit code (big-endian on the wire) and packet id.
    Command { code: u16, pid: u8 },
    /// Broadcast frame (address 0x70): no code, no packet id.
    Broadcast,
}

/// A decoded ACIO message (one frame without SOF, escaping or checksum).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub addr: u8,
    pub kind: MessageKind,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn command(addr: u8, code: u16, pid: u8, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            addr,
            kind: MessageKind::Command { code, pid },
            payload: payload.into(),
        }
    }

    pub fn broadcast(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            addr: ACIO_BROADCAST,
            kind: MessageKind::Broadcast,
            payload: payload.into(),
        }
    }

    pub fn is_broadcast(&self) -> bool {
        matches!(self.kind, MessageKind::Broadcast)
    }

    /// Command code, `None` for broadcast frames.
    pub fn code(&self) -> Option<u16> {
        match self.kind {
            MessageKind::Command { code, .. } => Some(code),
            MessageKind::Broadcast => None,
        }
    }

    /// Packet id; broadcast frames have none and report 0.
    pub fn pid(&self) -> u8 {
        match self.kind {
            MessageKind::Command { pid, .. } => pid,
            MessageKind::Broadcast => 0,
        }
    }

    pub fn is_response(&self) -> bool {
        self.addr & ACIO_RESPONSE_FLAG != 0
    }

    /// Build the reply to this message. The reply echoes address, code and
    /// packet id, and flags the address as a response unless it is 0.
    pub fn reply(&self, payload: impl Into<Vec<u8>>) -> Message {
        let addr = if self.addr != 0 {
            self.addr | ACIO_RESPONSE_FLAG
        } else {
            self.addr
        };
        Message {
            addr,
            kind: MessageKind::Command {
                code: self.code().unwrap_or_default(),
                pid: self.pid(),
            },
            payload: payload.into(),
        }
    }

    /// Single-byte status reply.
    pub fn reply_status(&self, status: u8) -> Message {
        self.reply(vec![status])
    }
}

/// ACIO frame helper. Provides encode/decode of the wire frame
/// Format: [SOF SOF] escaped([addr] [code_hi code_lo pid] [size] [payload(n)] [checksum])
/// Broadcast frames omit the code and pid bytes.
pub struct Frame;

impl Frame {
    /// Unescaped header and payload of `msg`. Payloads longer than 255 bytes
    /// are clamped.
    pub fn body(msg: &Message) -> Vec<u8> {
        let payload = if msg.payload.len() > MSG_MAX_PAYLOAD_LEN {
            log::warn!(
                target: "acio",
                "data size > {}: {}",
                MSG_MAX_PAYLOAD_LEN,
                msg.payload.len()
            );
            &msg.payload[..MSG_MAX_PAYLOAD_LEN]
        } else {
            &msg.payload[..]
        };

        let mut out = Vec::with_capacity(MSG_HEADER_SIZE + payload.len());
        out.push(msg.addr);
        if let MessageKind::Command { code, pid } = msg.kind {
            out.extend_from_slice(&code.to_be_bytes());
            out.push(pid);
        }
        out.push(payload.len() as u8);
        out.extend_from_slice(payload);
        out
    }

    /// Encode a message into a full wire frame.
    pub fn encode(msg: &Message) -> Vec<u8> {
        let body = Self::body(msg);
        let chk = checksum(&body);

        let mut out = Vec::with_capacity(2 + 2 * (body.len() + 1));
        out.push(ACIO_SOF);
        out.push(ACIO_SOF);
        for &b in body.iter().chain(std::iter::once(&chk)) {
            escape_into(&mut out, b);
        }

        #[cfg(feature = "diagnostics")]
        log::info!(
            target: "acio",
            "MSG OUT: AA{}{:02X}",
            crate::utils::bytes_to_hex(&body),
            chk
        );

        out
    }

    /// Parse one unescaped frame, starting at the address byte and ending
    /// with the checksum byte.
    pub fn parse(frame: &[u8]) -> Result<Message> {
        let addr = *frame.first().ok_or(Error::InvalidLength {
            expected: MSG_BROADCAST_HEADER_SIZE + 1,
            actual: 0,
        })?;

        let (header_len, size_idx) = if addr == ACIO_BROADCAST {
            (MSG_BROADCAST_HEADER_SIZE, 1)
        } else {
            (MSG_HEADER_SIZE, 4)
        };

        if frame.len() < header_len + 1 {
            return Err(Error::InvalidLength {
                expected: header_len + 1,
                actual: frame.len(),
            });
        }

        let size = frame[size_idx] as usize;
        let required_len = header_len + size + 1;
        if frame.len() != required_len {
            return Err(Error::InvalidLength {
                expected: required_len,
                actual: frame.len(),
            });
        }

        let chk_idx = required_len - 1;
        let expected = checksum(&frame[..chk_idx]);
        let actual = frame[chk_idx];
        if expected != actual {
            return Err(Error::ChecksumMismatch { expected, actual });
        }

        let payload = frame[header_len..chk_idx].to_vec();
        if addr == ACIO_BROADCAST {
            Ok(Message::broadcast(payload))
        } else {
            let code = u16::from_be_bytes([frame[1], frame[2]]);
            Ok(Message::command(addr, code, frame[3], payload))
        }
    }

    /// Decode the first valid frame found in a raw wire capture. Garbage
    /// before a start-of-frame, handshakes and corrupted frames are skipped.
    pub fn decode(wire: &[u8]) -> Option<Message> {
        let mut decoder = FrameDecoder::new();
        wire.iter().find_map(|&b| match decoder.push(b) {
            Some(Decoded::Frame(msg)) => Some(msg),
            _ => None,
        })
    }
}
