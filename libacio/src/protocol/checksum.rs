// libacio/src/protocol/checksum.rs

use crate::constants::{ACIO_ESCAPE, ACIO_SOF};

/// Compute the ACIO frame checksum: 8-bit sum of every header and payload
/// byte before escaping.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// True for the two byte values that may not appear literally inside a frame.
pub fn needs_escape(b: u8) -> bool {
    b == ACIO_SOF || b == ACIO_ESCAPE
}

/// Append `b` to `out`, byte-stuffing it as `ESCAPE, !b` when required.
pub fn escape_into(out: &mut Vec<u8>, b: u8) {
    if needs_escape(b) {
        out.push(ACIO_ESCAPE);
        out.push(!b);
    } else {
        out.push(b);
    }
}
