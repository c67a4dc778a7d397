// libacio/src/error.rs

use thiserror::Error;

/// Crate-wide error type.
///
/// Wire-level problems are reported through this type by the frame parser,
/// but the bus never lets them escape to the byte-stream caller: a broken
/// frame is logged and dropped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid frame length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("bus address space exhausted: requested {requested} nodes, {available} available")]
    AddressSpaceExhausted { requested: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid unit {unit} for a device with {units} unit(s)")]
    InvalidUnit { unit: usize, units: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
