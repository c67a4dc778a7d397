//! Utilities for libacio: small, reusable helpers used across the crate.
//!
//! Hex formatting for frame traces, plus the clock abstraction and timing
//! policy constants used by the card reader.

pub mod clock;
pub mod hex;

pub use clock::*;
pub use hex::*;
