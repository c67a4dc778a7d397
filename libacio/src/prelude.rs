// libacio/src/prelude.rs

pub use crate::bus::{Bus, BusBuilder};
pub use crate::device::{
    Device, HardwareRevision, IccaConfig, IccaDevice, NoopDevice, Responder, WorkflowState,
};
pub use crate::input::{CardInput, Key, MockInput, NoInput};
pub use crate::protocol::{Decoded, Frame, FrameDecoder, Message, MessageKind};
pub use crate::transport::{BusPort, ByteStream};
pub use crate::{CardType, CardUid, Error, Result};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, Clock, ManualClock, SystemClock};
