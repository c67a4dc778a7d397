// libacio/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod frame;
pub mod version;

pub use checksum::{checksum, escape_into, needs_escape};
pub use codec::{Decoded, FrameDecoder};
pub use frame::{Frame, Message, MessageKind};
pub use version::VersionData;
