// libacio/src/transport/mod.rs

pub mod port;
pub mod ring;
pub mod traits;

pub use port::BusPort;
pub use ring::RingBuffer;
pub use traits::ByteStream;
