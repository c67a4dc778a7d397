// libacio/src/device/models/mod.rs

pub mod icca;
pub mod noop;

pub use icca::IccaDevice;
pub use noop::NoopDevice;
