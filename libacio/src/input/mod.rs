// libacio/src/input/mod.rs

pub mod keys;
pub mod mock;
pub mod traits;

pub use keys::Key;
pub use mock::MockInput;
pub use traits::{CardInput, NoInput};
