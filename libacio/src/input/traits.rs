// libacio/src/input/traits.rs

use crate::types::CardUid;

/// Card and keypad source for the card reader units.
///
/// Implemented by the embedding application (raw input, card files, network
/// readers...). Units are numbered from 0. The keypad poller calls
/// `key_state` from a background thread, hence `Send + Sync`.
pub trait CardInput: Send + Sync {
    /// Consume a pending card-insert signal for `unit`.
    fn card_presented(&self, unit: usize) -> bool;

    /// UID of the card to present on `unit`, `None` if no card can be read.
    fn read_card_uid(&self, unit: usize) -> Option<CardUid>;

    /// Current key levels for `unit`, one bit per [`Key`](super::Key).
    fn key_state(&self, unit: usize) -> u16;
}

/// Input source with no card and no keys, for boards without a user.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl CardInput for NoInput {
    fn card_presented(&self, _unit: usize) -> bool {
        false
    }

    fn read_card_uid(&self, _unit: usize) -> Option<CardUid> {
        None
    }

    fn key_state(&self, _unit: usize) -> u16 {
        0
    }
}
