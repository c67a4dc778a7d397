// libacio/src/input/mock.rs

use parking_lot::Mutex;

use super::keys::Key;
use super::traits::CardInput;
use crate::types::CardUid;

#[derive(Debug, Default, Clone)]
struct UnitInput {
    pending_insert: bool,
    uid: Option<CardUid>,
    keys: u16,
    uid_reads: usize,
}

/// Mock input source for unit tests. Cards and key levels are set by the
/// test; insert signals are consumed once like a real card tap.
#[derive(Debug)]
pub struct MockInput {
    units: Mutex<Vec<UnitInput>>,
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new(2)
    }
}

impl MockInput {
    pub fn new(units: usize) -> Self {
        Self {
            units: Mutex::new(vec![UnitInput::default(); units]),
        }
    }

    /// Tap a card: the UID becomes readable and one insert signal is queued.
    pub fn insert_card(&self, unit: usize, uid: CardUid) {
        let mut units = self.units.lock();
        units[unit].uid = Some(uid);
        units[unit].pending_insert = true;
    }

    /// Queue an insert signal without a readable card.
    pub fn signal_insert(&self, unit: usize) {
        self.units.lock()[unit].pending_insert = true;
    }

    pub fn set_uid(&self, unit: usize, uid: Option<CardUid>) {
        self.units.lock()[unit].uid = uid;
    }

    pub fn press(&self, unit: usize, key: Key) {
        self.units.lock()[unit].keys |= key.mask();
    }

    pub fn release(&self, unit: usize, key: Key) {
        self.units.lock()[unit].keys &= !key.mask();
    }

    pub fn set_keys(&self, unit: usize, mask: u16) {
        self.units.lock()[unit].keys = mask;
    }

    /// How many times the reader asked for a UID on `unit`.
    pub fn uid_reads(&self, unit: usize) -> usize {
        self.units.lock()[unit].uid_reads
    }
}

impl CardInput for MockInput {
    fn card_presented(&self, unit: usize) -> bool {
        std::mem::take(&mut self.units.lock()[unit].pending_insert)
    }

    fn read_card_uid(&self, unit: usize) -> Option<CardUid> {
        let mut units = self.units.lock();
        units[unit].uid_reads += 1;
        units[unit].uid
    }

    fn key_state(&self, unit: usize) -> u16 {
        self.units.lock()[unit].keys
    }
}
