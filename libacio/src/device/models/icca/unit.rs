//! State of one card slot.

use std::time::Instant;

use super::crypt::StreamCipher;
use super::workflow::WorkflowState;
use crate::input::{CardInput, Key};
use crate::types::CardUid;
use crate::utils::CARD_HOLD_TIMEOUT;

/// Status byte 0 values.
pub const STATUS_NO_CARD: u8 = 0x01;
pub const STATUS_CARD: u8 = 0x02;

/// Legacy reader sensor bits (status byte 1).
pub const SENSOR_FRONT: u8 = 0x10;
pub const SENSOR_BACK: u8 = 0x20;

#[derive(Debug, Clone, Copy)]
pub(crate) struct HeldCard {
    pub uid: CardUid,
    pub inserted_at: Instant,
}

pub(crate) struct CardUnit {
    pub card: Option<HeldCard>,
    /// Legacy: a presented card gets latched.
    pub accept: bool,
    /// Legacy: a card is latched.
    pub hold: bool,
    insert_key_last: bool,
    pub crypt: Option<Box<dyn StreamCipher>>,
    pub power_counter: u8,
    pub workflow: WorkflowState,
    pub new_generation: bool,
}

impl Default for CardUnit {
    fn default() -> Self {
        Self {
            card: None,
            accept: true,
            hold: false,
            insert_key_last: false,
            crypt: None,
            power_counter: 2,
            workflow: WorkflowState::Step,
            new_generation: false,
        }
    }
}

impl CardUnit {
    pub fn card_uid(&self) -> Option<CardUid> {
        self.card.map(|c| c.uid)
    }

    pub fn release(&mut self) {
        self.card = None;
        self.hold = false;
    }

    /// Expire an old card and pick up a newly presented one.
    ///
    /// `keys` is the unit's current key-state mask, used for the insert key.
    pub fn update_card(
        &mut self,
        unit: usize,
        keys: u16,
        input: &dyn CardInput,
        now: Instant,
        compat: bool,
    ) {
        if let Some(card) = self.card {
            if now.saturating_duration_since(card.inserted_at) >= CARD_HOLD_TIMEOUT {
                log::debug!(target: "icca", "unit {}: card {} timed out", unit, card.uid);
                self.release();
            }
        }

        let insert_key = Key::Insert.is_pressed(keys);
        let key_edge = insert_key && !self.insert_key_last;
        self.insert_key_last = insert_key;

        // only consume the insert signal while the slot is empty
        if self.card.is_some() || !(key_edge || input.card_presented(unit)) {
            return;
        }

        match input.read_card_uid(unit) {
            Some(uid) => {
                log::debug!(target: "icca", "unit {}: card {} presented", unit, uid);
                self.card = Some(HeldCard {
                    uid,
                    inserted_at: now,
                });
                self.workflow = if compat {
                    WorkflowState::Start
                } else {
                    WorkflowState::Active
                };
            }
            None => {
                log::debug!(target: "icca", "unit {}: card source returned no uid", unit);
                self.workflow = WorkflowState::ErrGetUid;
            }
        }
    }

    /// Build the 16-byte status block.
    ///
    /// ```text
    /// [0]      status
    /// [1]      card type (new) / sensors (legacy)
    /// [2..10]  uid
    /// [10]     card type (new)
    /// [11]     0x03
    /// [12]     key edge
    /// [13]     0x00
    /// [14..16] key levels, big-endian
    /// ```
    pub fn status_block(&mut self, edge: u8, level: u16, idle_status: u8) -> [u8; 16] {
        let mut block = [0u8; 16];
        if let Some(card) = &self.card {
            block[2..10].copy_from_slice(card.uid.as_bytes());
        }

        if self.new_generation {
            match &self.card {
                Some(card) => {
                    let kind = card.uid.card_type() as u8;
                    block[0] = STATUS_CARD;
                    block[1] = kind;
                    block[10] = kind;
                }
                None => block[0] = idle_status,
            }
        } else {
            if self.card.is_some() && self.accept {
                self.hold = true;
            }
            if self.hold {
                block[0] = STATUS_CARD;
                block[1] = SENSOR_FRONT | SENSOR_BACK;
            } else if self.card.is_some() {
                // present but not accepted
                block[0] = STATUS_CARD;
                block[1] = SENSOR_FRONT;
            } else {
                block[0] = STATUS_NO_CARD;
            }
        }

        block[11] = 0x03;
        block[12] = edge;
        block[13] = 0x00;
        block[14..16].copy_from_slice(&level.to_be_bytes());
        block
    }
}
