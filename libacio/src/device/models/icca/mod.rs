//! ICCA card reader with keypad.
//!
//! One device exposes up to two units, each on its own bus node. Units start
//! out as a legacy reader (accept/hold latching, plain status) and switch to
//! the new reader generation for good once the game issues KEY EXCHANGE or
//! READ CARD UID NEW on them.

pub mod commands;
pub mod config;
pub mod crypt;
pub mod keypad;
pub mod poller;
mod unit;
pub mod workflow;

use std::sync::Arc;

use parking_lot::Mutex;

pub use config::{Capabilities, HardwareRevision, IccaConfig, UidNewReply};
pub use crypt::{CipherFactory, Rc4Crypt, StreamCipher};
pub use keypad::{KeypadBank, KeypadLayout};
pub use poller::KeypadPoller;
pub use workflow::WorkflowState;

use self::commands::*;
use self::unit::{CardUnit, STATUS_NO_CARD};
use crate::constants::{
    ACIO_CMD_BROADCAST, ACIO_CMD_CLEAR, ACIO_CMD_GET_MICOM_INFO, ACIO_CMD_GET_PRODUCT_NUMBER,
    ACIO_CMD_GET_VERSION, ACIO_CMD_STARTUP,
};
use crate::device::{Device, Responder};
use crate::error::{Error, Result};
use crate::input::CardInput;
use crate::protocol::{Message, VersionData};
use crate::types::CardUid;
use crate::utils::{Clock, SystemClock};

pub struct IccaDevice {
    poller: Option<KeypadPoller>,
    config: IccaConfig,
    caps: Capabilities,
    units: Vec<CardUnit>,
    keypads: Arc<Mutex<KeypadBank>>,
    input: Arc<dyn CardInput>,
    clock: Arc<dyn Clock>,
    cipher: CipherFactory,
}

impl std::fmt::Debug for IccaDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IccaDevice")
            .field("config", &self.config)
            .field("poller", &self.poller.is_some())
            .finish_non_exhaustive()
    }
}

impl IccaDevice {
    pub fn new(config: IccaConfig, input: Arc<dyn CardInput>) -> Result<Self> {
        Self::with_clock(config, input, Arc::new(SystemClock))
    }

    /// Build a reader measuring card hold time against `clock`.
    ///
    /// Starts the keypad poller when `config.keypad_thread` is set.
    pub fn with_clock(
        config: IccaConfig,
        input: Arc<dyn CardInput>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let units = config.units as usize;
        let layout = KeypadLayout {
            alternate_levels: config.legacy_compat_mode,
            flip_rows: config.flip_keypad_rows,
        };
        let keypads = Arc::new(Mutex::new(KeypadBank::new(units, layout)));

        let poller = if config.keypad_thread {
            Some(KeypadPoller::spawn(keypads.clone(), input.clone())?)
        } else {
            None
        };

        log::debug!(
            target: "icca",
            "reader created: {} unit(s), revision {:?}",
            units,
            config.revision
        );

        Ok(Self {
            poller,
            caps: config.revision.capabilities(),
            config,
            units: (0..units).map(|_| CardUnit::default()).collect(),
            keypads,
            input,
            clock,
            cipher: crypt::rc4_cipher,
        })
    }

    /// Replace the cipher used for GET STATUS ENC.
    pub fn with_cipher(mut self, factory: CipherFactory) -> Self {
        self.cipher = factory;
        self
    }

    pub fn config(&self) -> &IccaConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Apply a host workflow request to `unit` and return its new state.
    pub fn request_workflow(&mut self, unit: usize, request: WorkflowState) -> Result<WorkflowState> {
        let step_sleeps = self.caps.step_sleeps;
        let u = self.unit_mut(unit)?;
        let t = u.workflow.request(request, u.card.is_some(), step_sleeps);
        if t.release_card {
            u.release();
        }
        u.workflow = t.state;
        Ok(t.state)
    }

    pub fn workflow_state(&self, unit: usize) -> Result<WorkflowState> {
        Ok(self.unit(unit)?.workflow)
    }

    /// UID of the card currently held by `unit`.
    pub fn card_uid(&self, unit: usize) -> Result<Option<CardUid>> {
        Ok(self.unit(unit)?.card_uid())
    }

    pub fn is_new_generation(&self, unit: usize) -> Result<bool> {
        Ok(self.unit(unit)?.new_generation)
    }

    /// Run one keypad scan on every unit, as the poller does.
    pub fn scan_keypads(&self) {
        self.keypads.lock().sample_all(self.input.as_ref());
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(KeypadPoller::is_running)
    }

    /// Stop and join the keypad poller.
    pub fn shutdown(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }

    fn unit(&self, unit: usize) -> Result<&CardUnit> {
        let units = self.units.len();
        self.units
            .get(unit)
            .ok_or(Error::InvalidUnit { unit, units })
    }

    fn unit_mut(&mut self, unit: usize) -> Result<&mut CardUnit> {
        let units = self.units.len();
        self.units
            .get_mut(unit)
            .ok_or(Error::InvalidUnit { unit, units })
    }

    fn unit_index(&self, node: u8) -> usize {
        let units = self.units.len();
        let node = node as usize;
        assert!(node < units, "icca: node {} outside {} unit(s)", node, units);
        if self.config.flip_order {
            units - node - 1
        } else {
            node
        }
    }

    fn update_card(&mut self, unit: usize, keys: u16) {
        let now = self.clock.now();
        let compat = self.config.legacy_compat_mode;
        self.units[unit].update_card(unit, keys, self.input.as_ref(), now, compat);
    }

    /// Card update, keypad scan and a fresh status block for `unit`.
    fn refresh(&mut self, unit: usize) -> [u8; STATUS_BLOCK_LEN] {
        let (keys, edge, level) = {
            let mut bank = self.keypads.lock();
            let keys = bank.sample(unit, self.input.as_ref());
            let (edge, level) = bank.report(unit);
            (keys, edge, level)
        };
        self.update_card(unit, keys);

        let idle = self.caps.idle_status;
        self.units[unit].status_block(edge, level, idle)
    }

    fn set_action(&mut self, unit: usize, action: u8) {
        let u = &mut self.units[unit];
        match action {
            ACTION_ACCEPT_DISABLE => u.accept = false,
            ACTION_ACCEPT_ENABLE => u.accept = true,
            ACTION_EJECT => u.release(),
            other => log::debug!(target: "icca", "unit {}: unknown action {:#04x}", unit, other),
        }
    }

    fn key_exchange(&mut self, unit: usize, payload: &[u8]) -> [u8; 4] {
        let mut key = [0u8; 4];
        let n = payload.len().min(4);
        key[..n].copy_from_slice(&payload[..n]);
        let game_key = u32::from_be_bytes(key);

        log::info!(target: "icca", "client key: {:08x}", game_key);
        log::info!(target: "icca", "reader key: {:08x}", READER_KEY);

        let u = &mut self.units[unit];
        u.new_generation = true;
        u.crypt = Some((self.cipher)(READER_KEY, game_key));
        READER_KEY.to_be_bytes()
    }

    fn read_uid_new(&mut self, unit: usize, msg: &Message, out: &mut Responder<'_>) {
        self.units[unit].new_generation = true;
        match self.caps.uid_new_reply {
            UidNewReply::Empty => out.reply(msg, Vec::new()),
            UidNewReply::StatusOne => out.reply_status(msg, 0x01),
            UidNewReply::UidBlock => {
                let keys = self.input.key_state(unit);
                self.update_card(unit, keys);
                let mut block = vec![0u8; STATUS_BLOCK_LEN];
                let u = &mut self.units[unit];
                if let Some(uid) = u.card_uid() {
                    block[..8].copy_from_slice(uid.as_bytes());
                    u.release();
                }
                out.reply(msg, block);
            }
        }
    }

    fn status_enc(&mut self, unit: usize) -> Vec<u8> {
        let block = self.refresh(unit);
        let mut data = vec![0u8; ENC_STATUS_LEN];
        data[..STATUS_BLOCK_LEN].copy_from_slice(&block);

        match self.units[unit].crypt.as_mut() {
            Some(crypt) => {
                let crc = crypt.crc(&data[..STATUS_BLOCK_LEN]);
                data[STATUS_BLOCK_LEN..].copy_from_slice(&crc.to_be_bytes());
                crypt.crypt(&mut data);
            }
            None => log::warn!(
                target: "icca",
                "unit {}: GET STATUS ENC received with no crypt keys initialized",
                unit
            ),
        }
        data
    }
}

impl Device for IccaDevice {
    fn name(&self) -> &str {
        "ICCA"
    }

    fn node_count(&self) -> u8 {
        self.config.units
    }

    fn handle(&mut self, node: u8, msg: &Message, out: &mut Responder<'_>) -> bool {
        let Some(code) = msg.code() else {
            return false;
        };
        let unit = self.unit_index(node);

        log::trace!(target: "icca", "unit {}: cmd {:#06x}", unit, code);

        match code {
            ACIO_CMD_GET_VERSION => {
                let v = VersionData::new(
                    VERSION_TYPE,
                    0,
                    VERSION_MAJOR,
                    self.caps.version_minor,
                    0,
                    self.caps.code,
                );
                out.reply(msg, v.to_bytes().to_vec());
            }
            ICCA_CMD_REINITIALIZE => out.reply_status(msg, 0x00),
            ICCA_CMD_READ_CARD_UID => {
                let mut block = self.refresh(unit);
                // a plain read never reports the card
                block[0] = STATUS_NO_CARD;
                out.reply(msg, block.to_vec());
            }
            ICCA_CMD_SET_ACTION | ICCA_CMD_GET_STATUS => {
                if code == ICCA_CMD_SET_ACTION && msg.payload.len() >= 2 {
                    self.set_action(unit, msg.payload[1]);
                }
                let block = self.refresh(unit);
                out.reply(msg, block.to_vec());
            }
            ICCA_CMD_KEY_EXCHANGE => {
                let key = self.key_exchange(unit, &msg.payload);
                out.reply(msg, key.to_vec());
            }
            ICCA_CMD_READ_CARD_UID_NEW => self.read_uid_new(unit, msg, out),
            ICCA_CMD_GET_STATUS_ENC => {
                let data = self.status_enc(unit);
                out.reply(msg, data);
            }
            ICCA_CMD_POWER_CONTROL => {
                let u = &mut self.units[unit];
                u.power_counter = u.power_counter.saturating_sub(1);
                out.reply_status(msg, u.power_counter);
            }
            ACIO_CMD_STARTUP
            | ACIO_CMD_CLEAR
            | ACIO_CMD_GET_PRODUCT_NUMBER
            | ACIO_CMD_GET_MICOM_INFO
            | ICCA_CMD_PROBE_3A
            | ICCA_CMD_PROBE_116
            | ICCA_CMD_PROBE_120
            | ACIO_CMD_BROADCAST => out.reply_status(msg, 0x00),
            _ => return false,
        }
        true
    }
}

impl Drop for IccaDevice {
    fn drop(&mut self) {
        self.shutdown();
    }
}
