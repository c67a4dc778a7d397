//! ICCA keypad scan: level bits and edge byte per unit.
//!
//! Key map of the level bits (standard layout):
//!
//! ```text
//!  7 8 9  | 0800 8000 0008
//!  4 5 6  | 0400 4000 0004
//!  1 2 3  | 0200 2000 0002
//!  0 00 . | 0100 1000 0001
//! ```
//!
//! The alternate layout puts each column in its own nibble instead:
//!
//! ```text
//!  7 8 9  | 008 080 800
//!  4 5 6  | 004 040 400
//!  1 2 3  | 002 020 200
//!  0 00 . | 001 010 100
//! ```

use crate::input::{CardInput, Key};

pub const KEYPAD_KEYS: usize = 12;

/// Level bits indexed like [`Key::KEYPAD`] (0-9, decimal, 00).
const LEVEL_BITS: [u16; KEYPAD_KEYS] = [
    0x0100, 0x0200, 0x2000, 0x0002, 0x0400, 0x4000, 0x0004, 0x0800, 0x8000, 0x0008, 0x0001, 0x1000,
];

const LEVEL_BITS_ALT: [u16; KEYPAD_KEYS] = [
    0x001, 0x002, 0x020, 0x200, 0x004, 0x040, 0x400, 0x008, 0x080, 0x800, 0x100, 0x010,
];

/// Numeric code carried in the low nibble of the edge byte.
const KEY_CODES: [u8; KEYPAD_KEYS] = [0, 1, 5, 9, 2, 6, 10, 3, 7, 11, 8, 4];

/// Marker bit set on every edge byte.
pub const EDGE_MARKER: u8 = 0x80;

/// Static keypad wiring options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeypadLayout {
    pub alternate_levels: bool,
    pub flip_rows: bool,
}

impl KeypadLayout {
    /// Index of the physical key that is reported as key `n`.
    fn physical(&self, n: usize) -> usize {
        if !self.flip_rows {
            return n;
        }
        match n {
            0 => 11,
            1..=3 => n + 6,
            7..=9 => n - 6,
            11 => 0,
            _ => n,
        }
    }

    fn level_bit(&self, n: usize) -> u16 {
        if self.alternate_levels {
            LEVEL_BITS_ALT[n]
        } else {
            LEVEL_BITS[n]
        }
    }
}

/// Edge-byte code of a keypad key, `None` for non-keypad keys.
pub fn key_code(key: Key) -> Option<u8> {
    Key::KEYPAD
        .iter()
        .position(|&k| k == key)
        .map(|n| KEY_CODES[n])
}

/// Level bit of a keypad key in the standard layout.
pub fn level_bit(key: Key) -> Option<u16> {
    Key::KEYPAD
        .iter()
        .position(|&k| k == key)
        .map(|n| LEVEL_BITS[n])
}

/// Keypad state of one unit.
#[derive(Debug, Clone, Default)]
pub struct KeypadState {
    level: u16,
    edge: u8,
    last: [bool; KEYPAD_KEYS],
    serial: u8,
    edge_key: Option<usize>,
    edge_reported: bool,
}

impl KeypadState {
    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn edge(&self) -> u8 {
        self.edge
    }

    /// 3-bit counter placed in the next edge byte.
    pub fn serial(&self) -> u8 {
        self.serial
    }

    /// Sample the key levels. A 0->1 transition latches a new edge byte:
    /// marker bit, rolling serial and the key code. The edge is cleared once
    /// its key is released, but never before it was reported at least once.
    pub fn scan(&mut self, keys: u16, layout: &KeypadLayout) {
        self.level = 0;
        for n in 0..KEYPAD_KEYS {
            // level bits follow the physical key, edge codes the reported one
            let i = layout.physical(n);
            let pressed = Key::KEYPAD[i].is_pressed(keys);
            if pressed {
                self.level |= layout.level_bit(i);
                if !self.last[n] {
                    self.edge = EDGE_MARKER | (self.serial << 4) | KEY_CODES[n];
                    self.serial = (self.serial + 1) & 0x07;
                    self.edge_key = Some(n);
                    self.edge_reported = false;
                }
            } else if self.edge_key == Some(n) && self.edge_reported {
                self.edge = 0;
                self.edge_key = None;
            }
            self.last[n] = pressed;
        }
    }

    /// Edge byte and level bits as seen by the game.
    pub fn report(&mut self) -> (u8, u16) {
        if self.edge_key.is_some() {
            self.edge_reported = true;
        }
        (self.edge, self.level)
    }
}

/// Keypad state of every unit on one reader, guarded as a whole by the
/// device's keypad lock.
#[derive(Debug, Clone)]
pub struct KeypadBank {
    units: Vec<KeypadState>,
    layout: KeypadLayout,
}

impl KeypadBank {
    pub fn new(units: usize, layout: KeypadLayout) -> Self {
        Self {
            units: vec![KeypadState::default(); units],
            layout,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn scan(&mut self, unit: usize, keys: u16) {
        let layout = self.layout;
        self.units[unit].scan(keys, &layout);
    }

    /// Read `unit`'s keys from `input` and scan them. Called with the bank
    /// locked so a sample is never applied after a newer one. Returns the
    /// key levels that were read.
    pub fn sample(&mut self, unit: usize, input: &dyn CardInput) -> u16 {
        let keys = input.key_state(unit);
        self.scan(unit, keys);
        keys
    }

    /// [`sample`](Self::sample) every unit.
    pub fn sample_all(&mut self, input: &dyn CardInput) {
        for unit in 0..self.units.len() {
            self.sample(unit, input);
        }
    }

    pub fn report(&mut self, unit: usize) -> (u8, u16) {
        self.units[unit].report()
    }

    pub fn state(&self, unit: usize) -> &KeypadState {
        &self.units[unit]
    }
}
