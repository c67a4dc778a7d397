// libacio/src/input/keys.rs

/// Bit positions of the card-unit keys inside a [`CardInput::key_state`]
/// mask.
///
/// [`CardInput::key_state`]: super::CardInput::key_state
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Key0 = 0,
    Key1 = 1,
    Key4 = 2,
    Key7 = 3,
    Key00 = 4,
    Key2 = 5,
    Key5 = 6,
    Key8 = 7,
    Decimal = 8,
    Key3 = 9,
    Key6 = 10,
    Key9 = 11,
    /// Keyboard-emulated card insert
    Insert = 13,
}

impl Key {
    /// The twelve keypad keys in scan order: 0-9, decimal, double zero.
    pub const KEYPAD: [Key; 12] = [
        Key::Key0,
        Key::Key1,
        Key::Key2,
        Key::Key3,
        Key::Key4,
        Key::Key5,
        Key::Key6,
        Key::Key7,
        Key::Key8,
        Key::Key9,
        Key::Decimal,
        Key::Key00,
    ];

    pub const fn mask(self) -> u16 {
        1 << (self as u8)
    }

    pub fn is_pressed(self, state: u16) -> bool {
        state & self.mask() != 0
    }
}
