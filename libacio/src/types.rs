// libacio/src/types.rs

use crate::Error;
use std::convert::TryFrom;

/// Card UID - Newtype Pattern (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardUid([u8; 8]);

impl CardUid {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Classify the card by its UID prefix. ISO15693 tags report
    /// `E0 04` in the first two bytes; anything else is treated as FeliCa.
    pub fn card_type(&self) -> CardType {
        if self.0[0] != 0xE0 || self.0[1] != 0x04 {
            CardType::Felica
        } else {
            CardType::Iso15693
        }
    }

    pub fn is_felica(&self) -> bool {
        self.card_type() == CardType::Felica
    }
}

impl TryFrom<&[u8]> for CardUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidLength {
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes[..8]);
        Ok(Self(arr))
    }
}

impl From<[u8; 8]> for CardUid {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Contactless card technology as reported in the ICCA status block.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Iso15693 = 0x00,
    Felica = 0x01,
}
