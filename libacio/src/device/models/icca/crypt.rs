//! Status block cipher used after KEY EXCHANGE.

use crc::{CRC_16_XMODEM, Crc};

const STATUS_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Symmetric stream cipher context of one card unit.
pub trait StreamCipher: Send {
    /// Transform `buf` in place; applying the same keystream twice restores
    /// the input.
    fn crypt(&mut self, buf: &mut [u8]);

    /// Checksum appended to the status block before encryption.
    fn crc(&self, buf: &[u8]) -> u16;
}

/// Builds a cipher context from `(reader_key, game_key)`.
pub type CipherFactory = fn(u32, u32) -> Box<dyn StreamCipher>;

/// Default factory producing [`Rc4Crypt`].
pub fn rc4_cipher(reader_key: u32, game_key: u32) -> Box<dyn StreamCipher> {
    Box::new(Rc4Crypt::new(reader_key, game_key))
}

/// RC4 keyed with `reader_key || game_key` (big-endian), CRC-16/XMODEM.
#[derive(Clone)]
pub struct Rc4Crypt {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4Crypt {
    pub fn new(reader_key: u32, game_key: u32) -> Self {
        let mut key = [0u8; 8];
        key[..4].copy_from_slice(&reader_key.to_be_bytes());
        key[4..].copy_from_slice(&game_key.to_be_bytes());

        let mut s = [0u8; 256];
        for (i, b) in s.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }
        Self { s, i: 0, j: 0 }
    }

    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.s[self.i as usize]);
        self.s.swap(self.i as usize, self.j as usize);
        let idx = self.s[self.i as usize].wrapping_add(self.s[self.j as usize]);
        self.s[idx as usize]
    }
}

impl StreamCipher for Rc4Crypt {
    fn crypt(&mut self, buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b ^= self.next_byte();
        }
    }

    fn crc(&self, buf: &[u8]) -> u16 {
        STATUS_CRC.checksum(buf)
    }
}
