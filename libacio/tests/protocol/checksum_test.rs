#[path = "../common/mod.rs"]
mod common;

use libacio::protocol::{checksum, escape_into, needs_escape};

#[test]
fn checksum_examples() {
    assert_eq!(checksum(&[]), 0x00);
    assert_eq!(checksum(&[0x01, 0x01, 0x34, 0x05, 0x00]), 0x3B);
    // wraps at 8 bits
    assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
}

#[test]
fn only_sof_and_escape_are_stuffed() {
    let stuffed: Vec<u8> = (0..=255u8).filter(|&b| needs_escape(b)).collect();
    assert_eq!(stuffed, vec![0xAA, 0xFF]);

    let mut out = Vec::new();
    for b in [0x00, 0xAA, 0x55, 0xFF] {
        escape_into(&mut out, b);
    }
    assert_eq!(out, vec![0x00, 0xFF, 0x55, 0x55, 0xFF, 0x00]);
}
