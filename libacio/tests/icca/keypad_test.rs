#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use libacio::device::IccaConfig;
use libacio::device::models::icca::commands::ICCA_CMD_GET_STATUS;
use libacio::device::models::icca::keypad::{key_code, level_bit, EDGE_MARKER};
use libacio::input::Key;
use libacio::test_support::IccaHarness;

fn edge_and_level(h: &mut IccaHarness, unit: u8) -> (u8, u16) {
    let s = h.request(unit, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    (s[12], u16::from_be_bytes([s[14], s[15]]))
}

#[test]
fn key_five_press_hold_release() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    let five = level_bit(Key::Key5).unwrap();

    h.input.press(0, Key::Key5);
    let (edge, level) = edge_and_level(&mut h, 0);
    assert_ne!(edge, 0);
    assert_eq!(edge & EDGE_MARKER, EDGE_MARKER);
    assert_eq!(edge & 0x0F, key_code(Key::Key5).unwrap());
    assert_eq!(level, five);

    // held: same edge, level still set
    assert_eq!(edge_and_level(&mut h, 0), (edge, five));

    h.input.release(0, Key::Key5);
    assert_eq!(edge_and_level(&mut h, 0), (0, 0));
    Ok(())
}

#[test]
fn second_key_produces_new_edge_and_serial() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;

    h.input.press(0, Key::Key5);
    let (first, _) = edge_and_level(&mut h, 0);
    h.input.press(0, Key::Key00);
    let (second, level) = edge_and_level(&mut h, 0);

    assert_ne!(first, second);
    assert_eq!(second & 0x0F, key_code(Key::Key00).unwrap());
    assert_eq!((second >> 4) & 0x07, ((first >> 4) & 0x07) + 1);
    assert_eq!(level, level_bit(Key::Key5).unwrap() | level_bit(Key::Key00).unwrap());
    Ok(())
}

#[test]
fn keypads_are_per_unit() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    h.input.press(1, Key::Decimal);
    assert_eq!(edge_and_level(&mut h, 0), (0, 0));
    let (edge, level) = edge_and_level(&mut h, 1);
    assert_eq!(edge & 0x0F, key_code(Key::Decimal).unwrap());
    assert_eq!(level, 0x0001);
    Ok(())
}

#[test]
fn compat_mode_uses_alternate_levels() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new().with_legacy_compat_mode(true))?;
    h.input.press(0, Key::Key9);
    assert_eq!(edge_and_level(&mut h, 0).1, 0x800);
    Ok(())
}

#[test]
fn flipped_rows() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new().with_flip_keypad_rows(true))?;
    h.input.press(0, Key::Key7);
    let (edge, level) = edge_and_level(&mut h, 0);
    // edge reports the mirrored key, level the one actually held
    assert_eq!(edge & 0x0F, key_code(Key::Key1).unwrap());
    assert_eq!(level, level_bit(Key::Key7).unwrap());
    assert_eq!(level, 0x0800);
    Ok(())
}
