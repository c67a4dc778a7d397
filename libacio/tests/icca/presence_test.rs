#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use anyhow::Result;
use libacio::device::models::icca::commands::*;
use libacio::device::{HardwareRevision, IccaConfig};
use libacio::input::Key;
use libacio::test_support::IccaHarness;

use common::fixtures::{felica_uid, iso15693_uid};

fn new_generation(h: &mut IccaHarness, unit: u8) {
    h.request(unit, ICCA_CMD_KEY_EXCHANGE, &[0, 0, 0, 1])
        .expect("key exchange reply");
}

#[test]
fn presence_cycle_with_hold_timeout() -> Result<()> {
    common::init_logger();
    let mut h = IccaHarness::new(IccaConfig::new())?;
    new_generation(&mut h, 0);

    let idle = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(idle[0], 0x04);

    h.input.insert_card(0, felica_uid());
    let status = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(status.len(), STATUS_BLOCK_LEN);
    assert_eq!(status[0], 0x02);
    assert_eq!(&status[2..10], felica_uid().as_bytes());
    assert_eq!((status[1], status[10]), (0x01, 0x01));

    h.clock.advance(Duration::from_secs(5));
    assert_eq!(h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload[0], 0x02);

    h.clock.advance(Duration::from_secs(6));
    let gone = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(gone[0], 0x04);
    assert_eq!(&gone[2..10], &[0u8; 8]);
    Ok(())
}

#[test]
fn iso15693_card_type() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    new_generation(&mut h, 1);
    h.input.insert_card(1, iso15693_uid());
    let status = h.request(1, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(status[0], 0x02);
    assert_eq!((status[1], status[10]), (0x00, 0x00));
    Ok(())
}

#[test]
fn idle_status_follows_revision() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new().with_revision(HardwareRevision::for_model("LDJ", 'A')))?;
    new_generation(&mut h, 0);
    assert_eq!(h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload[0], 0x00);
    Ok(())
}

#[test]
fn legacy_reader_latches_accepted_card() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;

    // accept off: card seen by the front sensor only
    h.request(0, ICCA_CMD_SET_ACTION, &[0x00, ACTION_ACCEPT_DISABLE]);
    h.input.insert_card(0, felica_uid());
    let s = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!((s[0], s[1]), (0x02, 0x10));

    let s = h
        .request(0, ICCA_CMD_SET_ACTION, &[0x00, ACTION_ACCEPT_ENABLE])
        .unwrap()
        .payload;
    assert_eq!((s[0], s[1]), (0x02, 0x30));
    assert_eq!(s[10], 0x00);

    let s = h
        .request(0, ICCA_CMD_SET_ACTION, &[0x00, ACTION_EJECT])
        .unwrap()
        .payload;
    assert_eq!(s[0], 0x01);
    Ok(())
}

#[test]
fn read_card_uid_reports_no_card_but_carries_uid() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    h.input.insert_card(0, felica_uid());
    let s = h.request(0, ICCA_CMD_READ_CARD_UID, &[]).unwrap().payload;
    assert_eq!(s[0], 0x01);
    assert_eq!(&s[2..10], felica_uid().as_bytes());
    Ok(())
}

#[test]
fn insert_key_presents_configured_card() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    h.input.set_uid(0, Some(felica_uid()));
    h.input.press(0, Key::Insert);
    let s = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(s[0], 0x02);
    // the insert key is not a keypad key
    assert_eq!((s[12], s[14], s[15]), (0, 0, 0));
    Ok(())
}

#[test]
fn units_are_independent() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    h.input.insert_card(1, felica_uid());
    assert_eq!(h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload[0], 0x01);
    assert_eq!(h.request(1, ICCA_CMD_GET_STATUS, &[]).unwrap().payload[0], 0x02);
    Ok(())
}
