#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use anyhow::Result;
use libacio::constants::{ACIO_CMD_CLEAR, ACIO_CMD_GET_VERSION};
use libacio::device::models::icca::commands::*;
use libacio::device::{Device, HardwareRevision, IccaConfig, IccaDevice, Responder, WorkflowState};
use libacio::input::MockInput;
use libacio::protocol::{Message, VersionData};
use libacio::test_support::IccaHarness;
use libacio::transport::RingBuffer;
use libacio::utils::ManualClock;
use libacio::Error;

use common::fixtures::felica_uid;

#[test]
fn version_record() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new().with_revision(HardwareRevision::Firmware17))?;
    let v = h.request(0, ACIO_CMD_GET_VERSION, &[]).unwrap().payload;
    assert_eq!(v.len(), VersionData::SIZE);
    assert_eq!(&v[..8], &[0x03, 0x00, 0x00, 0x00, 0x00, 0x01, 0x07, 0x00]);
    assert_eq!(&v[8..12], b"ICCA");
    assert_eq!(&v[12..23], b"Apr  1 2014");
    assert_eq!(&v[28..36], b"12:00:00");
    Ok(())
}

#[test]
fn power_control_counts_down() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(h.request(0, ICCA_CMD_POWER_CONTROL, &[]).unwrap().payload[0]);
    }
    assert_eq!(seen, vec![1, 0, 0, 0]);
    Ok(())
}

#[test]
fn read_uid_new_variants() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    assert!(h.request(0, ICCA_CMD_READ_CARD_UID_NEW, &[]).unwrap().payload.is_empty());

    let mut h = IccaHarness::new(IccaConfig::new().with_revision(HardwareRevision::for_model("KFC", 'A')))?;
    assert_eq!(h.request(0, ICCA_CMD_READ_CARD_UID_NEW, &[]).unwrap().payload, vec![0x01]);

    let mut h = IccaHarness::new(IccaConfig::new().with_revision(HardwareRevision::UidDirect))?;
    h.input.insert_card(0, felica_uid());
    let block = h.request(0, ICCA_CMD_READ_CARD_UID_NEW, &[]).unwrap().payload;
    assert_eq!(block.len(), STATUS_BLOCK_LEN);
    assert_eq!(&block[..8], felica_uid().as_bytes());
    assert_eq!(&block[8..], &[0u8; 8]);

    // the card was handed over and released
    let status = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(status[0], 0x04);
    Ok(())
}

#[test]
fn generation_switch_is_sticky() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    h.input.insert_card(0, felica_uid());
    // legacy: card held with both sensors
    let s = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!((s[0], s[1]), (0x02, 0x30));

    h.request(0, ICCA_CMD_READ_CARD_UID_NEW, &[]).unwrap();
    let s = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!((s[0], s[1]), (0x02, 0x01));

    // other legacy commands do not switch back
    h.request(0, ICCA_CMD_REINITIALIZE, &[]).unwrap();
    h.request(0, ACIO_CMD_CLEAR, &[]).unwrap();
    let s = h.request(0, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!((s[0], s[1]), (0x02, 0x01));
    Ok(())
}

#[test]
fn unknown_command_is_unanswered() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    assert!(h.request(0, 0x0199, &[]).is_none());
    assert!(h.request(0, ICCA_CMD_PROBE_120, &[]).is_some());
    Ok(())
}

#[test]
fn workflow_through_device_api() -> Result<()> {
    let input = Arc::new(MockInput::new(2));
    let clock = Arc::new(ManualClock::new());
    let mut reader = IccaDevice::with_clock(
        IccaConfig::new()
            .with_keypad_thread(false)
            .with_legacy_compat_mode(true),
        input.clone(),
        clock,
    )?;

    assert_eq!(reader.workflow_state(0)?, WorkflowState::Step);
    assert_eq!(reader.request_workflow(0, WorkflowState::Init)?, WorkflowState::Ready);
    assert_eq!(reader.request_workflow(0, WorkflowState::Start)?, WorkflowState::Ready);
    assert_eq!(
        reader.request_workflow(0, WorkflowState::CloseEject)?,
        WorkflowState::Sleep
    );
    assert_eq!(reader.request_workflow(1, WorkflowState::GetUserId)?, WorkflowState::GetUserId);

    // a card picked up by a status request moves the unit to START in
    // compat mode
    input.insert_card(0, felica_uid());
    let mut buf = RingBuffer::new(256);
    let msg = Message::command(1, ICCA_CMD_GET_STATUS, 0, vec![]);
    assert!(reader.handle(0, &msg, &mut Responder::new(&mut buf)));
    assert_eq!(reader.workflow_state(0)?, WorkflowState::Start);
    assert_eq!(reader.request_workflow(0, WorkflowState::Start)?, WorkflowState::Active);
    assert_eq!(
        reader.request_workflow(0, WorkflowState::CloseEject)?,
        WorkflowState::EjectCheck
    );
    reader.request_workflow(0, WorkflowState::Eject)?;
    assert_eq!(reader.card_uid(0)?, None);

    assert!(matches!(
        reader.workflow_state(5),
        Err(Error::InvalidUnit { unit: 5, units: 2 })
    ));
    Ok(())
}

#[test]
fn failed_uid_read_reports_no_card() -> Result<()> {
    let mut h = IccaHarness::new(IccaConfig::new())?;
    // no uid behind the tap
    h.input.set_uid(1, None);
    h.input.signal_insert(1);
    let s = h.request(1, ICCA_CMD_GET_STATUS, &[]).unwrap().payload;
    assert_eq!(s[0], 0x01);
    Ok(())
}
