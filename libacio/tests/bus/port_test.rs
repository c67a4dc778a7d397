#[path = "../common/mod.rs"]
mod common;

use std::io::{Read, Write};
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use libacio::bus::Bus;
use libacio::constants::ACIO_CMD_STARTUP;
use libacio::device::{IccaConfig, IccaDevice};
use libacio::input::NoInput;
use libacio::test_support::{command_frame, decode_responses};
use libacio::transport::BusPort;

#[test]
fn port_reads_never_block() -> Result<()> {
    let mut port = BusPort::new(Bus::new());
    let mut buf = [0u8; 16];
    assert_eq!(port.read(&mut buf)?, 0);

    port.write_all(&[0xAA, 0xAA])?;
    assert_eq!(port.read(&mut buf)?, 2);
    assert_eq!(&buf[..2], &[0xAA, 0xAA]);
    Ok(())
}

#[test]
fn clones_share_one_bus() -> Result<()> {
    let mut bus = Bus::new();
    let reader = IccaDevice::new(
        IccaConfig::new().with_keypad_thread(false),
        Arc::new(NoInput),
    )?;
    bus.register_device(Box::new(reader))?;

    let port = BusPort::new(bus);
    let mut writer = port.clone();
    let handle = thread::spawn(move || -> std::io::Result<()> {
        writer.write_all(&command_frame(2, ACIO_CMD_STARTUP, 9, &[]))?;
        writer.flush()
    });
    handle.join().expect("writer thread")?;

    let mut out = Vec::new();
    let mut reader = port.clone();
    reader.read_to_end(&mut out)?;
    let replies = decode_responses(&out);
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].addr, 0x82);
    assert_eq!(replies[0].pid(), 9);
    assert_eq!(port.bytes_available(), 0);
    Ok(())
}
