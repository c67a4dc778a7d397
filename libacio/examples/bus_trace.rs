//! Drive an emulated bus the way a game does and print the wire traffic.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p libacio --example bus_trace

use std::sync::Arc;

use libacio::constants::{ACIO_CMD_ASSIGN_ADDRS, ACIO_CMD_GET_VERSION};
use libacio::device::models::icca::commands::{ICCA_CMD_GET_STATUS, ICCA_CMD_KEY_EXCHANGE};
use libacio::prelude::*;
use libacio::test_support::command_frame;

fn exchange(bus: &mut Bus, label: &str, wire: &[u8]) {
    println!("{:<12} -> {}", label, bytes_to_hex_spaced(wire));
    let out = bus.feed(wire);
    if out.is_empty() {
        println!("{:<12} <- (no reply)", "");
    } else {
        println!("{:<12} <- {}", "", bytes_to_hex_spaced(&out));
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let input = Arc::new(MockInput::new(2));
    let reader = IccaDevice::new(IccaConfig::new(), input.clone())?;

    let mut bus = Bus::builder()
        .with_device(NoopDevice::new(1))
        .with_device(reader)
        .build()?;

    exchange(&mut bus, "handshake", &[0xAA; 4]);
    exchange(
        &mut bus,
        "assign",
        &command_frame(0x00, ACIO_CMD_ASSIGN_ADDRS, 0x01, &[0x00]),
    );
    exchange(&mut bus, "noop ver", &command_frame(0x01, ACIO_CMD_GET_VERSION, 0x02, &[]));
    exchange(&mut bus, "icca ver", &command_frame(0x02, ACIO_CMD_GET_VERSION, 0x03, &[]));
    exchange(
        &mut bus,
        "key exch",
        &command_frame(0x02, ICCA_CMD_KEY_EXCHANGE, 0x04, &[0x12, 0x34, 0x56, 0x78]),
    );

    input.insert_card(0, CardUid::from([0x01, 0x2E, 0x3D, 0x4C, 0x5B, 0x6A, 0x79, 0x88]));
    input.press(0, Key::Key5);
    exchange(&mut bus, "status", &command_frame(0x02, ICCA_CMD_GET_STATUS, 0x05, &[]));

    Ok(())
}
