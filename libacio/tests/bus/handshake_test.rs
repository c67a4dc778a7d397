#[path = "../common/mod.rs"]
mod common;

use libacio::bus::Bus;
use libacio::constants::ACIO_CMD_KEEPALIVE;
use libacio::protocol::Frame;
use libacio::test_support::{command_frame, decode_responses};

#[test]
fn three_sofs_answer_one_pair() {
    let mut bus = Bus::new();
    assert_eq!(bus.feed(&[0xAA, 0xAA, 0xAA]), vec![0xAA, 0xAA]);
}

#[test]
fn four_sofs_answer_two_pairs() {
    let mut bus = Bus::new();
    assert_eq!(bus.feed(&[0xAA; 4]), vec![0xAA; 4]);
}

#[test]
fn sofs_split_across_writes_still_pair_up() {
    let mut bus = Bus::new();
    assert!(bus.feed(&[0xAA]).is_empty());
    assert_eq!(bus.feed(&[0xAA]), vec![0xAA, 0xAA]);
}

#[test]
fn handshake_then_frame() {
    common::init_logger();
    let mut bus = Bus::new();
    let mut stream = vec![0xAA; 8];
    stream.extend(command_frame(3, ACIO_CMD_KEEPALIVE, 7, &[]));

    let out = bus.feed(&stream);
    assert_eq!(&out[..8], &[0xAA; 8]);
    let replies = decode_responses(&out[8..]);
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].addr, 0x83);
    assert_eq!(replies[0].payload, vec![0x00]);
}

#[test]
fn escaped_sof_in_payload_is_not_a_handshake() {
    let mut bus = Bus::new();
    // unknown command: decoded but unanswered
    let wire = command_frame(1, 0x0777, 0, &[0xAA, 0xAA, 0xAA]);
    assert!(bus.feed(&wire).is_empty());
}

#[test]
fn responses_start_with_two_sofs() {
    let mut bus = Bus::new();
    let out = bus.feed(&command_frame(1, ACIO_CMD_KEEPALIVE, 1, &[]));
    assert_eq!(&out[..2], &[0xAA, 0xAA]);
    assert!(Frame::decode(&out).is_some());
}
