#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{self, wire};
use libacio::protocol::{Frame, Message, MessageKind};
use libacio::test_support::command_frame;

#[test]
fn request_fixture_matches_encoder() {
    let encoded = command_frame(0x01, 0x0134, 0x05, &[]);
    assert_eq!(encoded, wire(fixtures::GET_STATUS_NODE1));
}

#[test]
fn stuffed_payload_byte() {
    let msg = Message::command(0x01, 0x0135, 0x00, vec![0xAA]);
    assert_eq!(Frame::encode(&msg), wire(fixtures::ESCAPED_PAYLOAD_FRAME));
    assert_eq!(Frame::decode(&wire(fixtures::ESCAPED_PAYLOAD_FRAME)), Some(msg));
}

#[test]
fn stuffed_checksum_byte() {
    let msg = Message::command(0x01, 0x0001, 0x00, vec![0xFC]);
    assert_eq!(Frame::encode(&msg), wire(fixtures::ESCAPED_CHECKSUM_FRAME));
    assert_eq!(Frame::decode(&wire(fixtures::ESCAPED_CHECKSUM_FRAME)), Some(msg));
}

#[test]
fn broadcast_header_is_two_bytes() {
    let msg = Message::broadcast(vec![0x01, 0x02, 0x03]);
    let encoded = Frame::encode(&msg);
    // SOF SOF 70 03 01 02 03 chk
    assert_eq!(encoded.len(), 8);
    assert_eq!(&encoded[2..4], &[0x70, 0x03]);
    let decoded = Frame::decode(&encoded).unwrap();
    assert_eq!(decoded.kind, MessageKind::Broadcast);
    assert_eq!(decoded.payload, vec![0x01, 0x02, 0x03]);
}

#[test]
fn garbage_before_frame_is_skipped() {
    let msg = Message::command(0x02, 0x0131, 0x11, vec![0x00]);
    let mut capture = vec![0x13, 0x37, 0x00];
    capture.extend(Frame::encode(&msg));
    assert_eq!(Frame::decode(&capture), Some(msg));
}

#[test]
fn parse_reports_checksum_and_length() {
    use libacio::Error;

    let err = Frame::parse(&[0x01, 0x01, 0x34, 0x05, 0x00, 0x00]).unwrap_err();
    assert!(matches!(
        err,
        Error::ChecksumMismatch {
            expected: 0x3B,
            actual: 0x00
        }
    ));

    let err = Frame::parse(&[0x01, 0x01, 0x34, 0x05, 0x02, 0x00]).unwrap_err();
    assert!(matches!(err, Error::InvalidLength { expected: 8, actual: 6 }));
}

#[test]
fn oversize_payload_is_clamped() {
    common::init_logger();
    let msg = Message::command(0x01, 0x0131, 0x00, vec![0x11; 300]);
    let decoded = Frame::decode(&Frame::encode(&msg)).unwrap();
    assert_eq!(decoded.payload.len(), 255);
}
