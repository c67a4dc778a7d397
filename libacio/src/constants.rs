// libacio/src/constants.rs
//! Common protocol constants used across the crate

/// Start-of-frame marker. Also used for the link-level handshake.
pub const ACIO_SOF: u8 = 0xAA;

/// Escape marker: the following wire byte is the complement of the real one.
pub const ACIO_ESCAPE: u8 = 0xFF;

/// Broadcast address. Broadcast frames carry no code or packet id.
pub const ACIO_BROADCAST: u8 = 0x70;

/// Set on the address byte of every frame sent by a responder
/// (except replies to address 0).
pub const ACIO_RESPONSE_FLAG: u8 = 0x80;

/// Command frame header: addr, code (2), pid, data_size
pub const MSG_HEADER_SIZE: usize = 5;

/// Broadcast frame header: addr, data_size
pub const MSG_BROADCAST_HEADER_SIZE: usize = 2;

/// Maximum payload length of a single frame
pub const MSG_MAX_PAYLOAD_LEN: usize = 255;

/// Largest node address a device may occupy; the broadcast address and
/// everything above it are reserved.
pub const MAX_NODE_ADDR: u8 = ACIO_BROADCAST - 1;

/// Inbound accumulator capacity (logical bytes)
pub const READ_BUFFER_CAPACITY: usize = 1024;

/// Outbound response buffer capacity (wire bytes)
pub const RESPONSE_BUFFER_CAPACITY: usize = 4096;

/// General command codes understood by every node.
pub const ACIO_CMD_ASSIGN_ADDRS: u16 = 0x0001;
pub const ACIO_CMD_GET_VERSION: u16 = 0x0002;
pub const ACIO_CMD_STARTUP: u16 = 0x0003;
pub const ACIO_CMD_KEEPALIVE: u16 = 0x0080;
pub const ACIO_CMD_CLEAR: u16 = 0x0100;
/// Reserved code some games send as a bus-wide broadcast command.
pub const ACIO_CMD_BROADCAST: u16 = 0x00FF;

/// Board identification probes answered with status 0
pub const ACIO_CMD_GET_PRODUCT_NUMBER: u16 = 0x0030;
pub const ACIO_CMD_GET_MICOM_INFO: u16 = 0x0031;
// libacio/src/constants.rs
