//! ICCA command codes and fixed payload values

pub const ICCA_CMD_REINITIALIZE: u16 = 0x0130;
pub const ICCA_CMD_READ_CARD_UID: u16 = 0x0131;
pub const ICCA_CMD_GET_STATUS: u16 = 0x0134;
pub const ICCA_CMD_SET_ACTION: u16 = 0x0135;
/// Power countdown, only used by 1.7 firmware
pub const ICCA_CMD_POWER_CONTROL: u16 = 0x013A;
pub const ICCA_CMD_KEY_EXCHANGE: u16 = 0x0160;
pub const ICCA_CMD_READ_CARD_UID_NEW: u16 = 0x0161;
pub const ICCA_CMD_GET_STATUS_ENC: u16 = 0x0164;

/// Discovery probes answered with status 0
pub const ICCA_CMD_PROBE_3A: u16 = 0x003A;
pub const ICCA_CMD_PROBE_116: u16 = 0x0116;
pub const ICCA_CMD_PROBE_120: u16 = 0x0120;

/// SET ACTION sub-commands (second payload byte)
pub const ACTION_ACCEPT_DISABLE: u8 = 0x00;
pub const ACTION_ACCEPT_ENABLE: u8 = 0x11;
pub const ACTION_EJECT: u8 = 0x12;

/// Key the reader answers with in KEY EXCHANGE
pub const READER_KEY: u32 = 0xBEEF_CAFE;

pub const STATUS_BLOCK_LEN: usize = 16;
/// Status block plus 2-byte CRC
pub const ENC_STATUS_LEN: usize = STATUS_BLOCK_LEN + 2;

/// Version record fields
pub const VERSION_TYPE: u32 = 0x3;
pub const VERSION_MAJOR: u8 = 1;
