// libacio/src/protocol/version.rs

/// Firmware build stamp reported in version records.
pub const FIRMWARE_DATE: &str = "Apr  1 2014";
pub const FIRMWARE_TIME: &str = "12:00:00";

/// Reply payload of `GET_VERSION` (44 bytes).
/// Layout: [type u32 LE] [flag] [major] [minor] [rev] [code(4)] [date(16)] [time(16)]
/// Text fields are NUL padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionData {
    pub device_type: u32,
    pub flag: u8,
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
    pub code: [u8; 4],
    pub date: [u8; 16],
    pub time: [u8; 16],
}

impl VersionData {
    pub const SIZE: usize = 44;

    pub fn new(device_type: u32, flag: u8, major: u8, minor: u8, revision: u8, code: &str) -> Self {
        Self {
            device_type,
            flag,
            major,
            minor,
            revision,
            code: padded(code),
            date: padded(FIRMWARE_DATE),
            time: padded(FIRMWARE_TIME),
        }
    }

    pub fn code_str(&self) -> String {
        trimmed(&self.code)
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.device_type.to_le_bytes());
        out[4] = self.flag;
        out[5] = self.major;
        out[6] = self.minor;
        out[7] = self.revision;
        out[8..12].copy_from_slice(&self.code);
        out[12..28].copy_from_slice(&self.date);
        out[28..44].copy_from_slice(&self.time);
        out
    }
}

fn padded<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let len = s.len().min(N);
    out[..len].copy_from_slice(&s.as_bytes()[..len]);
    out
}

fn trimmed(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
