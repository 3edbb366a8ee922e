use crate::interface::fix::FixInfo;
use std::fmt::Write;

pub const PAYLOAD_LEN: usize = 16;
pub const PAYLOAD_TYPE_TAG: u8 = 0x8A;
/// GPS time runs ahead of UTC by this many leap seconds.
pub const GPS_UTC_LEAP_SECONDS: u64 = 18;

const FLAG_OFFSET: usize = 1;
const TIME_OFFSET: usize = 10;
const FIX_QUALITY_OFFSET: usize = 15;

/// Fixed 16-byte application record transmitted in one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    pub fn flag_byte(&self) -> u8 {
        self.0[FLAG_OFFSET]
    }

    /// UTC seconds stored in bytes 10..14.
    pub fn corrected_time(&self) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.0[TIME_OFFSET..TIME_OFFSET + 4]);
        u32::from_be_bytes(word)
    }

    pub fn fix_quality(&self) -> u8 {
        self.0[FIX_QUALITY_OFFSET]
    }

    pub fn hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(PAYLOAD_LEN * 2), |mut out, b| {
            let _ = write!(out, "{:02x}", b);
            out
        })
    }
}

impl From<[u8; PAYLOAD_LEN]> for Payload {
    fn from(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Self(bytes)
    }
}

/// Packs a detection result into a payload. Total: missing inputs encode as zero.
///
/// Layout (big-endian):
///
/// | byte  | content                              |
/// |-------|--------------------------------------|
/// | 0     | payload type tag `0x8A`              |
/// | 1     | low 8 bits of `flag`                 |
/// | 2..10 | reserved, zero                       |
/// | 10..14| `clock_seconds - 18` as `u32`        |
/// | 14    | reserved, zero                       |
/// | 15    | fix-quality indicator                |
pub fn encode(flag: i16, fix: &FixInfo, clock_seconds: u64) -> Payload {
    let mut bytes = [0u8; PAYLOAD_LEN];
    bytes[0] = PAYLOAD_TYPE_TAG;
    bytes[FLAG_OFFSET] = flag.to_be_bytes()[1];

    // low 32 bits, as the radio clock is wider than the field
    let utc = clock_seconds.saturating_sub(GPS_UTC_LEAP_SECONDS) as u32;
    bytes[TIME_OFFSET..TIME_OFFSET + 4].copy_from_slice(&utc.to_be_bytes());

    bytes[FIX_QUALITY_OFFSET] = fix.quality;
    Payload(bytes)
}
