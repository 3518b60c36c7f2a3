//! CCMP additional authenticated data.
//!
//! Built from the MPDU header per IEEE 802.11-2007 8.3.3.3.2. The Duration
//! field is left out and the frame control subfields that may change on
//! retransmission are masked to zero, as is the sequence control field.
//!
//! Layout (exactly 22 bytes):
//! ```text
//! [ FC & 0x8FC7 (BE16) | A1 (6) | A2 (6) | A3 (6) | SC = 0 (2) ]
//! ```

use crate::core::{
    AAD_FRAME_CONTROL_MASK, CCMP_AAD_SIZE, CryptoError, CryptoResult, FRAME_CONTROL_FROM_DS,
    FRAME_CONTROL_TO_DS, MacAddress,
};

/// 802.11 frame control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameControl(u16);

impl FrameControl {
    /// ToDS set (station -> distribution system).
    pub const TO_DS: Self = Self(FRAME_CONTROL_TO_DS);
    /// FromDS set (distribution system -> station).
    pub const FROM_DS: Self = Self(FRAME_CONTROL_FROM_DS);

    /// Create from the raw field.
    pub fn from_u16(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw field.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Check if ToDS is set.
    pub fn to_ds(self) -> bool {
        self.0 & FRAME_CONTROL_TO_DS != 0
    }

    /// Check if FromDS is set.
    pub fn from_ds(self) -> bool {
        self.0 & FRAME_CONTROL_FROM_DS != 0
    }

    /// Field as authenticated by CCMP.
    pub fn masked(self) -> u16 {
        self.0 & AAD_FRAME_CONTROL_MASK
    }
}

impl From<u16> for FrameControl {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Construct the AAD of a UDS data frame.
///
/// The roles of the three address fields depend on the DS bits:
///
/// | ToDS | FromDS | A1       | A2     | A3       |
/// |------|--------|----------|--------|----------|
/// | 0    | 1      | receiver | bssid  | sender   |
/// | 1    | 0      | bssid    | sender | receiver |
///
/// The hardware never emits frames with both bits set (or neither), so those
/// fail with [`CryptoError::InvalidFrameControl`].
pub fn build_aad(
    sender: &MacAddress,
    receiver: &MacAddress,
    bssid: &MacAddress,
    frame_control: u16,
) -> CryptoResult<[u8; CCMP_AAD_SIZE]> {
    let fc = FrameControl::from_u16(frame_control);

    let (a1, a2, a3) = match (fc.to_ds(), fc.from_ds()) {
        (false, true) => (receiver, bssid, sender),
        (true, false) => (bssid, sender, receiver),
        _ => return Err(CryptoError::InvalidFrameControl(frame_control)),
    };

    let mut aad = [0u8; CCMP_AAD_SIZE];
    aad[0..2].copy_from_slice(&fc.masked().to_be_bytes());
    aad[2..8].copy_from_slice(a1.as_bytes());
    aad[8..14].copy_from_slice(a2.as_bytes());
    aad[14..20].copy_from_slice(a3.as_bytes());
    // Sequence control (bytes 20-21) - zero
    Ok(aad)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    const RECEIVER: MacAddress = MacAddress([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
    const BSSID: MacAddress = MacAddress([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);

    #[test]
    fn test_frame_control_bits() {
        assert!(FrameControl::TO_DS.to_ds());
        assert!(!FrameControl::TO_DS.from_ds());
        assert!(FrameControl::FROM_DS.from_ds());
        assert!(!FrameControl::FROM_DS.to_ds());
        assert_eq!(FrameControl::from(0xFFFD).masked(), 0x8FC5);
    }

    #[test]
    fn test_aad_to_ds() {
        let aad = build_aad(&SENDER, &RECEIVER, &BSSID, FRAME_CONTROL_TO_DS).unwrap();
        assert_eq!(
            hex::encode(aad),
            "0001020000000001aabbccddeeff1122334455660000"
        );
    }

    #[test]
    fn test_aad_from_ds() {
        let aad = build_aad(&SENDER, &RECEIVER, &BSSID, FRAME_CONTROL_FROM_DS).unwrap();
        assert_eq!(&aad[0..2], &[0x00, 0x02]);
        assert_eq!(&aad[2..8], RECEIVER.as_bytes());
        assert_eq!(&aad[8..14], BSSID.as_bytes());
        assert_eq!(&aad[14..20], SENDER.as_bytes());
        assert_eq!(&aad[20..22], &[0, 0]);
    }

    #[test]
    fn test_aad_masks_frame_control() {
        // Retry, power management and more data bits must not be authenticated
        let aad = build_aad(&SENDER, &RECEIVER, &BSSID, 0x7039).unwrap();
        assert_eq!(u16::from_be_bytes([aad[0], aad[1]]), 0x7039 & AAD_FRAME_CONTROL_MASK);
        assert_eq!(u16::from_be_bytes([aad[0], aad[1]]), 0x0001);
    }

    #[test]
    fn test_aad_invalid_frame_control() {
        assert_eq!(
            build_aad(&SENDER, &RECEIVER, &BSSID, 0x0003),
            Err(CryptoError::InvalidFrameControl(0x0003))
        );
        assert_eq!(
            build_aad(&SENDER, &RECEIVER, &BSSID, 0x0008),
            Err(CryptoError::InvalidFrameControl(0x0008))
        );
    }
}
