use core::fmt;

use crate::wire::PcuifErr;

/// Bit length of a normal PDCH radio block (23 octets)
pub const RLCMAC_FRAME_BITS: usize = 23 * 8;

/// Payload type tag, the two most significant bits of the first octet
/// (GSM 04.60 clause 10.4.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlcMacPayloadType {
    /// RLC data block
    Data,
    /// RLC/MAC control block, no optional octets
    Control,
    /// RLC/MAC control block with optional octets
    ControlExt,
    Reserved,
}

/// A bit-oriented RLC/MAC frame as exchanged between the radio side and the
/// PCU. The frame owns its bits; it is consumed exactly once, either
/// enqueued on the packet channel or packed into a data primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlcMacFrame {
    len_bits: usize,
    data: Vec<u8>,
}

impl RlcMacFrame {
    /// A zeroed frame of `len_bits` bits
    pub fn new(len_bits: usize) -> RlcMacFrame {
        RlcMacFrame {
            len_bits,
            data: vec![0; len_bits.div_ceil(8)],
        }
    }

    /// Unpack a frame from a byte buffer. `bytes` must hold at least
    /// `len_bits` bits; trailing pad bits of the last octet are forced to
    /// zero so equality and round-trips are well defined.
    pub fn from_bytes(bytes: &[u8], len_bits: usize) -> Result<RlcMacFrame, PcuifErr> {
        let need = len_bits.div_ceil(8);
        if bytes.len() < need {
            return Err(PcuifErr::ShortRecord {
                expected: need,
                found: bytes.len(),
            });
        }
        let mut data = bytes[..need].to_vec();
        // Bits are stored MSB-first, so the valid bits of the last octet are
        // its high bits and the low `pad` bits are padding.
        let pad = need * 8 - len_bits;
        if pad > 0 {
            if let Some(last) = data.last_mut() {
                *last &= !((1u8 << pad) - 1);
            }
        }
        Ok(RlcMacFrame { len_bits, data })
    }

    /// Unpack a standard 184-bit PDCH radio block
    pub fn pdch_block(bytes: &[u8]) -> Result<RlcMacFrame, PcuifErr> {
        Self::from_bytes(bytes, RLCMAC_FRAME_BITS)
    }

    pub fn len_bits(&self) -> usize {
        self.len_bits
    }

    pub fn len_bytes(&self) -> usize {
        self.data.len()
    }

    /// Pack the frame into its byte representation, MSB-first
    pub fn pack(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn payload_type(&self) -> RlcMacPayloadType {
        let tag = self.data.first().map(|b| b >> 6).unwrap_or(3);
        match tag {
            0 => RlcMacPayloadType::Data,
            1 => RlcMacPayloadType::Control,
            2 => RlcMacPayloadType::ControlExt,
            _ => RlcMacPayloadType::Reserved,
        }
    }
}

impl fmt::Display for RlcMacFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RlcMac[{} bits, {:?}]", self.len_bits, self.payload_type())?;
        for b in &self.data {
            write!(f, " {:02x}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack_round_trip() {
        let bytes: Vec<u8> = (0..23).map(|i| (i * 11) as u8).collect();
        let frame = RlcMacFrame::pdch_block(&bytes).unwrap();
        assert_eq!(frame.len_bits(), 184);
        assert_eq!(frame.pack(), &bytes[..]);
        let again = RlcMacFrame::pdch_block(frame.pack()).unwrap();
        assert_eq!(again, frame);
    }

    #[test]
    fn test_pad_bits_forced_zero() {
        // 12-bit frame: low 4 bits of the second octet are padding
        let frame = RlcMacFrame::from_bytes(&[0xab, 0xff], 12).unwrap();
        assert_eq!(frame.pack(), &[0xab, 0xf0]);
        let frame2 = RlcMacFrame::from_bytes(frame.pack(), 12).unwrap();
        assert_eq!(frame2, frame);
    }

    #[test]
    fn test_short_buffer_is_error() {
        assert!(RlcMacFrame::pdch_block(&[0u8; 22]).is_err());
    }

    #[test]
    fn test_payload_type_tag() {
        assert_eq!(RlcMacFrame::from_bytes(&[0x00], 8).unwrap().payload_type(), RlcMacPayloadType::Data);
        assert_eq!(RlcMacFrame::from_bytes(&[0x40], 8).unwrap().payload_type(), RlcMacPayloadType::Control);
        assert_eq!(RlcMacFrame::from_bytes(&[0x80], 8).unwrap().payload_type(), RlcMacPayloadType::ControlExt);
        assert_eq!(RlcMacFrame::from_bytes(&[0xc0], 8).unwrap().payload_type(), RlcMacPayloadType::Reserved);
    }
}
