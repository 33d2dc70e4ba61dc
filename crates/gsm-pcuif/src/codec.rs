use gsm_core::PcuifVersion;

use crate::primitives::*;
use crate::wire::{PcuifErr, WireReader, WireWriter};

/// Record length of the classic layout
const RECORD_LEN_V5: usize = 176;
/// Record length of the extended layout
const RECORD_LEN_V8: usize = 180;

/// Offset of the first payload byte; bytes 0..4 are the record header
/// (discriminator, BTS number, two spare bytes)
pub const PAYLOAD_OFS: usize = 4;

/// Codec for the fixed-layout primitive records exchanged with the PCU.
///
/// The layout version is fixed at construction; both encode and decode
/// operate on exactly one record shape. Decoding a record with an unknown
/// discriminator yields `Ok(None)`: the interface tolerates primitives from
/// newer revisions by skipping them, while truncated or internally
/// inconsistent records are real errors.
pub struct PcuifCodec {
    version: PcuifVersion,
}

impl PcuifCodec {
    pub fn new(version: PcuifVersion) -> Self {
        PcuifCodec { version }
    }

    pub fn version(&self) -> PcuifVersion {
        self.version
    }

    /// Every record of a given layout version has this exact length,
    /// regardless of the variant; unused trailing bytes are zero.
    pub fn record_len(&self) -> usize {
        match self.version {
            PcuifVersion::V5 => RECORD_LEN_V5,
            PcuifVersion::V8 => RECORD_LEN_V8,
        }
    }

    pub fn encode(&self, prim: &PcuPrimitive) -> Result<Vec<u8>, PcuifErr> {
        let mut buf = vec![0u8; self.record_len()];
        {
            let mut w = WireWriter::new(&mut buf);
            w.put_u8(prim.msg_type(), "msg_type")?;
            w.put_u8(0, "bts_nr")?;
            w.skip(2, "spare")?;

            match prim {
                PcuPrimitive::InfoInd(p) => self.encode_info_ind(&mut w, p)?,
                PcuPrimitive::RachInd(p) => encode_rach_ind(&mut w, p)?,
                PcuPrimitive::RtsInd(p) => encode_rts_ind(&mut w, p)?,
                PcuPrimitive::DataInd(p) => {
                    self.encode_data(&mut w, p.sapi, p.ts, p.frame, p.block_nr, p.arfcn, &p.data)?
                }
                PcuPrimitive::DataReq(p) => {
                    self.encode_data(&mut w, p.sapi, p.ts, p.frame, p.block_nr, p.arfcn, &p.data)?
                }
                PcuPrimitive::TimeInd(p) => w.put_u32(p.frame, "frame")?,
            }
        }
        Ok(buf)
    }

    /// Decode one received record. `Ok(None)` means the discriminator is not
    /// one of ours and the datagram should be skipped silently.
    pub fn decode(&self, buf: &[u8]) -> Result<Option<PcuPrimitive>, PcuifErr> {
        let mut r = WireReader::new(buf);
        let msg_type = r.get_u8("msg_type")?;

        // The record layouts are fixed-size; anything shorter is truncation.
        // Only checked for recognized discriminators, so foreign primitives
        // of any size still decode to None.
        let known = matches!(
            msg_type,
            PCUIF_MSG_INFO_IND
                | PCUIF_MSG_RACH_IND
                | PCUIF_MSG_RTS_IND
                | PCUIF_MSG_DATA_IND
                | PCUIF_MSG_DATA_REQ
                | PCUIF_MSG_TIME_IND
        );
        if !known {
            return Ok(None);
        }
        if buf.len() < self.record_len() {
            return Err(PcuifErr::ShortRecord {
                expected: self.record_len(),
                found: buf.len(),
            });
        }

        r.skip(1, "bts_nr")?;
        r.skip(2, "spare")?;

        let prim = match msg_type {
            PCUIF_MSG_INFO_IND => PcuPrimitive::InfoInd(self.decode_info_ind(&mut r)?),
            PCUIF_MSG_RACH_IND => PcuPrimitive::RachInd(decode_rach_ind(&mut r)?),
            PCUIF_MSG_RTS_IND => PcuPrimitive::RtsInd(decode_rts_ind(&mut r)?),
            PCUIF_MSG_DATA_IND => {
                let (sapi, ts, frame, block_nr, arfcn, data) = self.decode_data(&mut r)?;
                PcuPrimitive::DataInd(DataInd { sapi, ts, frame, block_nr, arfcn, data })
            }
            PCUIF_MSG_DATA_REQ => {
                let (sapi, ts, frame, block_nr, arfcn, data) = self.decode_data(&mut r)?;
                PcuPrimitive::DataReq(DataReq { sapi, ts, frame, block_nr, arfcn, data })
            }
            PCUIF_MSG_TIME_IND => PcuPrimitive::TimeInd(TimeInd { frame: r.get_u32("frame")? }),
            _ => unreachable!(),
        };
        Ok(Some(prim))
    }

    fn encode_info_ind(&self, w: &mut WireWriter, p: &InfoInd) -> Result<(), PcuifErr> {
        w.put_u16(p.mcc, "mcc")?;
        w.put_u16(p.mnc, "mnc")?;
        w.put_u16(p.lac, "lac")?;
        w.put_u16(p.cell_id, "cell_id")?;
        w.put_u8(p.bsic, "bsic")?;
        w.skip(1, "spare")?;
        w.put_u16(p.arfcn, "arfcn")?;
        w.put_u8(p.t3169, "t3169")?;
        w.put_u8(p.t3191, "t3191")?;
        w.put_u16(p.t3193_ms, "t3193_ms")?;
        if self.version == PcuifVersion::V8 {
            w.put_u8(p.initial_cs, "initial_cs")?;
            w.skip(1, "spare")?;
        }
        Ok(())
    }

    fn decode_info_ind(&self, r: &mut WireReader) -> Result<InfoInd, PcuifErr> {
        let mcc = r.get_u16("mcc")?;
        let mnc = r.get_u16("mnc")?;
        let lac = r.get_u16("lac")?;
        let cell_id = r.get_u16("cell_id")?;
        let bsic = r.get_u8("bsic")?;
        r.skip(1, "spare")?;
        let arfcn = r.get_u16("arfcn")?;
        let t3169 = r.get_u8("t3169")?;
        let t3191 = r.get_u8("t3191")?;
        let t3193_ms = r.get_u16("t3193_ms")?;
        let initial_cs = if self.version == PcuifVersion::V8 {
            let cs = r.get_u8("initial_cs")?;
            r.skip(1, "spare")?;
            cs
        } else {
            1
        };
        Ok(InfoInd { mcc, mnc, lac, cell_id, bsic, arfcn, t3169, t3191, t3193_ms, initial_cs })
    }

    fn encode_data(
        &self,
        w: &mut WireWriter,
        sapi: PcuSapi,
        ts: u8,
        frame: u32,
        block_nr: u8,
        arfcn: u16,
        data: &[u8],
    ) -> Result<(), PcuifErr> {
        if data.len() > PCUIF_DATA_CAP {
            return Err(PcuifErr::PayloadTooLong {
                len: data.len(),
                cap: PCUIF_DATA_CAP,
            });
        }

        w.put_u8(sapi.into_raw(), "sapi")?;
        w.put_u8(ts, "ts")?;
        w.put_u8(block_nr, "block_nr")?;
        match self.version {
            PcuifVersion::V5 => {
                w.put_u8(data.len() as u8, "len")?;
                w.put_u32(frame, "frame")?;
                w.put_u16(arfcn, "arfcn")?;
            }
            PcuifVersion::V8 => {
                w.skip(1, "spare")?;
                w.put_u16(data.len() as u16, "len")?;
                w.skip(2, "spare")?;
                w.put_u32(frame, "frame")?;
                w.put_u16(arfcn, "arfcn")?;
            }
        }
        w.put_bytes(data, "data")?;
        Ok(())
    }

    fn decode_data(
        &self,
        r: &mut WireReader,
    ) -> Result<(PcuSapi, u8, u32, u8, u16, Vec<u8>), PcuifErr> {
        let sapi = PcuSapi::from_raw(r.get_u8("sapi")?)?;
        let ts = r.get_u8("ts")?;
        let block_nr = r.get_u8("block_nr")?;
        let (len, frame, arfcn) = match self.version {
            PcuifVersion::V5 => {
                let len = r.get_u8("len")? as usize;
                let frame = r.get_u32("frame")?;
                let arfcn = r.get_u16("arfcn")?;
                (len, frame, arfcn)
            }
            PcuifVersion::V8 => {
                r.skip(1, "spare")?;
                let len = r.get_u16("len")? as usize;
                r.skip(2, "spare")?;
                let frame = r.get_u32("frame")?;
                let arfcn = r.get_u16("arfcn")?;
                (len, frame, arfcn)
            }
        };
        if len > PCUIF_DATA_CAP {
            return Err(PcuifErr::InvalidValue {
                field: "len",
                value: len as u64,
            });
        }
        let data = r.get_bytes(len, "data")?.to_vec();
        Ok((sapi, ts, frame, block_nr, arfcn, data))
    }
}

fn encode_rach_ind(w: &mut WireWriter, p: &RachInd) -> Result<(), PcuifErr> {
    w.put_u8(PcuSapi::Rach.into_raw(), "sapi")?;
    w.skip(1, "spare")?;
    w.put_u16(p.ra, "ra")?;
    w.put_i16(p.qta, "qta")?;
    w.put_u32(p.frame, "frame")?;
    Ok(())
}

fn decode_rach_ind(r: &mut WireReader) -> Result<RachInd, PcuifErr> {
    let _sapi = PcuSapi::from_raw(r.get_u8("sapi")?)?;
    r.skip(1, "spare")?;
    let ra = r.get_u16("ra")?;
    let qta = r.get_i16("qta")?;
    let frame = r.get_u32("frame")?;
    Ok(RachInd { ra, qta, frame })
}

fn encode_rts_ind(w: &mut WireWriter, p: &RtsInd) -> Result<(), PcuifErr> {
    w.put_u8(p.sapi.into_raw(), "sapi")?;
    w.put_u8(p.ts, "ts")?;
    w.put_u8(p.block_nr, "block_nr")?;
    w.skip(1, "spare")?;
    w.put_u32(p.frame, "frame")?;
    Ok(())
}

fn decode_rts_ind(r: &mut WireReader) -> Result<RtsInd, PcuifErr> {
    let sapi = PcuSapi::from_raw(r.get_u8("sapi")?)?;
    let ts = r.get_u8("ts")?;
    let block_nr = r.get_u8("block_nr")?;
    r.skip(1, "spare")?;
    let frame = r.get_u32("frame")?;
    Ok(RtsInd { sapi, ts, frame, block_nr })
}
