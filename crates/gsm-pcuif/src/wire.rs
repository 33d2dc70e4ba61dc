//! Bounds-checked readers/writers for the fixed-layout primitive records.
//! All multi-byte fields are little-endian, matching the packed structs the
//! remote packet control unit reads them into.

#[derive(Debug, PartialEq, Eq)]
pub enum PcuifErr {
    BufferEnded { field: &'static str },
    PayloadTooLong { len: usize, cap: usize },
    ShortRecord { expected: usize, found: usize },
    InvalidValue { field: &'static str, value: u64 },
}

pub struct WireWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        WireWriter { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&mut [u8], PcuifErr> {
        if self.pos + len > self.buf.len() {
            return Err(PcuifErr::BufferEnded { field });
        }
        let slice = &mut self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn put_u8(&mut self, value: u8, field: &'static str) -> Result<(), PcuifErr> {
        self.take(1, field)?[0] = value;
        Ok(())
    }

    pub fn put_u16(&mut self, value: u16, field: &'static str) -> Result<(), PcuifErr> {
        self.take(2, field)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn put_i16(&mut self, value: i16, field: &'static str) -> Result<(), PcuifErr> {
        self.take(2, field)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn put_u32(&mut self, value: u32, field: &'static str) -> Result<(), PcuifErr> {
        self.take(4, field)?.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn put_bytes(&mut self, value: &[u8], field: &'static str) -> Result<(), PcuifErr> {
        self.take(value.len(), field)?.copy_from_slice(value);
        Ok(())
    }

    /// Skip over spare/padding bytes, leaving them zeroed
    pub fn skip(&mut self, len: usize, field: &'static str) -> Result<(), PcuifErr> {
        self.take(len, field)?;
        Ok(())
    }
}

pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        WireReader { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&[u8], PcuifErr> {
        if self.pos + len > self.buf.len() {
            return Err(PcuifErr::BufferEnded { field });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn get_u8(&mut self, field: &'static str) -> Result<u8, PcuifErr> {
        Ok(self.take(1, field)?[0])
    }

    pub fn get_u16(&mut self, field: &'static str) -> Result<u16, PcuifErr> {
        let b = self.take(2, field)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn get_i16(&mut self, field: &'static str) -> Result<i16, PcuifErr> {
        let b = self.take(2, field)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn get_u32(&mut self, field: &'static str) -> Result<u32, PcuifErr> {
        let b = self.take(4, field)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn get_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], PcuifErr> {
        if self.pos + len > self.buf.len() {
            return Err(PcuifErr::BufferEnded { field });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize, field: &'static str) -> Result<(), PcuifErr> {
        self.take(len, field)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_bounds() {
        let mut buf = [0u8; 4];
        let mut w = WireWriter::new(&mut buf);
        w.put_u16(0x1234, "a").unwrap();
        w.put_u8(0x56, "b").unwrap();
        assert_eq!(w.put_u16(0xffff, "c"), Err(PcuifErr::BufferEnded { field: "c" }));
        assert_eq!(buf, [0x34, 0x12, 0x56, 0x00]);
    }

    #[test]
    fn test_reader_round_trip() {
        let mut buf = [0u8; 12];
        {
            let mut w = WireWriter::new(&mut buf);
            w.put_u8(0xab, "m").unwrap();
            w.skip(1, "spare").unwrap();
            w.put_i16(-63, "qta").unwrap();
            w.put_u32(2715647, "frame").unwrap();
            w.put_bytes(&[1, 2, 3, 4], "data").unwrap();
        }
        let mut r = WireReader::new(&buf);
        assert_eq!(r.get_u8("m").unwrap(), 0xab);
        r.skip(1, "spare").unwrap();
        assert_eq!(r.get_i16("qta").unwrap(), -63);
        assert_eq!(r.get_u32("frame").unwrap(), 2715647);
        assert_eq!(r.get_bytes(4, "data").unwrap(), &[1, 2, 3, 4]);
        assert_eq!(r.get_u8("end"), Err(PcuifErr::BufferEnded { field: "end" }));
    }
}
