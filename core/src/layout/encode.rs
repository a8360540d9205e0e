//! layout/encode.rs
//!
//! Fixed-layout encoding.
//!
//! Design notes:
//! - `FieldWriter` stages one zeroed record of `layout.size()` bytes and fills
//!   it field by field in descriptor order (big-endian).
//! - The record reaches the output only on a successful `finish`; a failed or
//!   abandoned writer leaves `out` as it found it.
//! - Pad fields stay zero. Writing the wrong kind for the next field is a
//!   `FieldMismatch`, so encoders cannot drift from their decoders.
//! - Byte-array values longer than their field are `Oversize`, never cut.

use byteorder::{BigEndian, ByteOrder};

use crate::layout::types::{ByteLayout, FieldKind};
use crate::types::{DecodeError, Result};

/// Writer for one record of `layout`, appended to `out` on `finish`.
pub struct FieldWriter<'o> {
    layout: &'static ByteLayout,
    out: &'o mut Vec<u8>,
    record: Vec<u8>,
    index: usize,
    offset: usize,
}

impl<'o> FieldWriter<'o> {
    pub fn new(layout: &'static ByteLayout, out: &'o mut Vec<u8>) -> Self {
        Self {
            layout,
            out,
            record: vec![0u8; layout.size()],
            index: 0,
            offset: 0,
        }
    }

    fn mismatch(&self, expected: FieldKind) -> DecodeError {
        DecodeError::FieldMismatch {
            layout: self.layout.name,
            index: self.index,
            expected,
        }
    }

    /// Reserve the next field if it has kind `want`, returning its bytes.
    fn slot(&mut self, want: FieldKind) -> Result<&mut [u8]> {
        match self.layout.fields.get(self.index).map(|f| f.kind) {
            Some(kind) if kind == want => {
                let at = self.offset;
                self.offset += kind.width();
                self.index += 1;
                Ok(&mut self.record[at..at + kind.width()])
            }
            _ => Err(self.mismatch(want)),
        }
    }

    pub fn put_u8(&mut self, v: u8) -> Result<&mut Self> {
        self.slot(FieldKind::U8)?[0] = v;
        Ok(self)
    }

    pub fn put_u16(&mut self, v: u16) -> Result<&mut Self> {
        BigEndian::write_u16(self.slot(FieldKind::U16)?, v);
        Ok(self)
    }

    pub fn put_u32(&mut self, v: u32) -> Result<&mut Self> {
        BigEndian::write_u32(self.slot(FieldKind::U32)?, v);
        Ok(self)
    }

    pub fn put_u64(&mut self, v: u64) -> Result<&mut Self> {
        BigEndian::write_u64(self.slot(FieldKind::U64)?, v);
        Ok(self)
    }

    /// Byte-array field; shorter input is zero-filled, longer input is
    /// `Oversize`.
    pub fn put_bytes(&mut self, b: &[u8], width: usize) -> Result<&mut Self> {
        if b.len() > width {
            let field = match self.layout.fields.get(self.index) {
                Some(f) if f.kind == FieldKind::Bytes(width) => f.name,
                _ => return Err(self.mismatch(FieldKind::Bytes(width))),
            };
            return Err(DecodeError::Oversize {
                layout: self.layout.name,
                field,
                width,
                have: b.len(),
            });
        }
        let dst = self.slot(FieldKind::Bytes(width))?;
        dst[..b.len()].copy_from_slice(b);
        Ok(self)
    }

    /// Nested record; `encode` must write exactly `layout.size()` bytes.
    pub fn put_nested<F>(&mut self, layout: &'static ByteLayout, encode: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut inner = Vec::with_capacity(layout.size());
        encode(&mut inner)?;
        let dst = self.slot(FieldKind::Nested(layout))?;
        if inner.len() != dst.len() {
            return Err(DecodeError::WidthMismatch {
                layout: layout.name,
                need: dst.len(),
                have: inner.len(),
            });
        }
        dst.copy_from_slice(&inner);
        Ok(self)
    }

    /// Leave the next (pad) field zeroed.
    pub fn put_pad(&mut self) -> Result<&mut Self> {
        match self.layout.fields.get(self.index).map(|f| f.kind) {
            Some(kind @ FieldKind::Pad(_)) => {
                self.slot(kind)?;
                Ok(self)
            }
            _ => Err(self.mismatch(FieldKind::Pad(0))),
        }
    }

    /// Confirm every declared field was written, then append the record.
    pub fn finish(&mut self) -> Result<()> {
        let remaining = self.layout.fields.len() - self.index;
        if remaining != 0 {
            return Err(DecodeError::Incomplete {
                layout: self.layout.name,
                remaining,
            });
        }
        debug_assert_eq!(self.offset, self.layout.size(), "encoding wrote incorrect length");
        self.out.append(&mut self.record);
        Ok(())
    }
}
