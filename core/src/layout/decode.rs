//! layout/decode.rs
//!
//! Fixed-layout decoding.
//!
//! Design notes:
//! - `decode_layout` checks the buffer against the descriptor width once, then
//!   hands out a `Fields` cursor over exactly that many bytes plus the rest of
//!   the buffer.
//! - `Fields` walks the descriptor in order. It is an `Iterator` over
//!   `FieldValue`s for generic consumers, and offers typed accessors for
//!   records that know their own layout.
//! - Accessors never panic: a record reading a field with the wrong type gets
//!   `DecodeError::FieldMismatch`.

use byteorder::{BigEndian, ByteOrder};

use crate::layout::types::{ByteLayout, FieldKind, FieldValue};
use crate::types::{DecodeError, Result};

/// Split `buf` into one record of `layout` and the remainder.
///
/// # Returns
/// - `Ok((fields, rest))` where `fields` covers exactly `layout.size()` bytes.
/// - `Err(DecodeError::Truncated)` if `buf` is shorter than the layout; nothing
///   is consumed.
#[inline]
pub fn decode_layout<'a>(
    layout: &'static ByteLayout,
    buf: &'a [u8],
) -> Result<(Fields<'a>, &'a [u8])> {
    let need = layout.size();
    if buf.len() < need {
        return Err(DecodeError::Truncated {
            layout: layout.name,
            need,
            have: buf.len(),
        });
    }
    let (record, rest) = buf.split_at(need);
    Ok((Fields::new(layout, record), rest))
}

/// Decode every field of one record into a flat value list.
pub fn decode_values<'a>(
    layout: &'static ByteLayout,
    buf: &'a [u8],
) -> Result<(Vec<FieldValue<'a>>, &'a [u8])> {
    let (fields, rest) = decode_layout(layout, buf)?;
    Ok((fields.collect(), rest))
}

/// Cursor over one record's bytes, driven by its descriptor.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    layout: &'static ByteLayout,
    record: &'a [u8],
    index: usize,
    offset: usize,
}

impl<'a> Fields<'a> {
    fn new(layout: &'static ByteLayout, record: &'a [u8]) -> Self {
        Self { layout, record, index: 0, offset: 0 }
    }

    pub fn layout(&self) -> &'static ByteLayout {
        self.layout
    }

    /// Fields not yet read.
    pub fn remaining(&self) -> usize {
        self.layout.fields.len() - self.index
    }

    fn mismatch(&self, expected: FieldKind) -> DecodeError {
        DecodeError::FieldMismatch {
            layout: self.layout.name,
            index: self.index,
            expected,
        }
    }

    /// Next field's kind, without consuming it.
    fn peek_kind(&self) -> Option<FieldKind> {
        self.layout.fields.get(self.index).map(|f| f.kind)
    }

    /// Consume the next field if it has kind `want`, returning its bytes.
    fn take(&mut self, want: FieldKind) -> Result<&'a [u8]> {
        match self.peek_kind() {
            Some(kind) if kind == want => {
                let width = kind.width();
                let record = self.record;
                let bytes = &record[self.offset..self.offset + width];
                self.offset += width;
                self.index += 1;
                Ok(bytes)
            }
            _ => Err(self.mismatch(want)),
        }
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(FieldKind::U8)?[0])
    }

    pub fn u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(FieldKind::U16)?))
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take(FieldKind::U32)?))
    }

    pub fn u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.take(FieldKind::U64)?))
    }

    /// Fixed-size byte array field of exactly `N` bytes.
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(FieldKind::Bytes(N))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Raw bytes of the next nested record; the caller decodes them with the
    /// nested layout.
    pub fn nested(&mut self, layout: &'static ByteLayout) -> Result<&'a [u8]> {
        self.take(FieldKind::Nested(layout))
    }

    /// Step over a declared pad field.
    pub fn pad(&mut self) -> Result<()> {
        match self.peek_kind() {
            Some(kind @ FieldKind::Pad(_)) => self.take(kind).map(|_| ()),
            _ => Err(self.mismatch(FieldKind::Pad(0))),
        }
    }

    /// Confirm every declared field was read.
    pub fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => {
                debug_assert_eq!(self.offset, self.layout.size(), "descriptor width drift");
                Ok(())
            }
            remaining => Err(DecodeError::Incomplete {
                layout: self.layout.name,
                remaining,
            }),
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = FieldValue<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.peek_kind()?;
        let width = kind.width();
        let record = self.record;
        let bytes = &record[self.offset..self.offset + width];
        self.offset += width;
        self.index += 1;

        Some(match kind {
            FieldKind::U8 => FieldValue::U8(bytes[0]),
            FieldKind::U16 => FieldValue::U16(BigEndian::read_u16(bytes)),
            FieldKind::U32 => FieldValue::U32(BigEndian::read_u32(bytes)),
            FieldKind::U64 => FieldValue::U64(BigEndian::read_u64(bytes)),
            FieldKind::Bytes(_) => FieldValue::Bytes(bytes),
            FieldKind::Pad(_) => FieldValue::Pad(bytes),
            FieldKind::Nested(_) => FieldValue::Nested(bytes),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Fields<'_> {}
