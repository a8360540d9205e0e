//! layout/types.rs
//! Byte-layout descriptors for fixed-size kernel records.
//!
//! Design notes:
//! - A descriptor is an ordered list of typed fields; its width is the sum of
//!   the field widths. There is no implicit padding: spare bytes are declared
//!   as `Pad` fields.
//! - Descriptors are `const` items so record sizes are folded at compile time.
//! - All multi-byte integers are network byte order (big-endian).

/// Width and interpretation of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    U64,
    /// Fixed-size byte array (interface names, `pf_addr` unions).
    Bytes(usize),
    /// Spare or alignment bytes; read over, never interpreted.
    Pad(usize),
    /// Embedded record decoded by its own layout.
    Nested(&'static ByteLayout),
}

impl FieldKind {
    #[inline]
    pub const fn width(&self) -> usize {
        match *self {
            FieldKind::U8 => 1,
            FieldKind::U16 => 2,
            FieldKind::U32 => 4,
            FieldKind::U64 => 8,
            FieldKind::Bytes(n) | FieldKind::Pad(n) => n,
            FieldKind::Nested(layout) => layout.size(),
        }
    }
}

/// Named field inside a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Ordered field list describing one C struct.
#[derive(Debug, PartialEq, Eq)]
pub struct ByteLayout {
    /// Kernel struct name, used in error messages.
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl ByteLayout {
    /// Total byte width of the record.
    pub const fn size(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].kind.width();
            i += 1;
        }
        total
    }

    /// Byte offset of field `index` from the start of the record.
    pub const fn offset_of(&self, index: usize) -> usize {
        let mut offset = 0;
        let mut i = 0;
        while i < index && i < self.fields.len() {
            offset += self.fields[i].kind.width();
            i += 1;
        }
        offset
    }

    /// Index of the field called `name`, if declared.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One decoded field, borrowing from the input buffer.
///
/// Values are copied out by the record that owns the layout; nothing
/// returned from a record decode keeps a reference into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bytes(&'a [u8]),
    Pad(&'a [u8]),
    Nested(&'a [u8]),
}
