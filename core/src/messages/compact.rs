//! messages/compact.rs
//!
//! Records that only name a state by `(id, creatorid)`:
//!
//! ```text
//! struct pfsync_del_c    { u_int64_t id; u_int32_t creatorid; } __packed;
//! struct pfsync_ins_ack  { u_int64_t id; u_int32_t creatorid; } __packed;
//! struct pfsync_upd_req  { u_int64_t id; u_int32_t creatorid; } __packed;
//! ```
//!
//! Same shape, different meaning; each keeps its own type so an action can
//! only ever hold the record it was declared with.

use std::fmt;

use serde::Serialize;

use crate::layout::{decode_layout, ByteLayout, Field, FieldKind, FieldWriter};
use crate::messages::WireRecord;
use crate::types::Result;

macro_rules! id_creator_record {
    ($(#[$meta:meta])* $name:ident, $layout:ident, $cname:literal, $verb:literal) => {
        pub const $layout: ByteLayout = ByteLayout {
            name: $cname,
            fields: &[
                Field::new("id", FieldKind::U64),
                Field::new("creatorid", FieldKind::U32),
            ],
        };

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub struct $name {
            pub id: u64,
            pub creator: u32,
        }

        impl $name {
            pub fn new(id: u64, creator: u32) -> Self {
                Self { id, creator }
            }
        }

        impl WireRecord for $name {
            const LAYOUT: &'static ByteLayout = &$layout;

            fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
                let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;
                let msg = Self { id: f.u64()?, creator: f.u32()? };
                f.finish()?;
                Ok((msg, rest))
            }

            fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
                FieldWriter::new(Self::LAYOUT, out)
                    .put_u64(self.id)?
                    .put_u32(self.creator)?
                    .finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($verb, " {:#x} (created by {:#x})"), self.id, self.creator)
            }
        }
    };
}

id_creator_record!(
    /// Compressed delete: the state to drop, by id.
    DeleteCompressedMessage, DELETE_COMPRESSED_LAYOUT, "pfsync_del_c", "Delete state"
);

id_creator_record!(
    /// Acknowledgement of an inserted state.
    InsertAckMessage, INSERT_ACK_LAYOUT, "pfsync_ins_ack", "Ack of inserted state"
);

id_creator_record!(
    /// Request for a full (uncompressed) copy of a state.
    UpdateRequestMessage, UPDATE_REQUEST_LAYOUT, "pfsync_upd_req", "Update request for state"
);
