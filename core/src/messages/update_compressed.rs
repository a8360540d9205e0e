//! messages/update_compressed.rs
//!
//! ```text
//! struct pfsync_upd_c {
//!     u_int64_t                   id;
//!     struct pfsync_state_peer    src;
//!     struct pfsync_state_peer    dst;
//!     u_int32_t                   creatorid;
//!     u_int32_t                   expire;
//!     u_int8_t                    timeout;
//!     u_int8_t                    _pad[3];
//! } __packed;
//! ```

use std::fmt;

use serde::Serialize;

use crate::layout::{decode_layout, ByteLayout, Field, FieldKind, FieldWriter};
use crate::messages::peer::{StatePeer, STATE_PEER_LAYOUT};
use crate::messages::WireRecord;
use crate::types::Result;

pub const UPDATE_COMPRESSED_LAYOUT: ByteLayout = ByteLayout {
    name: "pfsync_upd_c",
    fields: &[
        Field::new("id", FieldKind::U64),
        Field::new("src", FieldKind::Nested(&STATE_PEER_LAYOUT)),
        Field::new("dst", FieldKind::Nested(&STATE_PEER_LAYOUT)),
        Field::new("creatorid", FieldKind::U32),
        Field::new("expire", FieldKind::U32),
        Field::new("timeout", FieldKind::U8),
        Field::new("_pad", FieldKind::Pad(3)),
    ],
};

/// Peer/expiry refresh for a state the receiver already knows by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateCompressedMessage {
    pub id: u64,
    pub creator: u32,
    pub expire: u32,
    pub timeout: u8,
    pub src: StatePeer,
    pub dst: StatePeer,
}

impl WireRecord for UpdateCompressedMessage {
    const LAYOUT: &'static ByteLayout = &UPDATE_COMPRESSED_LAYOUT;

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
        let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;
        let id = f.u64()?;
        let (src, _) = StatePeer::decode(f.nested(&STATE_PEER_LAYOUT)?)?;
        let (dst, _) = StatePeer::decode(f.nested(&STATE_PEER_LAYOUT)?)?;
        let creator = f.u32()?;
        let expire = f.u32()?;
        let timeout = f.u8()?;
        f.pad()?;
        f.finish()?;

        Ok((UpdateCompressedMessage { id, creator, expire, timeout, src, dst }, rest))
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        FieldWriter::new(Self::LAYOUT, out)
            .put_u64(self.id)?
            .put_nested(&STATE_PEER_LAYOUT, |b| self.src.encode(b))?
            .put_nested(&STATE_PEER_LAYOUT, |b| self.dst.encode(b))?
            .put_u32(self.creator)?
            .put_u32(self.expire)?
            .put_u8(self.timeout)?
            .put_pad()?
            .finish()
    }
}

impl fmt::Display for UpdateCompressedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compressed update state {:#x} (created by {:#x}) expire {}s",
            self.id, self.creator, self.expire
        )
    }
}
