//! messages/peer.rs
//!
//! Per-endpoint TCP tracking block embedded in state and compressed-update
//! messages. The core carries these values through untouched.
//!
//! ```text
//! struct pfsync_state_scrub {
//!     u_int16_t   pfss_flags;
//!     u_int8_t    pfss_ttl;
//!     u_int8_t    scrub_flag;
//!     u_int32_t   pfss_ts_mod;
//! } __packed;
//!
//! struct pfsync_state_peer {
//!     struct pfsync_state_scrub scrub;
//!     u_int32_t   seqlo;
//!     u_int32_t   seqhi;
//!     u_int32_t   seqdiff;
//!     u_int16_t   max_win;
//!     u_int16_t   mss;
//!     u_int8_t    state;
//!     u_int8_t    wscale;
//!     u_int8_t    pad[6];
//! } __packed;
//! ```

use serde::Serialize;

use crate::layout::{decode_layout, ByteLayout, Field, FieldKind, FieldWriter};
use crate::messages::WireRecord;
use crate::types::Result;

pub const STATE_SCRUB_LAYOUT: ByteLayout = ByteLayout {
    name: "pfsync_state_scrub",
    fields: &[
        Field::new("pfss_flags", FieldKind::U16),
        Field::new("pfss_ttl", FieldKind::U8),
        Field::new("scrub_flag", FieldKind::U8),
        Field::new("pfss_ts_mod", FieldKind::U32),
    ],
};

pub const STATE_PEER_LAYOUT: ByteLayout = ByteLayout {
    name: "pfsync_state_peer",
    fields: &[
        Field::new("scrub", FieldKind::Nested(&STATE_SCRUB_LAYOUT)),
        Field::new("seqlo", FieldKind::U32),
        Field::new("seqhi", FieldKind::U32),
        Field::new("seqdiff", FieldKind::U32),
        Field::new("max_win", FieldKind::U16),
        Field::new("mss", FieldKind::U16),
        Field::new("state", FieldKind::U8),
        Field::new("wscale", FieldKind::U8),
        Field::new("pad", FieldKind::Pad(6)),
    ],
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateScrub {
    pub flags: u16,
    pub ttl: u8,
    pub scrub_flag: u8,
    pub ts_mod: u32,
}

impl WireRecord for StateScrub {
    const LAYOUT: &'static ByteLayout = &STATE_SCRUB_LAYOUT;

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
        let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;
        let scrub = StateScrub {
            flags: f.u16()?,
            ttl: f.u8()?,
            scrub_flag: f.u8()?,
            ts_mod: f.u32()?,
        };
        f.finish()?;
        Ok((scrub, rest))
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        FieldWriter::new(Self::LAYOUT, out)
            .put_u16(self.flags)?
            .put_u8(self.ttl)?
            .put_u8(self.scrub_flag)?
            .put_u32(self.ts_mod)?
            .finish()
    }
}

/// Sequence tracking and scrub state for one endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatePeer {
    pub scrub: StateScrub,
    pub seqlo: u32,
    pub seqhi: u32,
    pub seqdiff: u32,
    pub max_win: u16,
    pub mss: u16,
    pub state: u8,
    pub wscale: u8,
}

impl WireRecord for StatePeer {
    const LAYOUT: &'static ByteLayout = &STATE_PEER_LAYOUT;

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
        let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;
        let (scrub, _) = StateScrub::decode(f.nested(&STATE_SCRUB_LAYOUT)?)?;
        let peer = StatePeer {
            scrub,
            seqlo: f.u32()?,
            seqhi: f.u32()?,
            seqdiff: f.u32()?,
            max_win: f.u16()?,
            mss: f.u16()?,
            state: f.u8()?,
            wscale: f.u8()?,
        };
        f.pad()?;
        f.finish()?;
        Ok((peer, rest))
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        FieldWriter::new(Self::LAYOUT, out)
            .put_nested(&STATE_SCRUB_LAYOUT, |b| self.scrub.encode(b))?
            .put_u32(self.seqlo)?
            .put_u32(self.seqhi)?
            .put_u32(self.seqdiff)?
            .put_u16(self.max_win)?
            .put_u16(self.mss)?
            .put_u8(self.state)?
            .put_u8(self.wscale)?
            .put_pad()?
            .finish()
    }
}
