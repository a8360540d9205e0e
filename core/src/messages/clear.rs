//! messages/clear.rs
//!
//! ```text
//! struct pfsync_clr {
//!     char        ifname[IFNAMSIZ];
//!     u_int32_t   creatorid;
//! } __packed;
//! ```

use std::fmt;

use serde::Serialize;

use crate::constants::IFNAMSIZ;
use crate::layout::{decode_layout, ByteLayout, Field, FieldKind, FieldWriter};
use crate::messages::WireRecord;
use crate::types::Result;
use crate::utils::{fmt_bytes, ifname_from_bytes};

pub const CLEAR_LAYOUT: ByteLayout = ByteLayout {
    name: "pfsync_clr",
    fields: &[
        Field::new("ifname", FieldKind::Bytes(IFNAMSIZ)),
        Field::new("creatorid", FieldKind::U32),
    ],
};

/// Drop every state on an interface (empty name: all interfaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClearMessage {
    /// Raw `ifname` field, all `IFNAMSIZ` bytes including trailing NULs.
    pub interface: Vec<u8>,
    pub creator: u32,
}

impl ClearMessage {
    /// Short names are NUL-padded to `IFNAMSIZ`. Longer names are kept as
    /// given and rejected by `encode`.
    pub fn new(interface: impl Into<Vec<u8>>, creator: u32) -> Self {
        let mut interface = interface.into();
        if interface.len() < IFNAMSIZ {
            interface.resize(IFNAMSIZ, 0);
        }
        Self { interface, creator }
    }

    /// Interface name up to the first NUL.
    pub fn interface_name(&self) -> Vec<u8> {
        ifname_from_bytes(&self.interface)
    }
}

impl WireRecord for ClearMessage {
    const LAYOUT: &'static ByteLayout = &CLEAR_LAYOUT;

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
        let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;
        let interface = f.array::<IFNAMSIZ>()?.to_vec();
        let creator = f.u32()?;
        f.finish()?;
        Ok((ClearMessage { interface, creator }, rest))
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        FieldWriter::new(Self::LAYOUT, out)
            .put_bytes(&self.interface, IFNAMSIZ)?
            .put_u32(self.creator)?
            .finish()
    }
}

impl fmt::Display for ClearMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deleted all states on {} (created by {:#x})",
            fmt_bytes(&self.interface_name()),
            self.creator
        )
    }
}
