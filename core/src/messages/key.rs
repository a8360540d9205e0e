//! messages/key.rs
//!
//! `struct pfsync_state_key`:
//!
//! ```text
//! struct pfsync_state_key {
//!     struct pf_addr   addr[2];
//!     u_int16_t        port[2];
//! };
//! ```

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::constants::PF_ADDR_LEN;
use crate::layout::{decode_layout, ByteLayout, Field, FieldKind, FieldWriter};
use crate::messages::WireRecord;
use crate::types::Result;
use crate::utils::{ipv4_from_pf_addr, pf_addr_from_ipv4};

pub const STATE_KEY_LAYOUT: ByteLayout = ByteLayout {
    name: "pfsync_state_key",
    fields: &[
        Field::new("addr[0]", FieldKind::Bytes(PF_ADDR_LEN)),
        Field::new("addr[1]", FieldKind::Bytes(PF_ADDR_LEN)),
        Field::new("port[0]", FieldKind::U16),
        Field::new("port[1]", FieldKind::U16),
    ],
};

/// One side of a tracked connection: two addresses and two ports.
///
/// Index 0 is the destination side, index 1 the source side, as the kernel
/// stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StateKey {
    pub addr: [Ipv4Addr; 2],
    pub port: [u16; 2],
}

impl StateKey {
    pub fn new(addr: [Ipv4Addr; 2], port: [u16; 2]) -> Self {
        Self { addr, port }
    }

    /// `addr:port` for side `i` (0 or 1).
    pub fn endpoint(&self, i: usize) -> String {
        format!("{}:{}", self.addr[i], self.port[i])
    }
}

impl WireRecord for StateKey {
    const LAYOUT: &'static ByteLayout = &STATE_KEY_LAYOUT;

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
        let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;
        let addr0 = f.array::<PF_ADDR_LEN>()?;
        let addr1 = f.array::<PF_ADDR_LEN>()?;
        let port0 = f.u16()?;
        let port1 = f.u16()?;
        f.finish()?;

        let key = StateKey {
            addr: [ipv4_from_pf_addr(&addr0), ipv4_from_pf_addr(&addr1)],
            port: [port0, port1],
        };
        Ok((key, rest))
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        FieldWriter::new(Self::LAYOUT, out)
            .put_bytes(&pf_addr_from_ipv4(self.addr[0]), PF_ADDR_LEN)?
            .put_bytes(&pf_addr_from_ipv4(self.addr[1]), PF_ADDR_LEN)?
            .put_u16(self.port[0])?
            .put_u16(self.port[1])?
            .finish()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.endpoint(1), self.endpoint(0))
    }
}
