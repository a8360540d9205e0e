//! messages/state.rs
//!
//! Full state record carried by INS, UPD and DEL actions.
//!
//! ```text
//! struct pfsync_state_1301 {
//!     u_int64_t        id;
//!     char             ifname[IFNAMSIZ];
//!     struct pfsync_state_key  key[2];
//!     struct pfsync_state_peer src;
//!     struct pfsync_state_peer dst;
//!     struct pf_addr   rt_addr;
//!     u_int32_t        rule;
//!     u_int32_t        anchor;
//!     u_int32_t        nat_rule;
//!     u_int32_t        creation;
//!     u_int32_t        expire;
//!     u_int32_t        packets[2][2];
//!     u_int32_t        bytes[2][2];
//!     u_int32_t        creatorid;
//!     sa_family_t      af;
//!     u_int8_t         proto;
//!     u_int8_t         direction;
//!     u_int8_t         __spare[2];
//!     u_int8_t         log;
//!     u_int8_t         state_flags;
//!     u_int8_t         timeout;
//!     u_int8_t         sync_flags;
//!     u_int8_t         updates;
//! } __packed;
//! ```
//!
//! Summary rendering follows OpenBSD tcpdump's `print-pfsync.c`.

use std::borrow::Cow;
use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::constants::{proto_ids, IFNAMSIZ, PF_ADDR_LEN};
use crate::layout::{decode_layout, ByteLayout, Field, FieldKind, FieldWriter};
use crate::messages::key::{StateKey, STATE_KEY_LAYOUT};
use crate::messages::peer::{StatePeer, STATE_PEER_LAYOUT};
use crate::messages::WireRecord;
use crate::types::Result;
use crate::utils::{fmt_bytes, ifname_from_bytes, ipv4_from_pf_addr, pf_addr_from_ipv4};

pub const STATE_LAYOUT: ByteLayout = ByteLayout {
    name: "pfsync_state_1301",
    fields: &[
        Field::new("id", FieldKind::U64),
        Field::new("ifname", FieldKind::Bytes(IFNAMSIZ)),
        Field::new("key[0]", FieldKind::Nested(&STATE_KEY_LAYOUT)),
        Field::new("key[1]", FieldKind::Nested(&STATE_KEY_LAYOUT)),
        Field::new("src", FieldKind::Nested(&STATE_PEER_LAYOUT)),
        Field::new("dst", FieldKind::Nested(&STATE_PEER_LAYOUT)),
        Field::new("rt_addr", FieldKind::Bytes(PF_ADDR_LEN)),
        Field::new("rule", FieldKind::U32),
        Field::new("anchor", FieldKind::U32),
        Field::new("nat_rule", FieldKind::U32),
        Field::new("creation", FieldKind::U32),
        Field::new("expire", FieldKind::U32),
        Field::new("packets[0][0]", FieldKind::U32),
        Field::new("packets[0][1]", FieldKind::U32),
        Field::new("packets[1][0]", FieldKind::U32),
        Field::new("packets[1][1]", FieldKind::U32),
        Field::new("bytes[0][0]", FieldKind::U32),
        Field::new("bytes[0][1]", FieldKind::U32),
        Field::new("bytes[1][0]", FieldKind::U32),
        Field::new("bytes[1][1]", FieldKind::U32),
        Field::new("creatorid", FieldKind::U32),
        Field::new("af", FieldKind::U8),
        Field::new("proto", FieldKind::U8),
        Field::new("direction", FieldKind::U8),
        Field::new("__spare", FieldKind::Pad(2)),
        Field::new("log", FieldKind::U8),
        Field::new("state_flags", FieldKind::U8),
        Field::new("timeout", FieldKind::U8),
        Field::new("sync_flags", FieldKind::U8),
        Field::new("updates", FieldKind::U8),
    ],
};

/// A tracked connection as exported by the kernel.
///
/// `key[0]` is the wire-side key (pre-NAT, external), `key[1]` the stack-side
/// key (post-NAT, internal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateMessage {
    pub id: u64,
    pub creator: u32,
    /// Interface name, truncated at the first NUL.
    pub interface: Vec<u8>,
    pub key: [StateKey; 2],
    pub src: StatePeer,
    pub dst: StatePeer,
    pub rt_addr: Ipv4Addr,
    pub rule: u32,
    pub anchor: u32,
    pub nat_rule: u32,
    pub creation: u32,
    pub expire: u32,
    pub packets: [[u32; 2]; 2],
    pub bytes: [[u32; 2]; 2],
    pub af: u8,
    pub protocol: u8,
    pub direction: u8,
    pub log: u8,
    pub state_flags: u8,
    pub timeout: u8,
    pub sync_flags: u8,
    pub updates: u8,
}

impl StateMessage {
    /// True when the stack-side source address differs from the wire side.
    pub fn is_nat(&self) -> bool {
        self.key[1].addr[1] != self.key[0].addr[1]
    }

    pub fn protocol_name(&self) -> Cow<'static, str> {
        match self.protocol {
            proto_ids::ICMP => Cow::Borrowed("ICMP"),
            proto_ids::TCP => Cow::Borrowed("TCP"),
            proto_ids::UDP => Cow::Borrowed("UDP"),
            proto_ids::VRRP => Cow::Borrowed("VRRP"),
            other => Cow::Owned(other.to_string()),
        }
    }

    pub fn interface_str(&self) -> String {
        fmt_bytes(&self.interface)
    }
}

impl WireRecord for StateMessage {
    const LAYOUT: &'static ByteLayout = &STATE_LAYOUT;

    fn decode(buf: &[u8]) -> Result<(Self, &[u8])> {
        let (mut f, rest) = decode_layout(Self::LAYOUT, buf)?;

        let id = f.u64()?;
        let interface = ifname_from_bytes(&f.array::<IFNAMSIZ>()?);
        let (wire_key, _) = StateKey::decode(f.nested(&STATE_KEY_LAYOUT)?)?;
        let (stack_key, _) = StateKey::decode(f.nested(&STATE_KEY_LAYOUT)?)?;
        let (src, _) = StatePeer::decode(f.nested(&STATE_PEER_LAYOUT)?)?;
        let (dst, _) = StatePeer::decode(f.nested(&STATE_PEER_LAYOUT)?)?;
        let rt_addr = ipv4_from_pf_addr(&f.array::<PF_ADDR_LEN>()?);
        let rule = f.u32()?;
        let anchor = f.u32()?;
        let nat_rule = f.u32()?;
        let creation = f.u32()?;
        let expire = f.u32()?;
        let packets = [[f.u32()?, f.u32()?], [f.u32()?, f.u32()?]];
        let bytes = [[f.u32()?, f.u32()?], [f.u32()?, f.u32()?]];
        let creator = f.u32()?;
        let af = f.u8()?;
        let protocol = f.u8()?;
        let direction = f.u8()?;
        f.pad()?;
        let log = f.u8()?;
        let state_flags = f.u8()?;
        let timeout = f.u8()?;
        let sync_flags = f.u8()?;
        let updates = f.u8()?;
        f.finish()?;

        let msg = StateMessage {
            id,
            creator,
            interface,
            key: [wire_key, stack_key],
            src,
            dst,
            rt_addr,
            rule,
            anchor,
            nat_rule,
            creation,
            expire,
            packets,
            bytes,
            af,
            protocol,
            direction,
            log,
            state_flags,
            timeout,
            sync_flags,
            updates,
        };
        Ok((msg, rest))
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        let mut w = FieldWriter::new(Self::LAYOUT, out);
        w.put_u64(self.id)?.put_bytes(&self.interface, IFNAMSIZ)?;
        for key in &self.key {
            w.put_nested(&STATE_KEY_LAYOUT, |b| key.encode(b))?;
        }
        w.put_nested(&STATE_PEER_LAYOUT, |b| self.src.encode(b))?
            .put_nested(&STATE_PEER_LAYOUT, |b| self.dst.encode(b))?
            .put_bytes(&pf_addr_from_ipv4(self.rt_addr), PF_ADDR_LEN)?
            .put_u32(self.rule)?
            .put_u32(self.anchor)?
            .put_u32(self.nat_rule)?
            .put_u32(self.creation)?
            .put_u32(self.expire)?;
        for v in self.packets.iter().chain(self.bytes.iter()).flatten() {
            w.put_u32(*v)?;
        }
        w.put_u32(self.creator)?
            .put_u8(self.af)?
            .put_u8(self.protocol)?
            .put_u8(self.direction)?
            .put_pad()?
            .put_u8(self.log)?
            .put_u8(self.state_flags)?
            .put_u8(self.timeout)?
            .put_u8(self.sync_flags)?
            .put_u8(self.updates)?
            .finish()
    }
}

impl fmt::Display for StateMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x} (created by {:#x}) - {} {} ",
            self.id,
            self.creator,
            self.interface_str(),
            self.protocol_name()
        )?;

        let wire = &self.key[0];
        if self.is_nat() {
            write!(
                f,
                "{} ({}) -> {}",
                wire.endpoint(1),
                self.key[1].endpoint(1),
                wire.endpoint(0)
            )
        } else {
            let dir = if self.direction == 0 { "<-" } else { "->" };
            write!(f, "{} {} {}", wire.endpoint(1), dir, wire.endpoint(0))
        }
    }
}
