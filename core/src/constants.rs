//! constants.rs
//! Wire constants mirrored from the kernel headers (`sys/net/if_pfsync.h`,
//! `sys/net/pfvar.h`).
//!
//! Design notes:
//! - Values are compile-time items; the decoder has no runtime configuration.
//! - Grouped id modules keep the numeric registry in one place so the action
//!   table and `ActionKind` cannot drift apart silently.

/// Interface name width (`IFNAMSIZ`).
pub const IFNAMSIZ: usize = 16;

/// Width of a `struct pf_addr` union (IPv4 lives in the first 4 bytes).
pub const PF_ADDR_LEN: usize = 16;

/// Number of action ids the kernel defines (`PFSYNC_ACT_MAX`).
pub const PFSYNC_ACT_MAX: usize = 15;

/// Number of slots in the action dispatch table.
pub const ACTION_SLOTS: usize = PFSYNC_ACT_MAX;

/// Action identifiers (`PFSYNC_ACT_*`).
pub mod action_ids {
    pub const CLR: u8 = 0;
    pub const INS_1301: u8 = 1;
    pub const INS_ACK: u8 = 2;
    pub const UPD_1301: u8 = 3;
    pub const UPD_C: u8 = 4;
    pub const UPD_REQ: u8 = 5;
    pub const DEL: u8 = 6;
    pub const DEL_C: u8 = 7;
    pub const INS_F: u8 = 8;
    pub const DEL_F: u8 = 9;
    pub const BUS: u8 = 10;
    pub const TDB: u8 = 11;
    pub const EOF: u8 = 12;
    pub const INS_1400: u8 = 13;
    pub const UPD_1400: u8 = 14;
}

/// IP protocol numbers with a printable name in state summaries.
pub mod proto_ids {
    pub const ICMP: u8 = 1;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    pub const VRRP: u8 = 112;
}
