use std::fmt;
use std::net::Ipv4Addr;

use num_enum::TryFromPrimitive;

use crate::constants::PF_ADDR_LEN;

/// IPv4 address from a 16-byte `pf_addr` union.
///
/// Only the first four bytes are read; IPv6 is not supported and the trailing
/// 12 bytes are ignored.
#[inline]
pub fn ipv4_from_pf_addr(raw: &[u8; PF_ADDR_LEN]) -> Ipv4Addr {
    Ipv4Addr::new(raw[0], raw[1], raw[2], raw[3])
}

/// 16-byte `pf_addr` holding `addr` in its first four bytes, rest zeroed.
#[inline]
pub fn pf_addr_from_ipv4(addr: Ipv4Addr) -> [u8; PF_ADDR_LEN] {
    let mut raw = [0u8; PF_ADDR_LEN];
    raw[..4].copy_from_slice(&addr.octets());
    raw
}

/// Interface name up to (not including) the first NUL.
pub fn ifname_from_bytes(raw: &[u8]) -> Vec<u8> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    raw[..end].to_vec()
}

/// Printable form of a byte string: text when printable, hex otherwise.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        String::from_utf8_lossy(b).into_owned()
    } else {
        format!("0x{}", hex::encode(b))
    }
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}
