//! layout/mod.rs
//! Fixed-size binary record codec shared by every pfsync message.
//!
//! Notes:
//! - Network byte order throughout, matching the kernel wire format.
//! - Descriptor width equals bytes consumed; there is no implicit padding.
//! - Decoding is a pure function of (layout, buffer).

pub mod types;
pub mod decode;
pub mod encode;

pub use types::*;
pub use decode::*;
pub use encode::*;
