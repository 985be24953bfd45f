//! # serial-frame
//!
//! Compact binary packing primitives for message code that wants a
//! predictable byte layout without a general-purpose serialization framework.
//!
//! ## Overview
//!
//! All integers are written least significant byte first. Nothing here is
//! self-describing: both sides agree on the layout out of band.
//!
//! | Module | What it does | Malformed input |
//! |--------|--------------|-----------------|
//! | [`uint`] | 1–8 byte unsigned integers | panics |
//! | [`bools`] | 4-byte count + 1 bit per bool, MSB first | panics |
//! | [`prefixer`] | policy-driven segment framing | [`Error`] |
//! | [`packer`] | count-prefixed uniform segment framing | panics |
//! | [`packed_bools`] | serde adapter for bit-packed `Vec<bool>` fields | serde error |
//!
//! The primitives trust their caller. The prefixer validates everything,
//! since its input usually comes straight off the wire.
//!
//! ## Example
//!
//! ```rust
//! use serial_frame::{Error, marshal_byte_slices, unmarshal_byte_slices};
//!
//! // 2-byte length header, fixed 4 bytes, then the rest of the buffer.
//! let policy = [2, -4, 0];
//! let segments: [&[u8]; 3] = [b"id", b"\x00\x00\x00\x2a", b"payload bytes"];
//!
//! let buf = marshal_byte_slices(&policy, &segments).unwrap();
//! assert_eq!(buf.len(), 2 + 2 + 4 + 13);
//!
//! let decoded = unmarshal_byte_slices(&policy, &buf).unwrap();
//! assert_eq!(decoded, segments);
//!
//! // Truncation is reported, not panicked on.
//! let err = unmarshal_byte_slices(&[2, 2], &buf[..3]).unwrap_err();
//! assert!(matches!(err, Error::BadFormat { .. }));
//! ```

pub mod bools;
pub mod error;
pub mod packed_bools;
pub mod packer;
pub mod prefixer;
pub mod uint;

pub use bools::{bools_len, marshal_bools, try_unmarshal_bools, unmarshal_bools};
pub use error::{Error, Result};
pub use packer::SlicesPacker;
pub use prefixer::{
    Prefixer, marshal_byte_slices, unmarshal_byte_slices, unmarshal_byte_slices_owned,
};
pub use uint::{
    marshal_uint, marshal_uint16, marshal_uint32, uint_bytes, unmarshal_uint, unmarshal_uint16,
    unmarshal_uint32,
};
