//! Serde helper module that stores a `Vec<bool>` as one bit per value.
//!
//! Annotate a field with `#[serde(with = "serial_frame::packed_bools")]`:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Presence {
//!     #[serde(with = "serial_frame::packed_bools")]
//!     online: Vec<bool>,
//! }
//!
//! let p = Presence { online: vec![true, false, true] };
//! let json = serde_json::to_string(&p).unwrap();
//! // 4-byte count + one packed byte
//! assert_eq!(json, r#"{"online":[3,0,0,0,160]}"#);
//! assert_eq!(p, serde_json::from_str(&json).unwrap());
//! ```
//!
//! The field is handed to the serializer as a byte string, so formats with a
//! native bytes type store it without per-element overhead. Decoding is
//! checked: a truncated or over-long byte string is a deserialization error.

use crate::bools::{bools_len, marshal_bools, try_unmarshal_bools};
use std::fmt;

// Upper bound on capacity taken from a format's length hint.
const MAX_PREALLOC: usize = 4096;

pub fn serialize<S>(values: &[bool], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut buf = vec![0u8; bools_len(values.len())];
    marshal_bools(values, &mut buf);
    serializer.serialize_bytes(&buf)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_bytes(PackedBoolsVisitor)
}

struct PackedBoolsVisitor;

impl<'de> serde::de::Visitor<'de> for PackedBoolsVisitor {
    type Value = Vec<bool>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a bit-packed boolean sequence")
    }

    fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Vec<bool>, E> {
        let values = try_unmarshal_bools(v).map_err(E::custom)?;
        if v.len() != bools_len(values.len()) {
            return Err(E::invalid_length(v.len(), &self));
        }
        Ok(values)
    }

    fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Vec<bool>, E> {
        self.visit_bytes(&v)
    }

    // Self-describing formats such as JSON hand bytes back as a sequence.
    fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<bool>, A::Error> {
        let mut buf = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOC));
        while let Some(b) = seq.next_element::<u8>()? {
            buf.push(b);
        }
        self.visit_bytes(&buf)
    }
}
