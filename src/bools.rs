//! Bit-packed boolean sequences.
//!
//! ```text
//! +--------+--------+--------+--------+--------+...+--------+
//! |   count (u32, LSB first)          | bits, MSB first     |
//! +--------+--------+--------+--------+--------+...+--------+
//! ```
//!
//! Unused low bits of the final byte are zero.

use crate::error::{Error, Result};
use crate::uint::{marshal_uint32, unmarshal_uint32};

const COUNT_LEN: usize = 4;

/// Bytes needed to marshal `n` booleans.
#[inline]
pub fn bools_len(n: usize) -> usize {
    COUNT_LEN + n.div_ceil(8)
}

/// Pack `values` into `dst`: a 4-byte count followed by one bit per value.
///
/// `values.len()` must fit in a `u32`.
///
/// # Panics
///
/// Panics if `dst.len() < bools_len(values.len())`.
pub fn marshal_bools(values: &[bool], dst: &mut [u8]) {
    debug_assert!(
        values.len() <= u32::MAX as usize,
        "{} booleans overflow the count header",
        values.len()
    );
    marshal_uint32(values.len() as u32, dst);
    let packed = &mut dst[COUNT_LEN..bools_len(values.len())];
    for (out, chunk) in packed.iter_mut().zip(values.chunks(8)) {
        let mut byte = 0u8;
        for (bit, &v) in chunk.iter().enumerate() {
            if v {
                byte |= 0x80 >> bit;
            }
        }
        *out = byte;
    }
}

/// Unpack a boolean sequence written by [`marshal_bools`].
///
/// # Panics
///
/// Panics if `src` is shorter than the count header claims.
pub fn unmarshal_bools(src: &[u8]) -> Vec<bool> {
    let n = unmarshal_uint32(src) as usize;
    let packed = &src[COUNT_LEN..bools_len(n)];
    unpack(n, packed)
}

/// Checked form of [`unmarshal_bools`] for untrusted input.
pub fn try_unmarshal_bools(src: &[u8]) -> Result<Vec<bool>> {
    if src.len() < COUNT_LEN {
        return Err(Error::BadFormat {
            needed: COUNT_LEN as u64,
            remaining: src.len(),
        });
    }
    let n = unmarshal_uint32(src) as usize;
    let needed = bools_len(n);
    if src.len() < needed {
        return Err(Error::BadFormat {
            needed: needed as u64,
            remaining: src.len(),
        });
    }
    Ok(unpack(n, &src[COUNT_LEN..needed]))
}

fn unpack(n: usize, packed: &[u8]) -> Vec<bool> {
    (0..n)
        .map(|i| packed[i / 8] & (0x80 >> (i % 8)) != 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first_with_zero_fill() {
        let mut buf = [0xFFu8; 6];
        marshal_bools(&[true, false, true, true, false, false, false, false, true], &mut buf);
        assert_eq!(buf, [9, 0, 0, 0, 0b1011_0000, 0b1000_0000]);
    }

    #[test]
    fn empty_sequence_is_header_only() {
        let mut buf = [0xFFu8; 4];
        marshal_bools(&[], &mut buf);
        assert_eq!(buf, [0, 0, 0, 0]);
        assert!(unmarshal_bools(&buf).is_empty());
    }

    #[test]
    fn checked_unmarshal_rejects_truncation() {
        let mut buf = [0u8; 6];
        marshal_bools(&[true; 9], &mut buf);
        assert_eq!(
            try_unmarshal_bools(&buf[..5]),
            Err(Error::BadFormat { needed: 6, remaining: 5 })
        );
        assert_eq!(
            try_unmarshal_bools(&buf[..3]),
            Err(Error::BadFormat { needed: 4, remaining: 3 })
        );
        assert_eq!(try_unmarshal_bools(&buf).unwrap(), vec![true; 9]);
    }

    #[test]
    #[should_panic]
    fn short_destination_panics() {
        let mut buf = [0u8; 4];
        marshal_bools(&[true], &mut buf);
    }
}
