//! Fixed-width unsigned integer codec.
//!
//! Values are written least significant byte first into the first `width`
//! bytes of the destination. None of these functions check the slice length:
//! an undersized buffer panics on the slice index, which is the intended
//! contract for this hot-path primitive.

/// Largest supported integer width in bytes.
pub const MAX_WIDTH: usize = 8;

/// Write the low `width` bytes of `value` into `dst[..width]`.
///
/// High-order slots that `value` does not need are zero-filled.
///
/// # Panics
///
/// Panics if `dst.len() < width`.
#[inline]
pub fn marshal_uint(value: u64, width: usize, dst: &mut [u8]) {
    debug_assert!(width <= MAX_WIDTH, "integer width {width} > {MAX_WIDTH}");
    let mut v = value;
    for slot in &mut dst[..width] {
        *slot = v as u8;
        v >>= 8;
    }
}

/// Read `src[..width]` as a little-endian unsigned integer.
///
/// # Panics
///
/// Panics if `src.len() < width`.
#[inline]
pub fn unmarshal_uint(width: usize, src: &[u8]) -> u64 {
    debug_assert!(width <= MAX_WIDTH, "integer width {width} > {MAX_WIDTH}");
    src[..width]
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Allocate a `width`-byte buffer holding `value`.
pub fn uint_bytes(value: u64, width: usize) -> Vec<u8> {
    let mut buf = vec![0u8; width];
    marshal_uint(value, width, &mut buf);
    buf
}

/// Write `v` into `dst[..2]`.
#[inline]
pub fn marshal_uint16(v: u16, dst: &mut [u8]) {
    marshal_uint(u64::from(v), 2, dst)
}

/// Read a `u16` from `src[..2]`.
#[inline]
pub fn unmarshal_uint16(src: &[u8]) -> u16 {
    unmarshal_uint(2, src) as u16
}

/// Write `v` into `dst[..4]`.
#[inline]
pub fn marshal_uint32(v: u32, dst: &mut [u8]) {
    marshal_uint(u64::from(v), 4, dst)
}

/// Read a `u32` from `src[..4]`.
#[inline]
pub fn unmarshal_uint32(src: &[u8]) -> u32 {
    unmarshal_uint(4, src) as u32
}

/// Largest value representable in `width` bytes.
#[inline]
pub(crate) fn max_for_width(width: usize) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << (width * 8)) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_is_lsb_first() {
        let mut buf = [0xFFu8; 4];
        marshal_uint32(0x0102_0304, &mut buf);
        assert_eq!(buf, [4, 3, 2, 1]);
    }

    #[test]
    fn small_value_zero_fills() {
        let mut buf = [0xAAu8; 8];
        marshal_uint(7, 8, &mut buf);
        assert_eq!(buf, [7, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn max_for_width_bounds() {
        assert_eq!(max_for_width(1), 0xFF);
        assert_eq!(max_for_width(2), 0xFFFF);
        assert_eq!(max_for_width(8), u64::MAX);
    }

    #[test]
    #[should_panic]
    fn short_buffer_panics() {
        let mut buf = [0u8; 1];
        marshal_uint16(1, &mut buf);
    }
}
