//! Count-prefixed packing of a data-dependent number of segments.
//!
//! ```text
//! | count (`count` bytes) | len0 (`size` bytes) | seg0 | len1 | seg1 | ...
//! ```
//!
//! Unlike [`crate::prefixer`], unmarshalling trusts the buffer: a malformed
//! count or length panics on the slice index.

use crate::error::{Error, Result};
use crate::prefixer::put_segment;
use crate::uint::{MAX_WIDTH, marshal_uint, max_for_width, unmarshal_uint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlicesPacker {
    /// Width of the segment count header in bytes.
    pub count: usize,
    /// Width of every segment length header in bytes.
    pub size: usize,
}

impl SlicesPacker {
    pub fn new(count: usize, size: usize) -> Result<Self> {
        let packer = SlicesPacker { count, size };
        packer.validate()?;
        Ok(packer)
    }

    /// Both widths must lie in `1..=8`.
    pub fn validate(&self) -> Result<()> {
        for (index, width) in [self.count, self.size].into_iter().enumerate() {
            if width == 0 || width > MAX_WIDTH {
                return Err(Error::InvalidWidth { index, width });
            }
        }
        Ok(())
    }

    pub fn marshal<S: AsRef<[u8]>>(&self, segments: &[S]) -> Result<Vec<u8>> {
        self.validate()?;
        if segments.len() as u64 > max_for_width(self.count) {
            return Err(Error::CountOverflow {
                width: self.count,
                count: segments.len(),
            });
        }

        let mut total = self.count;
        for (index, seg) in segments.iter().enumerate() {
            let len = seg.as_ref().len();
            if len as u64 > max_for_width(self.size) {
                return Err(Error::HeaderOverflow {
                    index,
                    width: self.size,
                    len,
                });
            }
            total += self.size + len;
        }

        let mut buf = vec![0u8; self.count];
        buf.reserve(total - self.count);
        marshal_uint(segments.len() as u64, self.count, &mut buf);
        for seg in segments {
            put_segment(&mut buf, self.size, seg.as_ref());
        }
        Ok(buf)
    }

    /// Split a buffer produced by [`SlicesPacker::marshal`].
    ///
    /// # Panics
    ///
    /// Panics if the stored count or any stored length runs past the end of
    /// `buf`, or if the packer's widths are invalid.
    pub fn unmarshal<'a>(&self, buf: &'a [u8]) -> Vec<&'a [u8]> {
        assert!(
            (1..=MAX_WIDTH).contains(&self.count) && (1..=MAX_WIDTH).contains(&self.size),
            "invalid packer widths {:?}",
            self
        );
        let n = unmarshal_uint(self.count, buf);
        let mut pos = self.count;
        let mut segments = Vec::new();
        for _ in 0..n {
            let len = unmarshal_uint(self.size, &buf[pos..]) as usize;
            pos += self.size;
            segments.push(&buf[pos..pos + len]);
            pos += len;
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let p = SlicesPacker::new(1, 2).unwrap();
        let buf = p.marshal(&[&b"ab"[..], b""]).unwrap();
        assert_eq!(buf, [2, 2, 0, b'a', b'b', 0, 0]);
    }

    #[test]
    fn rejects_bad_widths() {
        let zero = SlicesPacker::new(0, 2).unwrap_err();
        assert_eq!(zero, Error::InvalidWidth { index: 0, width: 0 });
        assert_eq!(zero.to_string(), "header width 0 at index 0 is outside 1..=8");
        assert_eq!(
            SlicesPacker::new(2, 9),
            Err(Error::InvalidWidth { index: 1, width: 9 })
        );
    }

    #[test]
    fn count_overflow() {
        let p = SlicesPacker { count: 1, size: 1 };
        let segs = vec![[0u8; 0]; 256];
        assert_eq!(
            p.marshal(&segs),
            Err(Error::CountOverflow { width: 1, count: 256 })
        );
    }

    #[test]
    #[should_panic]
    fn truncated_buffer_panics() {
        let p = SlicesPacker { count: 2, size: 2 };
        let buf = p.marshal(&[b"abcd"]).unwrap();
        p.unmarshal(&buf[..buf.len() - 1]);
    }
}
