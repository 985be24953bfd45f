//! Policy-driven length-prefixed framing of byte segments.
//!
//! A policy holds one directive per segment:
//!
//! | Directive | Meaning |
//! |-----------|---------|
//! | `1..=8`   | segment length is written as an N-byte header before the bytes |
//! | `-1..=-8` | segment has a fixed length of M bytes, no header |
//! | `0`       | last directive only: the segment is the rest of the buffer |
//!
//! Decoding never copies: every returned segment is a sub-slice of the input
//! buffer. Use [`unmarshal_byte_slices_owned`] when the segments must outlive it.

use crate::error::{Error, Result};
use crate::uint::{MAX_WIDTH, marshal_uint, max_for_width, unmarshal_uint};
use serde::{Deserialize, Serialize};

/// How a single segment's length travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Header(usize),
    Fixed(usize),
    Rest,
}

fn step(directive: i32) -> Step {
    match directive {
        0 => Step::Rest,
        d if d > 0 => Step::Header(d as usize),
        d => Step::Fixed(d.unsigned_abs() as usize),
    }
}

/// Check every directive's magnitude and the zero-only-last rule.
pub fn validate(policy: &[i32]) -> Result<()> {
    let last = policy.len().saturating_sub(1);
    for (index, &directive) in policy.iter().enumerate() {
        if directive.unsigned_abs() as usize > MAX_WIDTH {
            return Err(Error::LengthTooLong { index, directive });
        }
        if directive == 0 && index != last {
            return Err(Error::IncorrectZero { index });
        }
    }
    Ok(())
}

/// Number of bytes [`marshal_byte_slices`] will produce for `segments`.
///
/// Performs the same validation as marshalling.
pub fn encoded_len<S: AsRef<[u8]>>(policy: &[i32], segments: &[S]) -> Result<usize> {
    if policy.len() != segments.len() {
        return Err(Error::LengthMismatch {
            policy: policy.len(),
            segments: segments.len(),
        });
    }
    validate(policy)?;

    let mut total = 0usize;
    for (index, (&directive, seg)) in policy.iter().zip(segments).enumerate() {
        let len = seg.as_ref().len();
        match step(directive) {
            Step::Header(width) => {
                if len as u64 > max_for_width(width) {
                    return Err(Error::HeaderOverflow { index, width, len });
                }
                total += width;
            }
            Step::Fixed(expected) if expected != len => {
                return Err(Error::FixedLengthMismatch {
                    index,
                    expected,
                    actual: len,
                });
            }
            Step::Fixed(_) | Step::Rest => {}
        }
        total += len;
    }
    Ok(total)
}

/// Frame `segments` into one buffer according to `policy`.
pub fn marshal_byte_slices<S: AsRef<[u8]>>(policy: &[i32], segments: &[S]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_len(policy, segments)?);
    for (&directive, seg) in policy.iter().zip(segments) {
        match step(directive) {
            Step::Header(width) => put_segment(&mut buf, width, seg.as_ref()),
            Step::Fixed(_) | Step::Rest => buf.extend_from_slice(seg.as_ref()),
        }
    }
    Ok(buf)
}

/// Append a `width`-byte length header followed by `seg`.
///
/// The caller has already checked that the length fits in `width` bytes.
pub(crate) fn put_segment(buf: &mut Vec<u8>, width: usize, seg: &[u8]) {
    let start = buf.len();
    buf.resize(start + width, 0);
    marshal_uint(seg.len() as u64, width, &mut buf[start..]);
    buf.extend_from_slice(seg);
}

/// Split `buf` back into the segments described by `policy`.
///
/// The returned slices borrow from `buf`. Bytes left over after the last
/// non-zero directive are ignored.
pub fn unmarshal_byte_slices<'a>(policy: &[i32], buf: &'a [u8]) -> Result<Vec<&'a [u8]>> {
    validate(policy)?;

    let mut cursor = Cursor::new(buf);
    let mut segments = Vec::with_capacity(policy.len());
    for &directive in policy {
        let len = match step(directive) {
            Step::Header(width) => {
                let header = cursor.take(width as u64)?;
                unmarshal_uint(width, header)
            }
            Step::Fixed(len) => len as u64,
            Step::Rest => {
                let seg = cursor.rest();
                log::trace!("segment {} spans {} bytes", segments.len(), seg.len());
                segments.push(seg);
                break;
            }
        };
        let seg = cursor.take(len)?;
        log::trace!("segment {} spans {} bytes", segments.len(), seg.len());
        segments.push(seg);
    }
    Ok(segments)
}

/// Like [`unmarshal_byte_slices`] but copies every segment.
pub fn unmarshal_byte_slices_owned(policy: &[i32], buf: &[u8]) -> Result<Vec<Vec<u8>>> {
    Ok(unmarshal_byte_slices(policy, buf)?
        .into_iter()
        .map(<[u8]>::to_vec)
        .collect())
}

/// Read position over a borrowed buffer.
struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Cursor { input, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Consume exactly `n` bytes. Fails with BadFormat.
    fn take(&mut self, n: u64) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining as u64 {
            log::debug!(
                "rejecting buffer: need {n} bytes at offset {}, have {remaining}",
                self.pos
            );
            return Err(Error::BadFormat {
                needed: n,
                remaining,
            });
        }
        let n = n as usize;
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn rest(&mut self) -> &'a [u8] {
        let slice = &self.input[self.pos..];
        self.pos = self.input.len();
        slice
    }
}

// ── Prefixer ───────────────────────────────────────────────────────────────

/// A policy bound for reuse.
///
/// Serializes as the bare directive list, so a policy can live in a config
/// file:
///
/// ```rust
/// use serial_frame::Prefixer;
///
/// let p: Prefixer = serde_json::from_str("[2, -4, 0]").unwrap();
/// let buf = p.marshal(&[&b"ab"[..], b"wxyz", b"tail"]).unwrap();
/// assert_eq!(buf, b"\x02\x00abwxyztail");
/// assert_eq!(p.unmarshal(&buf).unwrap(), [&b"ab"[..], b"wxyz", b"tail"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefixer(Vec<i32>);

impl Prefixer {
    pub fn new(directives: impl Into<Vec<i32>>) -> Self {
        Prefixer(directives.into())
    }

    pub fn directives(&self) -> &[i32] {
        &self.0
    }

    pub fn validate(&self) -> Result<()> {
        validate(&self.0)
    }

    pub fn encoded_len<S: AsRef<[u8]>>(&self, segments: &[S]) -> Result<usize> {
        encoded_len(&self.0, segments)
    }

    pub fn marshal<S: AsRef<[u8]>>(&self, segments: &[S]) -> Result<Vec<u8>> {
        marshal_byte_slices(&self.0, segments)
    }

    pub fn unmarshal<'a>(&self, buf: &'a [u8]) -> Result<Vec<&'a [u8]>> {
        unmarshal_byte_slices(&self.0, buf)
    }

    pub fn unmarshal_owned(&self, buf: &[u8]) -> Result<Vec<Vec<u8>>> {
        unmarshal_byte_slices_owned(&self.0, buf)
    }
}

impl From<Vec<i32>> for Prefixer {
    fn from(directives: Vec<i32>) -> Self {
        Prefixer(directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_classification() {
        assert_eq!(step(3), Step::Header(3));
        assert_eq!(step(-5), Step::Fixed(5));
        assert_eq!(step(0), Step::Rest);
    }

    #[test]
    fn validate_reports_first_offender() {
        assert_eq!(validate(&[0, 9]), Err(Error::IncorrectZero { index: 0 }));
        assert_eq!(
            validate(&[2, i32::MIN]),
            Err(Error::LengthTooLong { index: 1, directive: i32::MIN })
        );
        assert_eq!(validate(&[]), Ok(()));
        assert_eq!(validate(&[0]), Ok(()));
    }

    #[test]
    fn cursor_take_and_rest() {
        let data = [1u8, 2, 3, 4, 5];
        let mut c = Cursor::new(&data);
        assert_eq!(c.take(2).unwrap(), &[1u8, 2]);
        assert_eq!(c.take(4), Err(Error::BadFormat { needed: 4, remaining: 3 }));
        assert_eq!(c.rest(), &[3u8, 4, 5]);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.take(0).unwrap(), &[] as &[u8]);
    }
}
