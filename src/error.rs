use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the policy-driven framing engine.
///
/// The integer and boolean primitives never produce these; they panic on
/// undersized buffers instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The policy and the segment set have different lengths (encode only)
    #[error("policy has {policy} directives but {segments} segments were given")]
    LengthMismatch { policy: usize, segments: usize },

    /// A directive's magnitude exceeds the 8-byte header limit
    #[error("directive {directive} at index {index} exceeds the 8 byte limit")]
    LengthTooLong { index: usize, directive: i32 },

    /// A zero directive appears anywhere but the last position
    #[error("zero directive at index {index} is not the last directive")]
    IncorrectZero { index: usize },

    /// The buffer ended before a declared or computed length was satisfied
    #[error("bad format: needed {needed} bytes but only {remaining} remain")]
    BadFormat { needed: u64, remaining: usize },

    /// A segment under a negative directive does not have the implied length
    #[error("segment {index} has {actual} bytes but its directive fixes {expected}")]
    FixedLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A segment length does not fit in its header width
    #[error("segment {index} length {len} does not fit in a {width} byte header")]
    HeaderOverflow {
        index: usize,
        width: usize,
        len: usize,
    },

    /// A packer header width is outside `1..=8`
    #[error("header width {width} at index {index} is outside 1..=8")]
    InvalidWidth { index: usize, width: usize },

    /// Too many segments for the packer's count header
    #[error("{count} segments do not fit in a {width} byte count header")]
    CountOverflow { width: usize, count: usize },
}
