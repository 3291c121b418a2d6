//! Fatal decode errors.
//!
//! Each of these stops the pipeline before any image bytes are produced.
//! Truncated segment data is not an error; see [`crate::image::Truncation`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XoutError {
    #[error("file too small for x.out header ({len} bytes)")]
    TruncatedHeader { len: usize },

    #[error("bad magic {0:#06X}")]
    BadMagic(u16),

    #[error("invalid segment count {0}")]
    InvalidSegmentCount(i16),

    #[error("truncated segment table at segment {0}")]
    TruncatedSegmentTable(usize),
}

pub type Result<T> = std::result::Result<T, XoutError>;
