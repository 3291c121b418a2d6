//! Image assembly.
//!
//! Walks the segment table in order and builds the flat output image:
//! 1. Segments with file data take their bytes from a shared cursor into the
//!    initialized-data region.
//! 2. BSS segments contribute zero-fill of their declared length.
//! 3. Stack and unrecognized segments contribute nothing.
//!
//! A segment whose declared length runs past the end of the file is padded
//! with zeros and reported as a [`Truncation`]. The image is therefore always
//! exactly as long as the segment table says.

use core::fmt;

use crate::segment::{SegmentDescriptor, SegmentKind};

/// A non-fatal report: an initialized segment had fewer bytes in the file than
/// its descriptor declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// Segment number from the descriptor.
    pub segment: u8,
    /// Declared length.
    pub expected: u16,
    /// Bytes actually available in the file.
    pub actual: usize,
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} truncated (expected {}, got {})",
            self.segment, self.expected, self.actual
        )
    }
}

/// The assembled flat image plus any truncation reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputImage {
    pub data: Vec<u8>,
    pub warnings: Vec<Truncation>,
}

impl OutputImage {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Builds the output image from `segments`, reading file-resident data from
/// `data` starting at `init_start`.
pub fn assemble(data: &[u8], segments: &[SegmentDescriptor], init_start: usize) -> OutputImage {
    let capacity = segments.iter().map(|s| s.kind.output_len(s.len)).sum();
    let mut image = OutputImage {
        data: Vec::with_capacity(capacity),
        warnings: Vec::new(),
    };
    let mut cursor = init_start.min(data.len());

    for segment in segments {
        let len = segment.len as usize;
        match segment.kind {
            kind if kind.has_file_data() => {
                let available = data.len() - cursor;
                if available < len {
                    let truncation = Truncation {
                        segment: segment.number,
                        expected: segment.len,
                        actual: available,
                    };
                    tracing::debug!("{}", truncation);
                    image.warnings.push(truncation);

                    image.data.extend_from_slice(&data[cursor..]);
                    image.data.resize(image.data.len() + (len - available), 0);
                    cursor = data.len();
                } else {
                    image.data.extend_from_slice(&data[cursor..cursor + len]);
                    cursor += len;
                }
                tracing::trace!("segment {}: cursor now {:#x}", segment.number, cursor);
            }
            SegmentKind::Bss => {
                image.data.resize(image.data.len() + len, 0);
            }
            kind => {
                tracing::debug!(
                    "Skipping segment {} (kind: {}, len: {})",
                    segment.number,
                    kind,
                    segment.len
                );
            }
        }
    }

    image
}
