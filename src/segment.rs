//! Segment table decoding.
//!
//! The segment table is a run of fixed 4-byte descriptors immediately after the
//! header. Its order matters: it is both the order in which initialized data
//! is stored in the file and the order in which the output image is built.

use core::fmt;

use object::endian::BigEndian;
use object::pod;

use crate::error::{Result, XoutError};
use crate::xout::{self, RawSegment, SEGMENT_SIZE};

/// The kind of a segment, decoded from its type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Uninitialized data. No bytes in the file, zero-filled in the image.
    Bss,
    /// Stack. No bytes in the file, nothing in the image.
    Stack,
    Code,
    Const,
    Data,
    MixedUnprotectable,
    MixedProtectable,
    /// A type code the format does not define. Treated like `Stack`.
    Unrecognized(u8),
}

impl SegmentKind {
    pub fn from_type(typ: u8) -> Self {
        match typ {
            xout::X_SG_BSS => SegmentKind::Bss,
            xout::X_SG_STK => SegmentKind::Stack,
            xout::X_SG_COD => SegmentKind::Code,
            xout::X_SG_CON => SegmentKind::Const,
            xout::X_SG_DAT => SegmentKind::Data,
            xout::X_SG_MXU => SegmentKind::MixedUnprotectable,
            xout::X_SG_MXP => SegmentKind::MixedProtectable,
            other => SegmentKind::Unrecognized(other),
        }
    }

    pub fn type_code(self) -> u8 {
        match self {
            SegmentKind::Bss => xout::X_SG_BSS,
            SegmentKind::Stack => xout::X_SG_STK,
            SegmentKind::Code => xout::X_SG_COD,
            SegmentKind::Const => xout::X_SG_CON,
            SegmentKind::Data => xout::X_SG_DAT,
            SegmentKind::MixedUnprotectable => xout::X_SG_MXU,
            SegmentKind::MixedProtectable => xout::X_SG_MXP,
            SegmentKind::Unrecognized(typ) => typ,
        }
    }

    /// Whether the segment's bytes are stored in the initialized-data region.
    pub fn has_file_data(self) -> bool {
        matches!(
            self,
            SegmentKind::Code
                | SegmentKind::Const
                | SegmentKind::Data
                | SegmentKind::MixedUnprotectable
                | SegmentKind::MixedProtectable
        )
    }

    /// Number of bytes a segment of this kind with `declared` length adds to
    /// the output image.
    pub fn output_len(self, declared: u16) -> usize {
        match self {
            SegmentKind::Stack | SegmentKind::Unrecognized(_) => 0,
            _ => declared as usize,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Bss => write!(f, "bss"),
            SegmentKind::Stack => write!(f, "stack"),
            SegmentKind::Code => write!(f, "code"),
            SegmentKind::Const => write!(f, "constant pool"),
            SegmentKind::Data => write!(f, "initialized data"),
            SegmentKind::MixedUnprotectable => write!(f, "mixed code/data, not protectable"),
            SegmentKind::MixedProtectable => write!(f, "mixed code/data, protectable"),
            SegmentKind::Unrecognized(typ) => write!(f, "unknown ({typ})"),
        }
    }
}

/// One decoded entry of the segment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDescriptor {
    /// Assigned segment number. Not necessarily unique or ordered.
    pub number: u8,
    pub kind: SegmentKind,
    /// Declared length in bytes.
    pub len: u16,
    /// Offset of this descriptor in the file.
    pub file_offset: usize,
}

/// Decodes `count` descriptors starting at `offset`.
///
/// Returns the descriptors in file order and the offset just past the last
/// one, which is where the initialized-data region starts.
pub fn parse_segment_table(
    data: &[u8],
    count: usize,
    offset: usize,
) -> Result<(Vec<SegmentDescriptor>, usize)> {
    let mut segments = Vec::with_capacity(count);
    let mut offset = offset;

    for index in 0..count {
        let rest = data.get(offset..).unwrap_or(&[]);
        let (raw, _) = pod::from_bytes::<RawSegment>(rest)
            .map_err(|()| XoutError::TruncatedSegmentTable(index))?;

        let segment = SegmentDescriptor {
            number: raw.x_sg_no,
            kind: SegmentKind::from_type(raw.x_sg_typ),
            len: raw.x_sg_len.get(BigEndian),
            file_offset: offset,
        };
        tracing::debug!(
            "{:4x} sg[{}]: sgno={} typ={} len={} ({})",
            offset,
            index,
            segment.number,
            segment.kind.type_code(),
            segment.len,
            segment.kind
        );
        segments.push(segment);
        offset += SEGMENT_SIZE;
    }

    Ok((segments, offset))
}
