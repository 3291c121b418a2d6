//! Conversion pipeline.
//!
//! `XoutFile` runs the decode steps in order over a borrowed input buffer:
//! 1. Header: validates the magic and segment count.
//! 2. Segment table: decodes every descriptor.
//! 3. Assembly: builds the flat image (see [`crate::image`]).
//!
//! Steps 1 and 2 are the only places a conversion can fail, so no image bytes
//! exist until the whole file has been validated.

use crate::error::Result;
use crate::header::{parse_header, FileHeader};
use crate::image::{self, OutputImage};
use crate::segment::{parse_segment_table, SegmentDescriptor};

/// A decoded x.out file borrowing its input bytes.
#[derive(Debug, Clone)]
pub struct XoutFile<'a> {
    data: &'a [u8],
    header: FileHeader,
    segments: Vec<SegmentDescriptor>,
    init_start: usize,
}

impl<'a> XoutFile<'a> {
    /// Decodes the header and segment table of `data`.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let (header, table_start) = parse_header(data)?;
        let (segments, init_start) =
            parse_segment_table(data, header.segment_count(), table_start)?;
        Ok(Self {
            data,
            header,
            segments,
            init_start,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn segments(&self) -> &[SegmentDescriptor] {
        &self.segments
    }

    /// Offset of the initialized-data region.
    pub fn init_start(&self) -> usize {
        self.init_start
    }

    /// Length the assembled image will have.
    pub fn declared_image_len(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.kind.output_len(s.len))
            .sum()
    }

    /// Total bytes the segment table claims from the initialized-data region.
    pub fn declared_file_data_len(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.kind.has_file_data())
            .map(|s| s.len as usize)
            .sum()
    }

    pub fn assemble(&self) -> OutputImage {
        image::assemble(self.data, &self.segments, self.init_start)
    }
}

/// Decodes `data` and assembles its flat image in one call.
pub fn convert(data: &[u8]) -> Result<OutputImage> {
    Ok(XoutFile::parse(data)?.assemble())
}
