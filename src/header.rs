//! Header decoding.

use object::endian::BigEndian;
use object::pod;

use crate::error::{Result, XoutError};
use crate::xout::{self, RawHeader, HEADER_SIZE};

/// The decoded x.out file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic number, always one of [`xout::MAGICS`].
    pub magic: u16,
    /// Number of segment table entries. Never negative.
    pub nseg: i16,
    /// Length of the initialized-data region.
    pub init_len: i32,
    /// Length of the relocation table. Carried but never read.
    pub reloc_len: i32,
    /// Length of the symbol table. Carried but never read.
    pub symb_len: u32,
}

impl FileHeader {
    /// Number of segment descriptors that follow the header.
    pub fn segment_count(&self) -> usize {
        // nseg is validated non-negative in `parse_header`.
        self.nseg.max(0) as usize
    }

    pub fn is_segmented(&self) -> bool {
        matches!(self.magic, xout::X_SU_MAGIC | xout::X_SX_MAGIC)
    }

    pub fn is_executable(&self) -> bool {
        matches!(
            self.magic,
            xout::X_SX_MAGIC | xout::X_NXN_MAGIC | xout::X_NXS_MAGIC | xout::X_NXI_MAGIC
        )
    }

    pub fn magic_description(&self) -> &'static str {
        xout::magic_description(self.magic).unwrap_or("unknown")
    }
}

/// Decodes the fixed header at the start of `data`.
///
/// Returns the header together with the offset just past it, where the
/// segment table begins.
pub fn parse_header(data: &[u8]) -> Result<(FileHeader, usize)> {
    let (raw, _) = pod::from_bytes::<RawHeader>(data)
        .map_err(|()| XoutError::TruncatedHeader { len: data.len() })?;

    let magic = raw.x_magic.get(BigEndian);
    if !xout::MAGICS.contains(&magic) {
        return Err(XoutError::BadMagic(magic));
    }

    let nseg = raw.x_nseg.get(BigEndian);
    if nseg < 0 {
        return Err(XoutError::InvalidSegmentCount(nseg));
    }

    let header = FileHeader {
        magic,
        nseg,
        init_len: raw.x_init.get(BigEndian),
        reloc_len: raw.x_reloc.get(BigEndian),
        symb_len: raw.x_symb.get(BigEndian),
    };
    tracing::debug!(
        "header: magic={:#06x} nseg={} init={} reloc={} symb={}",
        header.magic,
        header.nseg,
        header.init_len,
        header.reloc_len,
        header.symb_len
    );
    Ok((header, HEADER_SIZE))
}
