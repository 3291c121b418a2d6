//! x.out on-disk format definitions.
//!
//! All multi-byte fields are big-endian (Z8000 native order). The structs here
//! are plain byte layouts; use [`object::pod::from_bytes`] to view them in a
//! buffer and the `get(BigEndian)` accessors to read values.

use object::endian::{BigEndian, I16Bytes, I32Bytes, U16Bytes, U32Bytes};
use object::pod::Pod;

/// Segmented, non-executable.
pub const X_SU_MAGIC: u16 = 0xEE00;
/// Segmented, executable.
pub const X_SX_MAGIC: u16 = 0xEE01;
/// Non-segmented, non-executable.
pub const X_NU_MAGIC: u16 = 0xEE02;
/// Non-segmented, executable, non-shared.
pub const X_NXN_MAGIC: u16 = 0xEE03;
/// Non-segmented, non-executable, shared.
pub const X_NUS_MAGIC: u16 = 0xEE06;
/// Non-segmented, executable, shared.
pub const X_NXS_MAGIC: u16 = 0xEE07;
/// Non-segmented, non-executable, split I/D.
pub const X_NUI_MAGIC: u16 = 0xEE0A;
/// Non-segmented, executable, split I/D.
pub const X_NXI_MAGIC: u16 = 0xEE0B;

/// Every magic number the decoder accepts.
pub const MAGICS: [u16; 8] = [
    X_SU_MAGIC,
    X_SX_MAGIC,
    X_NU_MAGIC,
    X_NXN_MAGIC,
    X_NUS_MAGIC,
    X_NXS_MAGIC,
    X_NUI_MAGIC,
    X_NXI_MAGIC,
];

pub const X_SG_BSS: u8 = 1;
pub const X_SG_STK: u8 = 2;
pub const X_SG_COD: u8 = 3;
pub const X_SG_CON: u8 = 4;
pub const X_SG_DAT: u8 = 5;
pub const X_SG_MXU: u8 = 6;
pub const X_SG_MXP: u8 = 7;

/// Size of [`RawHeader`] on disk.
pub const HEADER_SIZE: usize = core::mem::size_of::<RawHeader>();
/// Size of one [`RawSegment`] on disk.
pub const SEGMENT_SIZE: usize = core::mem::size_of::<RawSegment>();

/// The fixed 16-byte file header.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct RawHeader {
    pub x_magic: U16Bytes<BigEndian>,
    pub x_nseg: I16Bytes<BigEndian>,
    pub x_init: I32Bytes<BigEndian>,
    pub x_reloc: I32Bytes<BigEndian>,
    pub x_symb: U32Bytes<BigEndian>,
}

/// One 4-byte segment table entry.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct RawSegment {
    pub x_sg_no: u8,
    pub x_sg_typ: u8,
    pub x_sg_len: U16Bytes<BigEndian>,
}

// SAFETY: both structs are `repr(C)` and built only from byte arrays, so they
// have alignment 1, no padding, and every bit pattern is valid.
unsafe impl Pod for RawHeader {}
unsafe impl Pod for RawSegment {}

/// Returns a human-readable description of a magic number, if it is known.
pub fn magic_description(magic: u16) -> Option<&'static str> {
    let desc = match magic {
        X_SU_MAGIC => "segmented, non executable",
        X_SX_MAGIC => "segmented, executable",
        X_NU_MAGIC => "non-segmented, non executable",
        X_NXN_MAGIC => "non-segmented, executable, non-shared",
        X_NUS_MAGIC => "non-segmented, non executable, shared",
        X_NXS_MAGIC => "non-segmented, executable, shared",
        X_NUI_MAGIC => "non-segmented, non executable, split ID",
        X_NXI_MAGIC => "non-segmented, executable, split ID",
        _ => return None,
    };
    Some(desc)
}
