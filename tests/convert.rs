use xout2bin::segment::SegmentKind;
use xout2bin::xout::MAGICS;
use xout2bin::{convert, Truncation, XoutError, XoutFile};

struct Builder {
    magic: u16,
    nseg: Option<i16>,
    segments: Vec<(u8, u8, u16)>,
    payload: Vec<u8>,
}

impl Builder {
    fn new() -> Self {
        Self {
            magic: 0xEE03,
            nseg: None,
            segments: Vec::new(),
            payload: Vec::new(),
        }
    }

    fn magic(mut self, magic: u16) -> Self {
        self.magic = magic;
        self
    }

    fn nseg(mut self, nseg: i16) -> Self {
        self.nseg = Some(nseg);
        self
    }

    fn segment(mut self, no: u8, typ: u8, len: u16) -> Self {
        self.segments.push((no, typ, len));
        self
    }

    fn payload(mut self, bytes: &[u8]) -> Self {
        self.payload.extend_from_slice(bytes);
        self
    }

    fn build(&self) -> Vec<u8> {
        let nseg = self.nseg.unwrap_or(self.segments.len() as i16);
        let init: i32 = self
            .segments
            .iter()
            .filter(|&&(_, typ, _)| (3..=7).contains(&typ))
            .map(|&(_, _, len)| len as i32)
            .sum();
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.magic.to_be_bytes());
        buf.extend_from_slice(&nseg.to_be_bytes());
        buf.extend_from_slice(&init.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        for &(no, typ, len) in &self.segments {
            buf.push(no);
            buf.push(typ);
            buf.extend_from_slice(&len.to_be_bytes());
        }
        buf.extend_from_slice(&self.payload);
        buf
    }
}

fn code_and_bss() -> Builder {
    Builder::new().segment(0, 3, 6).segment(1, 1, 4)
}

#[test]
fn code_followed_by_bss() {
    let buf = code_and_bss().payload(&[1, 2, 3, 4, 5, 6]).build();
    let xout = XoutFile::parse(&buf).unwrap();
    assert_eq!(xout.header().init_len, 6);

    let image = xout.assemble();
    assert_eq!(image.data, vec![1, 2, 3, 4, 5, 6, 0, 0, 0, 0]);
    assert!(image.warnings.is_empty());
}

#[test]
fn truncated_data_is_zero_padded() {
    let buf = code_and_bss().payload(&[1, 2, 3]).build();
    let image = convert(&buf).unwrap();
    assert_eq!(image.data, vec![1, 2, 3, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        image.warnings,
        vec![Truncation { segment: 0, expected: 6, actual: 3 }]
    );
}

#[test]
fn stack_segment_is_skipped() {
    let buf = Builder::new()
        .segment(0, 2, 100)
        .segment(1, 5, 2)
        .payload(&[0xAB, 0xCD])
        .build();
    let xout = XoutFile::parse(&buf).unwrap();
    assert_eq!(xout.segments()[0].kind, SegmentKind::Stack);

    let image = xout.assemble();
    assert_eq!(image.data, vec![0xAB, 0xCD]);
    assert!(image.warnings.is_empty());
}

#[test]
fn only_whitelisted_magics_parse() {
    for magic in 0..=u16::MAX {
        let buf = Builder::new().magic(magic).build();
        let result = XoutFile::parse(&buf);
        if MAGICS.contains(&magic) {
            assert!(result.is_ok(), "{magic:#06x} should parse");
        } else {
            assert_eq!(result.unwrap_err(), XoutError::BadMagic(magic));
        }
    }
}

#[test]
fn output_length_matches_declared_lengths() {
    let kinds = [1u8, 2, 3, 4, 5, 6, 7];
    for payload_len in [0usize, 5, 37, 200] {
        let mut builder = Builder::new();
        let mut expected = 0usize;
        for (i, &typ) in kinds.iter().cycle().take(21).enumerate() {
            let len = (i as u16 * 7) % 23;
            builder = builder.segment(i as u8, typ, len);
            if typ != 2 {
                expected += len as usize;
            }
        }
        let payload: Vec<u8> = (1..=payload_len).map(|b| b as u8 | 1).collect();
        let buf = builder.payload(&payload).build();

        let xout = XoutFile::parse(&buf).unwrap();
        let image = xout.assemble();
        assert_eq!(image.len(), expected, "payload {payload_len}");
        assert_eq!(xout.declared_image_len(), expected);
    }
}

#[test]
fn zero_fill_and_ordering() {
    // Payload bytes are all non-zero, so any zero in the output must come from
    // BSS or padding.
    let buf = Builder::new()
        .segment(0, 4, 2)
        .segment(1, 1, 3)
        .segment(2, 2, 9)
        .segment(3, 6, 2)
        .segment(4, 7, 4)
        .payload(&[0x10, 0x11, 0x20, 0x21, 0x30])
        .build();
    let image = convert(&buf).unwrap();
    assert_eq!(
        image.data,
        vec![0x10, 0x11, 0, 0, 0, 0x20, 0x21, 0x30, 0, 0, 0]
    );
    assert_eq!(
        image.warnings,
        vec![Truncation { segment: 4, expected: 4, actual: 1 }]
    );
}

#[test]
fn segment_numbers_may_repeat() {
    let buf = Builder::new()
        .segment(3, 3, 1)
        .segment(3, 5, 1)
        .segment(0, 200, 4)
        .payload(&[7, 8])
        .build();
    let image = convert(&buf).unwrap();
    assert_eq!(image.data, vec![7, 8]);
}

#[test]
fn truncated_segment_table_names_index() {
    for declared in 1..6i16 {
        for present in 0..declared as usize {
            let mut builder = Builder::new().nseg(declared);
            for i in 0..present {
                builder = builder.segment(i as u8, 3, 1);
            }
            let mut buf = builder.build();
            // A partial descriptor still counts as missing.
            buf.extend_from_slice(&[0, 3]);
            assert_eq!(
                XoutFile::parse(&buf).unwrap_err(),
                XoutError::TruncatedSegmentTable(present)
            );
        }
    }
}

#[test]
fn short_buffers_are_truncated_headers() {
    let full = code_and_bss().payload(&[1, 2, 3, 4, 5, 6]).build();
    for len in 0..16 {
        assert_eq!(
            convert(&full[..len]).unwrap_err(),
            XoutError::TruncatedHeader { len }
        );
        assert_eq!(
            convert(&[0xFFu8; 16][..len]).unwrap_err(),
            XoutError::TruncatedHeader { len }
        );
    }
}

#[test]
fn negative_segment_count_is_rejected() {
    let buf = Builder::new().nseg(-2).build();
    assert_eq!(
        convert(&buf).unwrap_err(),
        XoutError::InvalidSegmentCount(-2)
    );
}

#[test]
fn errors_render_readably() {
    assert_eq!(XoutError::BadMagic(0xEE04).to_string(), "bad magic 0xEE04");
    assert_eq!(
        XoutError::TruncatedSegmentTable(3).to_string(),
        "truncated segment table at segment 3"
    );
}
