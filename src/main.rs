//! Entry point for xout2bin.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Map the input file into memory.
//! 3. Decode the header and segment table.
//! 4. Assemble the flat image and report truncated segments.
//! 5. Write the image.
//!
//! Error handling is done via `anyhow`. Nothing is written unless decoding
//! succeeds.

use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use std::fs::File;
use tracing_subscriber::EnvFilter;

use xout2bin::config::Config;
use xout2bin::writer;
use xout2bin::XoutFile;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dump(xout: &XoutFile) {
    let header = xout.header();
    println!(
        "magic = {:x} ({}) nseg = {} init = {} reloc = {} symb = {}",
        header.magic,
        header.magic_description(),
        header.nseg,
        header.init_len,
        header.reloc_len,
        header.symb_len
    );
    for (i, sg) in xout.segments().iter().enumerate() {
        println!(
            "{:4x} sg[{}]:  sgno = {}  typ = {}  len = {}  ({})",
            sg.file_offset,
            i,
            sg.number,
            sg.kind.type_code(),
            sg.len,
            sg.kind
        );
    }
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level);

    let file = File::open(&config.input)
        .with_context(|| format!("failed to open {}", config.input.display()))?;
    // SAFETY: the mapping is read-only and only lives for this conversion.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("failed to map {}", config.input.display()))?;

    let xout = XoutFile::parse(&mmap)
        .with_context(|| format!("failed to parse {}", config.input.display()))?;

    if config.dump {
        dump(&xout);
    }

    let image = xout.assemble();
    for truncation in &image.warnings {
        tracing::warn!("{}", truncation);
    }

    writer::write_image(&config.output, &image.data)?;

    eprintln!(
        "{} -> {}: {} bytes ({} segments, {} initialized)",
        config.input.display(),
        config.output.display(),
        image.len(),
        xout.header().nseg,
        xout.header().init_len
    );
    Ok(())
}
