//! x.out to flat binary converter library.
//!
//! This library provides the core components for the `xout2bin` tool.
//! It is organized into several modules:
//! - `xout`: On-disk format definitions.
//! - `header`: File header decoding.
//! - `segment`: Segment table decoding.
//! - `image`: Flat image assembly.
//! - `file`: The decode-then-assemble pipeline.
//! - `config`: CLI configuration.
//! - `writer`: Output file writing.

pub mod config;
pub mod error;
pub mod file;
pub mod header;
pub mod image;
pub mod segment;
pub mod writer;
pub mod xout;

pub use error::XoutError;
pub use file::{convert, XoutFile};
pub use image::{OutputImage, Truncation};
