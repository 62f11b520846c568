#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::mod_module_files,
    missing_docs,
    rust_2018_idioms,
    unused_qualifications
)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod crt;
mod element;
mod error;
mod poly;

pub use crate::{
    crt::Crt,
    element::{FieldElement, mod_inverse, to_padded_bytes},
    error::{Error, Result},
    poly::Polynomial,
};
pub use num_bigint;

/// Byte order used when encoding/decoding field elements as bytestrings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteOrder {
    /// Big endian.
    BigEndian,

    /// Little endian.
    LittleEndian,
}
