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

pub mod container;
pub mod curve;
pub mod ecdh;
pub mod ecdsa;
pub mod eddsa;
pub mod point;
pub mod rand;
pub mod registry;

mod error;
mod private_key;
mod public_key;
mod quirks;

pub use crate::{
    curve::{Curve, CurveBuilder, CurveFamily, CurveModel},
    error::{Error, Result},
    point::AffinePoint,
    private_key::PrivateKey,
    public_key::PublicKey,
    quirks::CurveQuirk,
};
pub use {const_oid::ObjectIdentifier, digest, num_bigint, primefield, rand_core, signature};
