//! Structured key records.
//!
//! These mirror the SEC 1 / PKCS#8 / SPKI structures (`ECParameters`,
//! `ECPrivateKey`, `SubjectPublicKeyInfo`) after ASN.1 decoding, so that a
//! DER or PEM codec only has to move bytes in and out of them. Domain
//! parameters are either a named curve OID or explicit prime field
//! parameters; explicit parameters are matched back to the registry so that
//! well-known curves regain their name, OID and quirks.

use crate::{
    AffinePoint, Curve, CurveBuilder, CurveModel, Error, PrivateKey, PublicKey, Result,
    point::decode_uncompressed_coordinates, private_key::scalar_len, registry,
};
use alloc::vec::Vec;
use const_oid::ObjectIdentifier;
use num_bigint::BigUint;
use primefield::{ByteOrder, FieldElement, to_padded_bytes};
use zeroize::Zeroizing;

/// Underlying field of explicit domain parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldId {
    /// Prime field `GF(p)`.
    Prime {
        /// Field modulus.
        p: BigUint,
    },

    /// Binary field `GF(2^m)` with trinomial or pentanomial basis.
    CharacteristicTwo {
        /// Extension degree.
        m: u32,

        /// Exponents of the reduction polynomial's middle terms.
        basis: Vec<u32>,
    },
}

/// Explicit short Weierstrass domain parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExplicitParameters {
    /// Field the curve is defined over.
    pub field: FieldId,

    /// Coefficient `a` as a big-endian field element.
    pub a: Vec<u8>,

    /// Coefficient `b` as a big-endian field element.
    pub b: Vec<u8>,

    /// Uncompressed encoding of the generator.
    pub generator: Vec<u8>,

    /// Order of the generator.
    pub order: BigUint,

    /// Cofactor, which is optional in SEC 1.
    pub cofactor: Option<BigUint>,
}

/// Domain parameters of a key record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DomainParameters {
    /// Named curve.
    Named(ObjectIdentifier),

    /// Explicitly specified curve.
    Explicit(ExplicitParameters),
}

impl DomainParameters {
    /// Resolve these parameters to a curve.
    pub fn to_curve(&self) -> Result<Curve> {
        match self {
            DomainParameters::Named(oid) => registry::lookup_oid(oid),
            DomainParameters::Explicit(params) => {
                let FieldId::Prime { p } = &params.field else {
                    return Err(Error::UnsupportedField);
                };

                let (gx, gy) = decode_uncompressed_coordinates(&params.generator)?;
                let mut builder = CurveBuilder::short_weierstrass(
                    p.clone(),
                    BigUint::from_bytes_be(&params.a),
                    BigUint::from_bytes_be(&params.b),
                )
                .generator(gx, gy)
                .order(params.order.clone());
                if let Some(cofactor) = &params.cofactor {
                    builder = builder.cofactor(cofactor.clone());
                }

                let curve = builder.build()?;
                Ok(registry::find_by_parameters(&curve).unwrap_or(curve))
            }
        }
    }
}

impl Curve {
    /// Domain parameters for a key record: the OID if the curve has one,
    /// explicit parameters otherwise.
    pub fn to_domain_parameters(&self) -> Result<DomainParameters> {
        match self.oid() {
            Some(oid) => Ok(DomainParameters::Named(oid)),
            None => self.to_explicit_parameters().map(DomainParameters::Explicit),
        }
    }

    /// Explicit domain parameters. Only short Weierstrass curves with a
    /// generator and known order can be expressed this way.
    pub fn to_explicit_parameters(&self) -> Result<ExplicitParameters> {
        let CurveModel::ShortWeierstrass(model) = self.model() else {
            return Err(Error::UnsupportedOperation(
                "explicit parameters require a short Weierstrass curve",
            ));
        };

        let len = self.field_len();
        let encode = |value: &FieldElement| {
            value
                .to_bytes(ByteOrder::BigEndian, len)
                .ok_or(Error::InvalidEncoding)
        };

        Ok(ExplicitParameters {
            field: FieldId::Prime { p: self.p().clone() },
            a: encode(model.a())?,
            b: encode(model.b())?,
            generator: self.require_generator()?.to_uncompressed()?,
            order: self.require_order()?.clone(),
            cofactor: self.cofactor().cloned(),
        })
    }
}

/// Private key record (`ECPrivateKey`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrivateKeyRecord {
    /// Big-endian private scalar.
    pub scalar: Zeroizing<Vec<u8>>,

    /// Curve of the key.
    pub domain: DomainParameters,

    /// Optional uncompressed public point.
    pub public_point: Option<Vec<u8>>,
}

/// Public key record (`SubjectPublicKeyInfo`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKeyRecord {
    /// Curve of the key.
    pub domain: DomainParameters,

    /// Uncompressed public point.
    pub point: Vec<u8>,
}

impl PrivateKey {
    /// Load a private key record.
    ///
    /// An embedded public point must belong to the scalar, otherwise this
    /// fails with [`Error::KeyMismatch`].
    pub fn from_record(record: &PrivateKeyRecord) -> Result<Self> {
        let curve = record.domain.to_curve()?;
        let key = Self::from_scalar(&curve, BigUint::from_bytes_be(&record.scalar))?;

        if let Some(encoded) = &record.public_point {
            let point = AffinePoint::from_uncompressed(encoded, &curve)?;
            if &point != key.public_key().point() {
                return Err(Error::KeyMismatch);
            }
        }

        Ok(key)
    }

    /// Store this key in a record, including its public point.
    ///
    /// Keys derived from an EdDSA seed are stored by their scalar reduced
    /// modulo `n`. The seed is not part of the record.
    pub fn to_record(&self) -> Result<PrivateKeyRecord> {
        let curve = self.curve();
        let order = curve.require_order()?;
        let scalar = self.scalar() % order;

        Ok(PrivateKeyRecord {
            scalar: Zeroizing::new(
                to_padded_bytes(&scalar, ByteOrder::BigEndian, scalar_len(order))
                    .ok_or(Error::InvalidEncoding)?,
            ),
            domain: curve.to_domain_parameters()?,
            public_point: Some(self.public_key().to_uncompressed()?),
        })
    }
}

impl PublicKey {
    /// Load a public key record.
    pub fn from_record(record: &PublicKeyRecord) -> Result<Self> {
        let curve = record.domain.to_curve()?;
        Self::from_uncompressed(&record.point, &curve)
    }

    /// Store this key in a record.
    pub fn to_record(&self) -> Result<PublicKeyRecord> {
        Ok(PublicKeyRecord {
            domain: self.curve().to_domain_parameters()?,
            point: self.to_uncompressed()?,
        })
    }
}
