//! Elliptic curve arithmetic over secp256k1.
//!
//! This crate provides the base field (mod p) and scalar field (mod n) in
//! Montgomery form, affine curve points with SEC1 and x-only encodings, and
//! helpers for random sampling. The curve parameters and generator are fixed
//! to the SEC 2 values in the `affine` module.

mod affine;
mod arith;
mod basefield;
mod errors;
mod group;
mod params;
mod random;
mod scalarfield;

pub use affine::{Affine, COMPRESSED_SIZE, UNCOMPRESSED_SIZE, X_ONLY_SIZE};
pub use basefield::BaseField;
pub use errors::CurveError;
pub use group::{Group, ScalarBits};
pub use params::validate_parameters;
pub use random::{random_nonzero_scalar, RandomField};
pub use scalarfield::ScalarField;
