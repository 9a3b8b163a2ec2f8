//! One-time validation of the compiled-in curve constants.

use std::sync::OnceLock;

use crate::errors::CurveError;
use crate::{basefield, scalarfield, Affine, BaseField, ScalarField};

static VALIDATED: OnceLock<Result<(), CurveError>> = OnceLock::new();

/// Validate the curve constants once per process.
///
/// Checks that p = 3 mod 4 (the square root exponent relies on it), that the
/// Montgomery constants round-trip for both moduli, and that G lies on the
/// curve. Later calls return the memoized outcome.
pub fn validate_parameters() -> Result<(), CurveError> {
    *VALIDATED.get_or_init(check_parameters)
}

fn check_parameters() -> Result<(), CurveError> {
    if basefield::MODULUS.m[0] & 3 != 3 {
        return Err(CurveError::InvalidParameters("p is not 3 mod 4"));
    }

    if BaseField::from_u64(1) != BaseField::ONE || ScalarField::from_canonical_u64(1) != ScalarField::ONE {
        return Err(CurveError::InvalidParameters("montgomery constants disagree"));
    }

    let two = BaseField::from_u64(2);
    if two * two.invert()? != BaseField::ONE {
        return Err(CurveError::InvalidParameters("base field inversion failed"));
    }

    let two = ScalarField::from_canonical_u64(2);
    if two * two.invert()? != ScalarField::ONE {
        return Err(CurveError::InvalidParameters("scalar field inversion failed"));
    }

    if scalarfield::MODULUS.m[3] != u64::MAX {
        return Err(CurveError::InvalidParameters("group order below 2^255"));
    }

    if !Affine::generator().is_on_curve() {
        return Err(CurveError::InvalidParameters("generator is not on the curve"));
    }

    Ok(())
}
