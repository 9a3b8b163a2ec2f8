//! Error types for field and point arithmetic.

/// Errors raised by curve arithmetic on caller contract violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    /// Inversion of zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Two distinct points sharing an x-coordinate were added.
    ///
    /// On secp256k1 this means the operands are additive inverses; the strict
    /// addition treats that pairing as a caller error rather than returning
    /// the point at infinity.
    #[error("points are additive inverses or not on the curve")]
    InvalidPoint,

    /// The compiled-in curve constants failed their consistency checks.
    #[error("inconsistent curve parameters: {0}")]
    InvalidParameters(&'static str),
}
