//! Error types for the Schnorr signature scheme.

/// Errors that can occur during signing and verification operations.
///
/// Every variant is a contract violation by the caller. A well-formed
/// signature that simply does not verify is reported as `Ok(false)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchnorrError {
    /// The message is not a 32-byte digest.
    #[error("the message must be a 32-byte array")]
    InvalidMessageLength,

    /// The public key is not a 32-byte x-only encoding.
    #[error("the public key must be a 32-byte array")]
    InvalidPublicKeyLength,

    /// The signature is not 64 bytes.
    #[error("the signature must be a 64-byte array")]
    InvalidSignatureLength,

    /// The secret key is not 32 bytes.
    #[error("the secret key must be a 32-byte array")]
    InvalidPrivateKeyLength,

    /// The secret key is outside `[1, n-1]`.
    #[error("the secret key must be an integer in the range 1..n-1")]
    InvalidPrivateKey,

    /// The derived nonce reduced to zero. This happens only with negligible
    /// probability and is reported rather than retried.
    #[error("derived nonce is zero")]
    NonceIsZero,

    /// A point at infinity or an off-curve point was encountered where a
    /// valid curve point was expected.
    #[error("invalid curve point")]
    InvalidPoint,
}
