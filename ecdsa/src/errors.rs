//! Error types for ECDSA signing and verification.

/// Contract violations reported by the ECDSA entry points.
///
/// A structurally valid signature that does not verify is `Ok(false)`, not
/// an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcdsaError {
    #[error("the message must be a 32-byte digest")]
    InvalidMessageLength,

    #[error("the private key must be a 32-byte integer in the range 1..n-1")]
    InvalidPrivateKey,

    #[error("the public key must be a 33-byte compressed or 65-byte uncompressed SEC1 point")]
    InvalidPublicKeyLength,

    /// The SEC1 bytes have a valid length but do not decode to a curve point.
    #[error("the public key is not a point on secp256k1")]
    InvalidPoint,

    #[error("malformed DER signature: {0}")]
    MalformedSignature(&'static str),

    /// Every deterministic nonce candidate produced a degenerate signature.
    #[error("no usable nonce after {0} attempts")]
    NonceExhausted(usize),
}
