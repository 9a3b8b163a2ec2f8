use std::path::PathBuf;

/// Errors raised while building a trust layer.
///
/// Verification outcomes are never errors; they surface as
/// [`Decision::Deny`](crate::Decision::Deny).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("curve parameters failed validation: {0}")]
    Curve(#[from] curve::CurveError),
}
