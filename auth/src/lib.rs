//! Authentication and topic authorization for a publish/subscribe broker.
//!
//! A [`TrustLayer`] is built from an [`AuthConfig`] and answers two
//! questions:
//!
//! - may this session connect? ([`TrustLayer::authenticate`])
//! - may this session use this topic? ([`TrustLayer::authorize_topic`])
//!
//! Each question runs an ordered [`Chain`] of tri-state [`Check`]s. The first
//! Permit or Deny decides; a chain in which nothing applies denies.
//!
//! Besides anonymous access and password files, clients can log in with a
//! secp256k1 signature over `SHA256(window || client_id)` as their password,
//! see [`challenge`].
//!
//! ```
//! use auth::{AuthConfig, ClientSession, Decision, TrustLayer};
//!
//! let config = AuthConfig::from_toml_str("allow-anonymous = false").expect("config");
//! let layer = TrustLayer::from_config(&config).expect("layer");
//!
//! let session = ClientSession::new("client-1");
//! assert_eq!(layer.authenticate(&session).decision, Decision::Deny);
//! ```

pub mod acl;
pub mod chain;
pub mod challenge;
pub mod checks;
pub mod config;
pub mod credentials;
mod decision;
mod error;
mod layer;
pub mod password;
mod session;

pub use chain::{Chain, Check, Request};
pub use challenge::{ChallengeVerifier, ChallengeWindow, Clock, FixedClock, SignatureKind, SystemClock};
pub use config::{AuthCheckKind, AuthConfig, TopicCheckKind};
pub use decision::{AuthResult, Decision, Verdict};
pub use error::AuthError;
pub use layer::TrustLayer;
pub use session::{ClientSession, SessionView};
