//! Time-windowed challenge-response over Schnorr or ECDSA signatures.
//!
//! The challenge is never sent to the client. Both sides compute
//! `SHA256(window_label || client_id)` from the wall clock, and the client
//! presents a signature over it as its password. Labels for the current and
//! the previous window are both accepted, so a signature stays valid for at
//! least one full window.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::AuthError;

/// Hex length of a 64-byte Schnorr signature.
const SCHNORR_CREDENTIAL_LEN: usize = 128;

/// Hex length of a 32-byte x-only key.
const X_ONLY_HEX_LEN: usize = 64;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Signature scheme a credential is checked against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    Schnorr,
    Ecdsa,
}

impl SignatureKind {
    /// Picks the scheme from the credential alone: exactly 128 hex
    /// characters is a Schnorr signature, anything else is DER ECDSA.
    ///
    /// Clients of the existing protocol send no scheme marker, so this length
    /// rule has to be kept as is. A 64-byte DER signature would be misread.
    pub fn for_credential(credential: &str) -> Self {
        if credential.len() == SCHNORR_CREDENTIAL_LEN {
            SignatureKind::Schnorr
        } else {
            SignatureKind::Ecdsa
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignatureKind::Schnorr => "schnorr",
            SignatureKind::Ecdsa => "ecdsa",
        }
    }
}

/// Granularity of the challenge clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChallengeWindow {
    seconds: u32,
}

impl ChallengeWindow {
    pub fn new(seconds: u32) -> Result<Self, AuthError> {
        if seconds == 0 {
            return Err(AuthError::InvalidConfig(
                "challenge window must be at least one second".to_owned(),
            ));
        }
        Ok(Self { seconds })
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Start of the window containing `at`.
    pub fn floor(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let seconds = at.timestamp();
        let start = seconds - seconds.rem_euclid(i64::from(self.seconds));
        DateTime::from_timestamp(start, 0).unwrap_or(at)
    }

    /// Start of the window before the one containing `at`.
    pub fn previous(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        self.floor(at - chrono::Duration::seconds(i64::from(self.seconds)))
    }

    /// Text form of the window containing `at`.
    ///
    /// Minute windows render as `YYYY-MM-DDTHH:MM` and ten-second windows as
    /// `YYYY-MM-DDTHH:MM:S` (tens digit of the seconds only). Any other width
    /// renders the window start as `YYYY-MM-DDTHH:MM:SS`.
    pub fn label(&self, at: DateTime<Utc>) -> String {
        let start = self.floor(at);
        match self.seconds {
            60 => start.format("%Y-%m-%dT%H:%M").to_string(),
            10 => {
                let mut label = start.format("%Y-%m-%dT%H:%M:%S").to_string();
                label.truncate(18);
                label
            }
            _ => start.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// `SHA256(label || client_id)`.
pub fn challenge_digest(label: &str, client_id: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.update(client_id.as_bytes());
    hasher.finalize().into()
}

/// Checks challenge signatures against the current and previous window.
#[derive(Clone)]
pub struct ChallengeVerifier {
    window: ChallengeWindow,
    clock: Arc<dyn Clock>,
}

impl ChallengeVerifier {
    pub fn new(window: ChallengeWindow, clock: Arc<dyn Clock>) -> Self {
        Self { window, clock }
    }

    pub fn window(&self) -> ChallengeWindow {
        self.window
    }

    /// The two digests a signature may cover right now, current window first.
    pub fn digests(&self, client_id: &str) -> [[u8; 32]; 2] {
        let now = self.clock.now();
        [
            challenge_digest(&self.window.label(now), client_id),
            challenge_digest(&self.window.label(self.window.previous(now)), client_id),
        ]
    }

    /// Verifies `credential` (hex signature) for `client_id` under `key`
    /// (hex public key). Returns the scheme on success.
    ///
    /// Malformed hex, wrong lengths and bad DER are logged and count as a
    /// failed verification.
    pub fn verify(&self, client_id: &str, key: &str, credential: &str) -> Option<SignatureKind> {
        let kind = SignatureKind::for_credential(credential);
        let verified = self
            .digests(client_id)
            .iter()
            .any(|digest| verify_with(kind, digest, key, credential));
        verified.then_some(kind)
    }
}

fn verify_with(kind: SignatureKind, digest: &[u8; 32], key: &str, credential: &str) -> bool {
    let outcome = match kind {
        SignatureKind::Schnorr => verify_schnorr(digest, key, credential),
        SignatureKind::Ecdsa => verify_ecdsa(digest, key, credential),
    };
    match outcome {
        Ok(valid) => valid,
        Err(reason) => {
            debug!(scheme = kind.as_str(), %reason, "malformed challenge response");
            false
        }
    }
}

fn verify_schnorr(digest: &[u8; 32], key: &str, credential: &str) -> Result<bool, String> {
    // Accepts both x-only and SEC1 compressed hex: the x-coordinate is the tail.
    let tail = key
        .len()
        .checked_sub(X_ONLY_HEX_LEN)
        .and_then(|start| key.get(start..))
        .ok_or_else(|| format!("public key shorter than {X_ONLY_HEX_LEN} hex characters"))?;
    let pubkey = hex::decode(tail).map_err(|err| format!("public key: {err}"))?;
    let sig = hex::decode(credential).map_err(|err| format!("signature: {err}"))?;
    schnorr::verify(digest, &pubkey, &sig).map_err(|err| err.to_string())
}

fn verify_ecdsa(digest: &[u8; 32], key: &str, credential: &str) -> Result<bool, String> {
    let pubkey = hex::decode(key).map_err(|err| format!("public key: {err}"))?;
    let sig = hex::decode(credential).map_err(|err| format!("signature: {err}"))?;
    ecdsa::verify(digest, &pubkey, &sig).map_err(|err| err.to_string())
}
