//! Credential files.
//!
//! One `identity:secret` entry per line, split at the first colon with both
//! halves trimmed. `#` lines and blank lines are skipped. The reserved
//! identity `secp256k1.puk` registers a public key instead of naming a user.
//!
//! Registered keys are hex and compared case-insensitively. A Schnorr login
//! matches on the x-coordinate alone, so a key registered in SEC1 form also
//! covers its x-only form and the other way round.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::challenge::SignatureKind;

/// Identity under which registered public keys are listed.
pub const REGISTERED_KEY_IDENTITY: &str = "secp256k1.puk";

/// Password hashes, registered keys and identity-bound keys, loaded once.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    passwords: HashMap<String, String>,
    bound_keys: HashMap<String, String>,
    registered_keys: HashSet<String>,
    registered_x_only: HashSet<String>,
}

const X_ONLY_HEX_LEN: usize = 64;

/// The x-coordinate of an x-only, SEC1 compressed or SEC1 uncompressed key,
/// as lowercase hex.
fn x_only_hex(key: &str) -> Option<&str> {
    match key.len() {
        64 => Some(key),
        66 if key.starts_with("02") || key.starts_with("03") => key.get(2..),
        130 if key.starts_with("04") => key.get(2..66),
        _ => None,
    }
}

impl CredentialStore {
    /// Loads both files. A missing or unreadable file is logged and skipped.
    pub fn load(password_file: Option<&Path>, public_key_file: Option<&Path>) -> Self {
        let mut store = Self::default();
        match password_file {
            Some(path) => {
                if let Some(content) = read_file(path, "password") {
                    store.add_password_entries(&content);
                }
            }
            None => debug!("no password-file configured"),
        }
        if let Some(path) = public_key_file {
            if let Some(content) = read_file(path, "public key") {
                store.add_public_key_entries(&content);
            }
        }
        info!(
            users = store.passwords.len(),
            bound_keys = store.bound_keys.len(),
            registered_keys = store.registered_keys.len(),
            "credential store loaded"
        );
        store
    }

    /// Password-file lines: `identity:hash`, or `secp256k1.puk:key`.
    pub fn add_password_entries(&mut self, content: &str) {
        for (identity, secret) in parse_entries(content) {
            if identity == REGISTERED_KEY_IDENTITY {
                self.register_key(secret);
            } else {
                debug!(identity, "password hash loaded");
                self.passwords.insert(identity.to_owned(), secret.to_owned());
            }
        }
    }

    /// Public-key-file lines: `identity:key` binds and registers the key;
    /// `secp256k1.puk:key` only registers it.
    pub fn add_public_key_entries(&mut self, content: &str) {
        for (identity, key) in parse_entries(content) {
            self.register_key(key);
            if identity != REGISTERED_KEY_IDENTITY {
                debug!(identity, "public key bound");
                self.bound_keys.insert(identity.to_owned(), key.to_owned());
            }
        }
    }

    fn register_key(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        debug!(key, "public key registered");
        let key = key.to_ascii_lowercase();
        if let Some(x) = x_only_hex(&key) {
            self.registered_x_only.insert(x.to_owned());
        }
        self.registered_keys.insert(key);
    }

    pub fn password_hash(&self, identity: &str) -> Option<&str> {
        self.passwords.get(identity).map(String::as_str)
    }

    pub fn bound_key(&self, identity: &str) -> Option<&str> {
        self.bound_keys.get(identity).map(String::as_str)
    }

    /// True when `key` is registered for logins with `kind`.
    ///
    /// ECDSA keys must match a registered SEC1 encoding. Schnorr keys are
    /// reduced to the trailing 64 hex characters, the x-coordinate the
    /// challenge is verified against.
    pub fn is_registered(&self, key: &str, kind: SignatureKind) -> bool {
        let key = key.to_ascii_lowercase();
        match kind {
            SignatureKind::Ecdsa => self.registered_keys.contains(&key),
            SignatureKind::Schnorr => key
                .len()
                .checked_sub(X_ONLY_HEX_LEN)
                .and_then(|start| key.get(start..))
                .is_some_and(|x| self.registered_x_only.contains(x)),
        }
    }

    pub fn user_count(&self) -> usize {
        self.passwords.len()
    }

    pub fn registered_key_count(&self) -> usize {
        self.registered_keys.len()
    }
}

fn read_file(path: &Path, kind: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), kind, "reading credential file");
            Some(content)
        }
        Err(err) => {
            warn!(path = %path.display(), kind, error = %err, "credential file unavailable, continuing without it");
            None
        }
    }
}

/// Splits credential lines into `(identity, secret)` pairs.
pub fn parse_entries(content: &str) -> impl Iterator<Item = (&str, &str)> {
    content.lines().enumerate().filter_map(|(index, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let Some((identity, secret)) = line.split_once(':') else {
            warn!(line = index + 1, "credential line without ':' skipped");
            return None;
        };
        let identity = identity.trim();
        if identity.is_empty() {
            warn!(line = index + 1, "credential line without identity skipped");
            return None;
        }
        Some((identity, secret.trim()))
    })
}
