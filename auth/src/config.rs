//! Trust layer configuration.
//!
//! Keys are kebab-case so an `[auth]` table from the broker's TOML file can be
//! deserialized directly. Every key is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::acl::is_valid_pattern;
use crate::challenge::SignatureKind;
use crate::error::AuthError;

/// Connect-time checks, in the order they may be configured.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthCheckKind {
    Anonymous,
    CredentialLookup,
    SignatureChallenge,
}

/// Per-topic checks.
///
/// `TopicTaboo` always reaches a final decision, so it belongs at the end of
/// `topic-checks`; checks listed after it never run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicCheckKind {
    SignatureScopedTopic,
    TopicTaboo,
    TopicAcl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AuthConfig {
    /// Permit sessions with an empty identity.
    pub allow_anonymous: bool,
    /// Deny signature logins whose public key is not registered.
    pub restricted_to_registered: bool,
    pub password_file: Option<PathBuf>,
    pub public_key_file: Option<PathBuf>,
    /// Identity to topic patterns. `anonymous` covers empty identities.
    pub acl: BTreeMap<String, Vec<String>>,
    pub taboo_topics: Vec<String>,
    /// Topic prefixes only signature-authenticated sessions may use.
    pub signature_required_roots: Vec<String>,
    /// Restrict signature-scoped topics to one scheme.
    pub signature_required_scheme: Option<SignatureKind>,
    pub challenge_window_seconds: u32,
    /// Identity exempt from the taboo list.
    pub admin_identity: String,
    pub auth_checks: Vec<AuthCheckKind>,
    pub topic_checks: Vec<TopicCheckKind>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_anonymous: true,
            restricted_to_registered: false,
            password_file: None,
            public_key_file: None,
            acl: BTreeMap::new(),
            taboo_topics: ["prohibited", "top-secret", "data/classified"]
                .into_iter()
                .map(String::from)
                .collect(),
            signature_required_roots: Vec::new(),
            signature_required_scheme: None,
            challenge_window_seconds: 60,
            admin_identity: "admin".to_owned(),
            auth_checks: vec![
                AuthCheckKind::Anonymous,
                AuthCheckKind::CredentialLookup,
                AuthCheckKind::SignatureChallenge,
            ],
            topic_checks: vec![TopicCheckKind::SignatureScopedTopic, TopicCheckKind::TopicTaboo],
        }
    }
}

impl AuthConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, AuthError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let source = std::fs::read_to_string(path).map_err(|source| AuthError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Topic checks configured after `topic-taboo`. They are never reached.
    pub fn shadowed_topic_checks(&self) -> &[TopicCheckKind] {
        self.topic_checks
            .iter()
            .position(|kind| *kind == TopicCheckKind::TopicTaboo)
            .map_or(&[][..], |index| &self.topic_checks[index + 1..])
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.challenge_window_seconds == 0 {
            return Err(AuthError::InvalidConfig(
                "challenge-window-seconds must be greater than zero".to_owned(),
            ));
        }
        if self.signature_required_roots.iter().any(String::is_empty) {
            return Err(AuthError::InvalidConfig(
                "signature-required-roots must not contain an empty prefix".to_owned(),
            ));
        }
        for (identity, patterns) in &self.acl {
            if let Some(pattern) = patterns.iter().find(|pattern| !is_valid_pattern(pattern)) {
                return Err(AuthError::InvalidConfig(format!(
                    "acl pattern `{pattern}` for `{identity}`: `#` must be the last level"
                )));
            }
        }
        let shadowed = self.shadowed_topic_checks();
        if !shadowed.is_empty() {
            warn!(?shadowed, "topic checks after topic-taboo are never evaluated");
        }
        Ok(())
    }
}
