use std::sync::Arc;

use tracing::debug;

use crate::chain::{Check, Request};
use crate::credentials::CredentialStore;
use crate::decision::Verdict;
use crate::password::PasswordVerifier;

/// Username/password check against the password file.
///
/// Identities without a stored hash are left to later checks.
pub struct CredentialLookup {
    store: Arc<CredentialStore>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl CredentialLookup {
    pub fn new(store: Arc<CredentialStore>, verifier: Arc<dyn PasswordVerifier>) -> Self {
        Self { store, verifier }
    }
}

impl Check for CredentialLookup {
    fn name(&self) -> &'static str {
        "credential-lookup"
    }

    fn evaluate(&self, request: &Request<'_>) -> Verdict {
        if request.topic.is_some() {
            return Verdict::INDETERMINATE;
        }
        let identity = request.session.identity();
        if identity.is_empty() {
            return Verdict::INDETERMINATE;
        }
        let Some(hash) = self.store.password_hash(identity) else {
            debug!(identity, "no password hash for identity");
            return Verdict::INDETERMINATE;
        };

        let matched = self.verifier.verify(request.session.credential(), hash);
        debug!(identity, matched, "password checked");
        Verdict::from_bool(matched)
    }
}
