use std::sync::Arc;

use tracing::{debug, info};

use crate::chain::{Check, Request};
use crate::challenge::{ChallengeVerifier, SignatureKind};
use crate::credentials::CredentialStore;
use crate::decision::Verdict;

/// Challenge-response login with a secp256k1 signature as the password.
///
/// The public key is the one bound to the identity in the public key file,
/// or else the identity itself read as hex. With `restricted_to_registered`
/// the key must also be registered for the scheme the credential selects
/// (see [`CredentialStore::is_registered`]); that is checked before any curve
/// arithmetic runs.
pub struct SignatureChallenge {
    store: Arc<CredentialStore>,
    verifier: ChallengeVerifier,
    restricted_to_registered: bool,
}

impl SignatureChallenge {
    pub fn new(store: Arc<CredentialStore>, verifier: ChallengeVerifier, restricted_to_registered: bool) -> Self {
        Self {
            store,
            verifier,
            restricted_to_registered,
        }
    }

    fn resolve_key<'a>(&'a self, identity: &'a str) -> Option<&'a str> {
        match self.store.bound_key(identity) {
            Some(key) => Some(key),
            None if is_hex(identity) => Some(identity),
            None => None,
        }
    }
}

fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.len() % 2 == 0 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

impl Check for SignatureChallenge {
    fn name(&self) -> &'static str {
        "signature-challenge"
    }

    fn evaluate(&self, request: &Request<'_>) -> Verdict {
        if request.topic.is_some() {
            return Verdict::INDETERMINATE;
        }
        let session = request.session;
        let identity = session.identity();
        let credential = session.credential();
        if identity.is_empty() || credential.is_empty() {
            return Verdict::INDETERMINATE;
        }
        let Some(key) = self.resolve_key(identity) else {
            debug!(identity, "no public key for identity");
            return Verdict::INDETERMINATE;
        };

        let kind = SignatureKind::for_credential(credential);
        if self.restricted_to_registered && !self.store.is_registered(key, kind) {
            info!(identity, client_id = session.client_id(), "public key not registered");
            return Verdict::DENY;
        }

        match self.verifier.verify(session.client_id(), key, credential) {
            Some(scheme) => {
                debug!(identity, client_id = session.client_id(), scheme = scheme.as_str(), "challenge verified");
                Verdict::signed(scheme)
            }
            None => {
                info!(identity, client_id = session.client_id(), "challenge signature rejected");
                Verdict::DENY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::{ChallengeWindow, FixedClock, challenge_digest};
    use crate::decision::Decision;
    use crate::session::ClientSession;
    use chrono::{TimeZone, Utc};

    const SECRET: &str = "fffc49122308b5e5666e6874ff4535d5a0e3f270a3a7545703c59da25378cbb3";
    const X_ONLY: &str = "d3a9b4022ab24b9218ae3290d2cbecf6d773ef70769afe9f15e7055a79cc90c4";
    const CLIENT: &str = "client_using_secp256k1";

    fn verifier() -> ChallengeVerifier {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 34, 56).unwrap();
        ChallengeVerifier::new(ChallengeWindow::new(60).unwrap(), Arc::new(FixedClock(now)))
    }

    fn check(store: CredentialStore, restricted: bool) -> SignatureChallenge {
        SignatureChallenge::new(Arc::new(store), verifier(), restricted)
    }

    fn schnorr_credential() -> String {
        let digest = challenge_digest("2024-03-05T12:34", CLIENT);
        let secret = hex::decode(SECRET).unwrap();
        hex::encode(schnorr::sign(&digest, &secret).unwrap())
    }

    #[test]
    fn test_schnorr_identity_as_key() {
        let session = ClientSession::new(CLIENT)
            .with_identity(X_ONLY)
            .with_credential(schnorr_credential());
        let verdict = check(CredentialStore::default(), false).evaluate(&Request::connect(&session));
        assert_eq!(verdict, Verdict::signed(SignatureKind::Schnorr));
    }

    #[test]
    fn test_ecdsa_with_bound_key() {
        let key = ecdsa::SigningKey::from_bytes(&hex::decode(SECRET).unwrap()).unwrap();
        let digest = challenge_digest("2024-03-05T12:33", CLIENT);
        let der = key.sign_deterministic(&digest, true).unwrap().to_der();

        let mut store = CredentialStore::default();
        store.add_public_key_entries(&format!(
            "carol:{}\n",
            hex::encode(key.verifying_key().to_compressed())
        ));
        let session = ClientSession::new(CLIENT)
            .with_identity("carol")
            .with_credential(hex::encode(der));

        let verdict = check(store, true).evaluate(&Request::connect(&session));
        assert_eq!(verdict, Verdict::signed(SignatureKind::Ecdsa));
    }

    #[test]
    fn test_unregistered_key_denied_before_verification() {
        let session = ClientSession::new(CLIENT)
            .with_identity(X_ONLY)
            .with_credential("00".repeat(64));
        let verdict = check(CredentialStore::default(), true).evaluate(&Request::connect(&session));
        assert_eq!(verdict.decision, Decision::Deny);
    }

    #[test]
    fn test_key_registered_in_compressed_form() {
        let mut store = CredentialStore::default();
        store.add_password_entries(&format!("secp256k1.puk:02{}\n", X_ONLY.to_ascii_uppercase()));
        let session = ClientSession::new(CLIENT)
            .with_identity(X_ONLY)
            .with_credential(schnorr_credential());

        let verdict = check(store, true).evaluate(&Request::connect(&session));
        assert_eq!(verdict, Verdict::signed(SignatureKind::Schnorr));
    }

    #[test]
    fn test_bad_signature_denied() {
        let session = ClientSession::new("another-client")
            .with_identity(X_ONLY)
            .with_credential(schnorr_credential());
        let verdict = check(CredentialStore::default(), false).evaluate(&Request::connect(&session));
        assert_eq!(verdict.decision, Decision::Deny);
    }

    #[test]
    fn test_inapplicable_sessions_defer() {
        let no_credential = ClientSession::new(CLIENT).with_identity(X_ONLY);
        let username = ClientSession::new(CLIENT).with_identity("alice").with_credential("pw");
        let anonymous = ClientSession::new(CLIENT).with_credential("00");

        for session in [&no_credential, &username, &anonymous] {
            let verdict = check(CredentialStore::default(), true).evaluate(&Request::connect(session));
            assert_eq!(verdict.decision, Decision::Indeterminate);
        }
    }
}
