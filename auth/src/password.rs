//! Password-hash verification seam.

use argon2::{Argon2, PasswordHash, PasswordVerifier as _};
use tracing::warn;

/// Checks a cleartext password against a stored hash string.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Verifies PHC-format Argon2 hashes (`$argon2id$v=19$...`).
#[derive(Debug, Default, Clone)]
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
}

impl PasswordVerifier for Argon2Verifier {
    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "stored password hash is not a PHC string");
                return false;
            }
        };
        self.argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;

    fn hash(password: &str) -> String {
        let salt = SaltString::encode_b64(b"fixed-test-salt!").unwrap();
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_verifies_matching_password() {
        let verifier = Argon2Verifier::default();
        let stored = hash("correct horse");
        assert!(verifier.verify("correct horse", &stored));
        assert!(!verifier.verify("battery staple", &stored));
    }

    #[test]
    fn test_rejects_garbage_hash() {
        assert!(!Argon2Verifier::default().verify("pw", "not-a-hash"));
    }
}
