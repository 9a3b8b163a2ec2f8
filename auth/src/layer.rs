//! The broker-facing facade.

use std::sync::Arc;

use tracing::{debug, info};

use crate::acl::AclTable;
use crate::chain::{Chain, Check, Request};
use crate::challenge::{ChallengeVerifier, ChallengeWindow, Clock, SystemClock};
use crate::checks::{
    AnonymousPolicy, CredentialLookup, SignatureChallenge, SignatureScopedTopic, TopicAcl, TopicTaboo,
};
use crate::config::{AuthCheckKind, AuthConfig, TopicCheckKind};
use crate::credentials::CredentialStore;
use crate::decision::{AuthResult, Decision};
use crate::error::AuthError;
use crate::password::{Argon2Verifier, PasswordVerifier};
use crate::session::SessionView;

/// An authentication chain and a topic chain built from one configuration.
///
/// `TrustLayer` is `Send + Sync`; share it across connection tasks behind an
/// `Arc`.
pub struct TrustLayer {
    authentication: Chain,
    topics: Chain,
}

impl TrustLayer {
    /// Builds the layer with the system clock and Argon2 password hashes.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::from_config_with(config, Arc::new(SystemClock), Arc::new(Argon2Verifier::default()))
    }

    pub fn from_config_with(
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
        passwords: Arc<dyn PasswordVerifier>,
    ) -> Result<Self, AuthError> {
        curve::validate_parameters()?;
        config.validate()?;

        let store = Arc::new(CredentialStore::load(
            config.password_file.as_deref(),
            config.public_key_file.as_deref(),
        ));
        let verifier = ChallengeVerifier::new(ChallengeWindow::new(config.challenge_window_seconds)?, clock);

        let mut authentication = Chain::new();
        for kind in &config.auth_checks {
            let check: Box<dyn Check> = match kind {
                AuthCheckKind::Anonymous => Box::new(AnonymousPolicy::new(config.allow_anonymous)),
                AuthCheckKind::CredentialLookup => {
                    Box::new(CredentialLookup::new(Arc::clone(&store), Arc::clone(&passwords)))
                }
                AuthCheckKind::SignatureChallenge => Box::new(SignatureChallenge::new(
                    Arc::clone(&store),
                    verifier.clone(),
                    config.restricted_to_registered,
                )),
            };
            authentication.push(check);
        }

        let acl = Arc::new(AclTable::new(&config.acl));
        let mut topics = Chain::new();
        for kind in &config.topic_checks {
            let check: Box<dyn Check> = match kind {
                TopicCheckKind::SignatureScopedTopic => Box::new(SignatureScopedTopic::new(
                    config.signature_required_roots.clone(),
                    config.signature_required_scheme,
                )),
                TopicCheckKind::TopicTaboo => {
                    Box::new(TopicTaboo::new(config.taboo_topics.iter().cloned(), config.admin_identity.clone()))
                }
                TopicCheckKind::TopicAcl => Box::new(TopicAcl::new(Arc::clone(&acl))),
            };
            topics.push(check);
        }

        info!(
            auth_checks = ?authentication.names().collect::<Vec<_>>(),
            topic_checks = ?topics.names().collect::<Vec<_>>(),
            window_seconds = config.challenge_window_seconds,
            "trust layer ready"
        );
        Ok(Self { authentication, topics })
    }

    /// Assembles a layer from prebuilt chains.
    pub fn from_chains(authentication: Chain, topics: Chain) -> Self {
        Self { authentication, topics }
    }

    pub fn authenticate(&self, session: &dyn SessionView) -> AuthResult {
        let result = AuthResult::from(self.authentication.evaluate(&Request::connect(session)));
        debug!(
            identity = session.identity(),
            client_id = session.client_id(),
            decision = %result.decision,
            "authentication"
        );
        result
    }

    /// Decides a publish or subscribe on `topic` for a session that
    /// authenticated with `auth`.
    pub fn authorize_topic(&self, session: &dyn SessionView, auth: &AuthResult, topic: &str) -> Decision {
        self.topics
            .evaluate(&Request::topic(session, topic, auth.scheme))
            .decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ClientSession;

    #[test]
    fn test_default_config_allows_anonymous() {
        let layer = TrustLayer::from_config(&AuthConfig::default()).unwrap();
        let session = ClientSession::new("c1");

        let auth = layer.authenticate(&session);
        assert_eq!(auth.decision, Decision::Permit);
        assert_eq!(auth.scheme, None);
        assert_eq!(layer.authorize_topic(&session, &auth, "a/b"), Decision::Permit);
        assert_eq!(layer.authorize_topic(&session, &auth, "prohibited"), Decision::Deny);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let config = AuthConfig {
            challenge_window_seconds: 0,
            ..AuthConfig::default()
        };
        assert!(matches!(TrustLayer::from_config(&config), Err(AuthError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_chains() {
        let mut entries = std::collections::BTreeMap::new();
        entries.insert("alice".to_owned(), vec!["sensors/#".to_owned()]);
        let layer = TrustLayer::from_chains(
            Chain::new().with(AnonymousPolicy::new(false)),
            Chain::new().with(TopicAcl::new(Arc::new(AclTable::new(&entries)))),
        );

        let anonymous = ClientSession::new("c1");
        assert_eq!(layer.authenticate(&anonymous).decision, Decision::Deny);

        // Nothing in the authentication chain decides for a named identity.
        let alice = ClientSession::new("c2").with_identity("alice");
        let auth = layer.authenticate(&alice);
        assert_eq!(auth.decision, Decision::Deny);
        assert_eq!(layer.authorize_topic(&alice, &auth, "sensors/1/temp"), Decision::Permit);
        assert_eq!(layer.authorize_topic(&alice, &auth, "prohibited"), Decision::Deny);
    }

    #[test]
    fn test_layer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrustLayer>();
    }
}
