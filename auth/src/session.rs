//! Read-only view of a broker session.

/// What the trust layer needs to know about a connecting client.
///
/// The broker owns the session; checks only read from it. Empty strings mean
/// "not supplied".
pub trait SessionView: Send + Sync {
    /// Username, or a public key in hex for signature logins.
    fn identity(&self) -> &str;
    /// Password, or a hex-encoded signature over the current challenge.
    fn credential(&self) -> &str;
    /// MQTT client identifier, bound into the challenge message.
    fn client_id(&self) -> &str;
}

/// Owned session record for brokers without their own session type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSession {
    pub identity: String,
    pub credential: String,
    pub client_id: String,
}

impl ClientSession {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }
}

impl SessionView for ClientSession {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn credential(&self) -> &str {
        &self.credential
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }
}
