//! Built-in checks.
//!
//! Connect-time checks return Indeterminate for topic requests and topic
//! checks return Indeterminate for connect requests, so either kind can sit
//! in any chain.

mod acl;
mod anonymous;
mod credential_lookup;
mod signature;
mod signature_scoped;
mod taboo;

pub use acl::TopicAcl;
pub use anonymous::AnonymousPolicy;
pub use credential_lookup::CredentialLookup;
pub use signature::SignatureChallenge;
pub use signature_scoped::SignatureScopedTopic;
pub use taboo::TopicTaboo;
