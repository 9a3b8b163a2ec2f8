use tracing::debug;

use crate::chain::{Check, Request};
use crate::challenge::SignatureKind;
use crate::decision::Verdict;

/// Topics under the configured roots require a signature-authenticated
/// session, optionally of one scheme. Other topics are left to later checks.
#[derive(Debug, Clone)]
pub struct SignatureScopedTopic {
    roots: Vec<String>,
    required: Option<SignatureKind>,
}

impl SignatureScopedTopic {
    pub fn new(roots: Vec<String>, required: Option<SignatureKind>) -> Self {
        Self { roots, required }
    }
}

impl Check for SignatureScopedTopic {
    fn name(&self) -> &'static str {
        "signature-scoped-topic"
    }

    fn evaluate(&self, request: &Request<'_>) -> Verdict {
        let Some(topic) = request.topic else {
            return Verdict::INDETERMINATE;
        };
        if !self.roots.iter().any(|root| topic.starts_with(root.as_str())) {
            return Verdict::INDETERMINATE;
        }

        let permitted = request
            .scheme
            .is_some_and(|scheme| self.required.is_none_or(|required| required == scheme));
        debug!(
            identity = request.session.identity(),
            topic,
            scheme = request.scheme.map(SignatureKind::as_str),
            permitted,
            "signature-scoped topic"
        );
        Verdict::from_bool(permitted)
    }
}
