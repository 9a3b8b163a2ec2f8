use tracing::debug;

use crate::chain::{Check, Request};
use crate::decision::Verdict;

/// Decides sessions without an identity; defers on everything else.
#[derive(Debug, Clone, Copy)]
pub struct AnonymousPolicy {
    allow_anonymous: bool,
}

impl AnonymousPolicy {
    pub fn new(allow_anonymous: bool) -> Self {
        Self { allow_anonymous }
    }
}

impl Check for AnonymousPolicy {
    fn name(&self) -> &'static str {
        "anonymous"
    }

    fn evaluate(&self, request: &Request<'_>) -> Verdict {
        if request.topic.is_some() || !request.session.identity().is_empty() {
            return Verdict::INDETERMINATE;
        }
        debug!(
            client_id = request.session.client_id(),
            allowed = self.allow_anonymous,
            "anonymous session"
        );
        Verdict::from_bool(self.allow_anonymous)
    }
}
