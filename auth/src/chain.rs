//! Ordered, fail-closed evaluation of checks.

use tracing::debug;

use crate::challenge::SignatureKind;
use crate::decision::Verdict;
use crate::session::SessionView;

/// One authentication or authorization question put to the chain.
#[derive(Clone, Copy)]
pub struct Request<'a> {
    pub session: &'a dyn SessionView,
    /// `None` for connect-time authentication.
    pub topic: Option<&'a str>,
    /// Scheme recorded when the session authenticated.
    pub scheme: Option<SignatureKind>,
}

impl<'a> Request<'a> {
    pub fn connect(session: &'a dyn SessionView) -> Self {
        Self {
            session,
            topic: None,
            scheme: None,
        }
    }

    pub fn topic(session: &'a dyn SessionView, topic: &'a str, scheme: Option<SignatureKind>) -> Self {
        Self {
            session,
            topic: Some(topic),
            scheme,
        }
    }
}

/// A single policy in a chain.
///
/// Checks that have nothing to say about a request return
/// [`Verdict::INDETERMINATE`].
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, request: &Request<'_>) -> Verdict;
}

/// Checks evaluated in order. The first Permit or Deny wins; if every check
/// is indeterminate the chain denies.
#[derive(Default)]
pub struct Chain {
    checks: Vec<Box<dyn Check>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, check: impl Check + 'static) -> Self {
        self.push(Box::new(check));
        self
    }

    pub fn push(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|check| check.name())
    }

    pub fn evaluate(&self, request: &Request<'_>) -> Verdict {
        for check in &self.checks {
            let verdict = check.evaluate(request);
            if verdict.decision.is_final() {
                debug!(
                    check = check.name(),
                    decision = %verdict.decision,
                    client_id = request.session.client_id(),
                    topic = request.topic,
                    "chain decided"
                );
                return verdict;
            }
        }
        debug!(
            client_id = request.session.client_id(),
            topic = request.topic,
            "no check applied, denying"
        );
        Verdict::DENY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Decision;
    use crate::session::ClientSession;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        verdict: Verdict,
        calls: Arc<AtomicUsize>,
    }

    impl Check for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn evaluate(&self, _request: &Request<'_>) -> Verdict {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    fn fixed(decision: Decision, calls: &Arc<AtomicUsize>) -> Fixed {
        Fixed {
            verdict: Verdict::new(decision),
            calls: Arc::clone(calls),
        }
    }

    #[test]
    fn test_all_indeterminate_denies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::new()
            .with(fixed(Decision::Indeterminate, &calls))
            .with(fixed(Decision::Indeterminate, &calls));
        let session = ClientSession::new("c1");

        assert_eq!(chain.evaluate(&Request::connect(&session)).decision, Decision::Deny);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_chain_denies() {
        let session = ClientSession::new("c1");
        assert_eq!(Chain::new().evaluate(&Request::connect(&session)), Verdict::DENY);
    }

    #[test]
    fn test_first_final_decision_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::new()
            .with(fixed(Decision::Indeterminate, &calls))
            .with(fixed(Decision::Permit, &calls))
            .with(fixed(Decision::Deny, &calls));
        let session = ClientSession::new("c1");

        assert_eq!(chain.evaluate(&Request::connect(&session)).decision, Decision::Permit);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_deny_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = Chain::new()
            .with(fixed(Decision::Deny, &calls))
            .with(fixed(Decision::Permit, &calls));
        let session = ClientSession::new("c1");

        assert_eq!(chain.evaluate(&Request::topic(&session, "t", None)).decision, Decision::Deny);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
