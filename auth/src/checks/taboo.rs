use std::collections::HashSet;

use tracing::debug;

use crate::chain::{Check, Request};
use crate::decision::Verdict;

/// Denylist of exact topic names that only the administrator may use.
#[derive(Debug, Clone)]
pub struct TopicTaboo {
    taboo: HashSet<String>,
    admin_identity: String,
}

impl TopicTaboo {
    pub fn new<I, S>(taboo: I, admin_identity: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taboo: taboo.into_iter().map(Into::into).collect(),
            admin_identity: admin_identity.into(),
        }
    }
}

impl Check for TopicTaboo {
    fn name(&self) -> &'static str {
        "topic-taboo"
    }

    fn evaluate(&self, request: &Request<'_>) -> Verdict {
        let Some(topic) = request.topic else {
            return Verdict::INDETERMINATE;
        };
        if topic.is_empty() {
            return Verdict::DENY;
        }
        let identity = request.session.identity();
        if identity != self.admin_identity && self.taboo.contains(topic) {
            debug!(identity, topic, "taboo topic");
            return Verdict::DENY;
        }
        Verdict::PERMIT
    }
}
