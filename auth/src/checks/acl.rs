use std::sync::Arc;

use tracing::debug;

use crate::acl::AclTable;
use crate::chain::{Check, Request};
use crate::decision::Verdict;

/// Allows only topics matching the identity's ACL patterns.
#[derive(Debug, Clone)]
pub struct TopicAcl {
    table: Arc<AclTable>,
}

impl TopicAcl {
    pub fn new(table: Arc<AclTable>) -> Self {
        Self { table }
    }
}

impl Check for TopicAcl {
    fn name(&self) -> &'static str {
        "topic-acl"
    }

    fn evaluate(&self, request: &Request<'_>) -> Verdict {
        let Some(topic) = request.topic else {
            return Verdict::INDETERMINATE;
        };
        if topic.is_empty() {
            return Verdict::DENY;
        }
        let identity = request.session.identity();
        let allowed = self.table.allows(identity, topic);
        debug!(identity, topic, allowed, "acl evaluated");
        Verdict::from_bool(allowed)
    }
}
