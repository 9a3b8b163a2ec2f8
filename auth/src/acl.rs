//! MQTT topic pattern matching and per-identity ACLs.

use std::collections::{BTreeMap, HashMap};

/// ACL entry used for sessions without an identity.
pub const ANONYMOUS_IDENTITY: &str = "anonymous";

/// True when `topic` matches `pattern`.
///
/// Levels are compared one by one. `+` matches exactly one level; `#` matches
/// whatever remains, including nothing, and must be the last pattern level;
/// a pattern with levels after `#` matches nothing. Running out of levels on
/// either side without reaching `#` is a mismatch.
pub fn topic_matches(topic: &str, pattern: &str) -> bool {
    let mut topic_levels = topic.split('/');
    let mut pattern_levels = pattern.split('/');

    loop {
        match (pattern_levels.next(), topic_levels.next()) {
            (Some("#"), _) => return pattern_levels.next().is_none(),
            (Some("+"), Some(_)) => {}
            (Some(expected), Some(level)) if expected == level => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// True when every `#` level in `pattern` is its last level.
pub fn is_valid_pattern(pattern: &str) -> bool {
    let mut levels = pattern.split('/').peekable();
    while let Some(level) = levels.next() {
        if level == "#" && levels.peek().is_some() {
            return false;
        }
    }
    true
}

/// Identity to allowed topic patterns.
#[derive(Debug, Clone, Default)]
pub struct AclTable {
    entries: HashMap<String, Vec<String>>,
}

impl AclTable {
    pub fn new(entries: &BTreeMap<String, Vec<String>>) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(identity, patterns)| (identity.clone(), patterns.clone()))
                .collect(),
        }
    }

    /// Patterns for `identity`, with the empty identity mapped to
    /// [`ANONYMOUS_IDENTITY`].
    pub fn patterns(&self, identity: &str) -> &[String] {
        let identity = if identity.is_empty() {
            ANONYMOUS_IDENTITY
        } else {
            identity
        };
        self.entries.get(identity).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn allows(&self, identity: &str, topic: &str) -> bool {
        self.patterns(identity)
            .iter()
            .any(|pattern| topic_matches(topic, pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_level_wildcard() {
        assert!(topic_matches("a/b/c", "a/+/c"));
        assert!(!topic_matches("a/b/b/c", "a/+/c"));
        assert!(topic_matches("sensors/1/temp", "sensors/+/temp"));
        assert!(!topic_matches("sensors/1/2/temp", "sensors/+/temp"));
        assert!(!topic_matches("sensors/temp", "sensors/+/temp"));
    }

    #[test]
    fn test_multi_level_wildcard() {
        assert!(topic_matches("a/b/c", "a/#"));
        assert!(topic_matches("a", "a/#"));
        assert!(topic_matches("admin/x/y", "admin/#"));
        assert!(topic_matches("anything/at/all", "#"));
        assert!(!topic_matches("b/c", "a/#"));
    }

    #[test]
    fn test_levels_after_multi_level_wildcard() {
        assert!(!topic_matches("a/public/x", "a/#/secret"));
        assert!(!topic_matches("a/b/secret", "a/#/secret"));
        assert!(!topic_matches("y/z", "#/x"));
        assert!(!topic_matches("x", "#/x"));

        assert!(is_valid_pattern("a/#"));
        assert!(is_valid_pattern("#"));
        assert!(is_valid_pattern("a/+/c"));
        assert!(!is_valid_pattern("a/#/secret"));
        assert!(!is_valid_pattern("#/x"));
    }

    #[test]
    fn test_exhausted_levels() {
        assert!(topic_matches("a/b", "a/b"));
        assert!(!topic_matches("a/b", "a/b/c"));
        assert!(!topic_matches("a/b/c", "a/b"));
    }

    #[test]
    fn test_acl_table() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "alice".to_owned(),
            vec!["sensors/+/temp".to_owned(), "admin/#".to_owned()],
        );
        entries.insert(ANONYMOUS_IDENTITY.to_owned(), vec!["public/#".to_owned()]);
        let table = AclTable::new(&entries);

        assert!(table.allows("alice", "sensors/1/temp"));
        assert!(table.allows("alice", "admin/x/y"));
        assert!(!table.allows("alice", "public/news"));
        assert!(table.allows("", "public/news"));
        assert!(!table.allows("mallory", "public/news"));
    }
}
