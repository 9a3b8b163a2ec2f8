//! Tri-state decisions and the values checks return.

use std::fmt;

use crate::challenge::SignatureKind;

/// Outcome of a single check or of a whole chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Decision {
    Permit,
    Deny,
    /// The check does not apply; defer to the next one.
    Indeterminate,
}

impl Decision {
    pub fn from_bool(permit: bool) -> Self {
        if permit { Decision::Permit } else { Decision::Deny }
    }

    pub fn is_permit(self) -> bool {
        self == Decision::Permit
    }

    pub fn is_final(self) -> bool {
        self != Decision::Indeterminate
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Permit => "permit",
            Decision::Deny => "deny",
            Decision::Indeterminate => "indeterminate",
        };
        f.write_str(label)
    }
}

/// What a check returns: its decision plus, for signature logins, the scheme
/// that verified.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub decision: Decision,
    pub scheme: Option<SignatureKind>,
}

impl Verdict {
    pub const PERMIT: Verdict = Verdict::new(Decision::Permit);
    pub const DENY: Verdict = Verdict::new(Decision::Deny);
    pub const INDETERMINATE: Verdict = Verdict::new(Decision::Indeterminate);

    pub const fn new(decision: Decision) -> Self {
        Self {
            decision,
            scheme: None,
        }
    }

    pub fn from_bool(permit: bool) -> Self {
        Self::new(Decision::from_bool(permit))
    }

    pub fn signed(scheme: SignatureKind) -> Self {
        Self {
            decision: Decision::Permit,
            scheme: Some(scheme),
        }
    }
}

/// Result of authenticating a session.
///
/// `scheme` is set only when a signature challenge permitted the session. The
/// broker keeps this value with the connection and passes it to every topic
/// authorization call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub decision: Decision,
    pub scheme: Option<SignatureKind>,
}

impl AuthResult {
    pub fn is_permit(&self) -> bool {
        self.decision.is_permit()
    }
}

impl From<Verdict> for AuthResult {
    fn from(verdict: Verdict) -> Self {
        let scheme = match verdict.decision {
            Decision::Permit => verdict.scheme,
            _ => None,
        };
        Self {
            decision: verdict.decision,
            scheme,
        }
    }
}
