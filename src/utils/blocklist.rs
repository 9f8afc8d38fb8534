use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Process-wide set of revoked token identifiers (`jti` claims).
///
/// Entries are added on logout and consulted on every authenticated request.
/// The set is append-only and shared by all request tasks; revocation is
/// best-effort against requests already past validation. Entries live for
/// the remainder of the process: there is no TTL or cleanup, so long-lived
/// processes accumulate revoked ids indefinitely.
#[derive(Clone, Debug, Default)]
pub struct TokenBlocklist {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl TokenBlocklist {
    /// Returns `false` when the id was already revoked.
    pub fn revoke(&self, jti: &str) -> bool {
        self.revoked
            .write()
            .expect("blocklist lock poisoned")
            .insert(jti.to_string())
    }

    pub fn contains(&self, jti: &str) -> bool {
        self.revoked
            .read()
            .expect("blocklist lock poisoned")
            .contains(jti)
    }

    pub fn len(&self) -> usize {
        self.revoked.read().expect("blocklist lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_ids_are_remembered() {
        let blocklist = TokenBlocklist::default();
        assert!(!blocklist.contains("abc"));

        blocklist.revoke("abc");
        assert!(blocklist.contains("abc"));
        assert!(!blocklist.contains("def"));
    }

    #[test]
    fn revoke_is_idempotent() {
        let blocklist = TokenBlocklist::default();
        assert!(blocklist.revoke("abc"));
        assert!(!blocklist.revoke("abc"));
        assert_eq!(blocklist.len(), 1);
    }

    #[test]
    fn clones_share_the_same_set() {
        let blocklist = TokenBlocklist::default();
        let other = blocklist.clone();

        blocklist.revoke("abc");
        assert!(other.contains("abc"));
    }
}
