use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Identity of the sole administrator account. The first registered user
/// receives id 1 and with it the admin role.
pub const ADMIN_USER_ID: i64 = 1;

/// Role resolved from a user identity at token-issue time.
///
/// Roles are derived, never stored: the admin claim embedded in a token is
/// always computed from the identity through [`Role::for_user`], so there is
/// no second place where admin status could be mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Standard,
}

impl Role {
    pub fn for_user(user_id: i64) -> Self {
        if user_id == ADMIN_USER_ID {
            Role::Admin
        } else {
            Role::Standard
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A registered user. The password hash never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Internal row shape for credential checks; never serialized.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i64,
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_designated_identity_is_admin() {
        assert_eq!(Role::for_user(ADMIN_USER_ID), Role::Admin);
        assert_eq!(Role::for_user(2), Role::Standard);
        assert_eq!(Role::for_user(0), Role::Standard);
        assert_eq!(Role::for_user(-1), Role::Standard);
    }

    #[test]
    fn is_admin_follows_the_role() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Standard.is_admin());
    }
}
