//! JWT Claims model.

use serde::{Deserialize, Serialize};

use crate::constants::ROLE_ADMIN;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String, // user role (admin/user)
    pub exp: usize,   // expiration timestamp
    pub iat: usize,   // issued at timestamp
}

impl Claims {
    /// Check if the claims belong to an admin user
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Check if the claims carry one of `roles`
    pub fn has_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| *role == self.role)
    }

    /// Check if the claims belong to the specified user ID
    pub fn is_user(&self, user_id: &str) -> bool {
        self.sub == user_id
    }

    /// Check if the user can access a resource (either admin or owner)
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin() || self.is_user(owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROLE_USER;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: "64b000000000000000000001".to_string(),
            email: "someone@example.com".to_string(),
            role: role.to_string(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_roles() {
        assert!(claims(ROLE_ADMIN).is_admin());
        assert!(!claims(ROLE_USER).is_admin());
        assert!(claims(ROLE_USER).has_role(&[ROLE_ADMIN, ROLE_USER]));
        assert!(!claims(ROLE_USER).has_role(&[ROLE_ADMIN]));
    }

    #[test]
    fn test_can_access() {
        let user = claims(ROLE_USER);
        assert!(user.can_access("64b000000000000000000001"));
        assert!(!user.can_access("64b000000000000000000002"));
        assert!(claims(ROLE_ADMIN).can_access("64b000000000000000000002"));
    }
}
