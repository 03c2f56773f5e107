//! Identity data handed over by the authentication layer.

use serde::{Deserialize, Serialize};

/// Who an authenticated user is and what they may do.
///
/// Produced by whatever verifies logins; this crate never checks it. A
/// participant holds it behind an `Arc` so the account store and every
/// participant for that user share one read-only copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Account name.
    pub username: String,
    /// Contact address, if the account has one.
    pub email: Option<String>,
    /// Authorization role, e.g. `"user"` or `"admin"`.
    pub role: String,
}

impl Credential {
    /// Creates a credential for `username` with the default `"user"` role.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            role: "user".to_string(),
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns `true` if the role is `"admin"`.
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_user_role() {
        let cred = Credential::new("alice");
        assert_eq!(cred.username, "alice");
        assert_eq!(cred.role, "user");
        assert!(cred.email.is_none());
        assert!(!cred.is_admin());
    }

    #[test]
    fn test_builders_set_fields() {
        let cred = Credential::new("root")
            .with_role("admin")
            .with_email("root@example.org");
        assert!(cred.is_admin());
        assert_eq!(cred.email.as_deref(), Some("root@example.org"));
    }
}
