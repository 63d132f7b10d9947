//! Mock session validator for testing.
//!
//! Avoids signing real tokens in handler and router tests.
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_user("valid-token", user)
//!     .with_admin("admin-token", "admin-1");
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all validations.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a customer with generated name and email.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        let user = Self::test_user(user_id, UserRole::Customer);
        self.with_user(token, user)
    }

    /// Adds a valid token for an administrator.
    pub fn with_admin(self, token: impl Into<String>, user_id: &str) -> Self {
        let user = Self::test_user(user_id, UserRole::Admin);
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    fn test_user(user_id: &str, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new(user_id).expect("test user id"),
            format!("Test User {}", user_id),
            format!("{}@test.example.com", user_id),
            role,
        )
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
