use summer_core::UserId;

/// Identity of the caller, taken from a verified bearer token.
///
/// Inserted by [`crate::middleware::auth_middleware`] on every protected route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
