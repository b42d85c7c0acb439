//! Session contract with the external auth service.
//!
//! Login, logout and credential handling live in the auth service; it
//! writes the authenticated [`UserIdentity`] into the shared session store
//! under [`SESSION_USER_KEY`]. This API only reads it.

use peerloop_core::{AppError, AppResult, UserIdentity};
use peerloop_domain::UserId;
use uuid::Uuid;

/// Session key under which the auth service stores the identity.
pub const SESSION_USER_KEY: &str = "peerloop.user";

/// Resolves the directory user id from the session identity.
pub fn identity_user_id(identity: &UserIdentity) -> AppResult<UserId> {
    Uuid::parse_str(identity.subject())
        .map(UserId::from_uuid)
        .map_err(|error| {
            AppError::Unauthorized(format!("session carries an invalid user id: {error}"))
        })
}

#[cfg(test)]
mod tests {
    use peerloop_core::{UserIdentity, UserRole};

    use super::identity_user_id;

    #[test]
    fn valid_subject_resolves_to_user_id() {
        let identity = UserIdentity::new(
            "4b54b1a9-7a2a-4e6a-9dd7-6c2f0b6f2c11",
            "Dana",
            None,
            UserRole::Leader,
        );
        assert!(identity_user_id(&identity).is_ok());
    }

    #[test]
    fn malformed_subject_is_unauthorized() {
        let identity = UserIdentity::new("not-a-uuid", "Dana", None, UserRole::Employee);
        assert!(identity_user_id(&identity).is_err());
    }
}
