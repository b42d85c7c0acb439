use async_trait::async_trait;
use peerloop_core::AppResult;
use peerloop_domain::UserId;

use super::projections::DirectoryUser;

/// Read-only lookup into the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Looks up a user by identifier.
    async fn find_user(&self, id: UserId) -> AppResult<Option<DirectoryUser>>;

    /// Lists users ordered by display name, optionally filtered by a
    /// case-insensitive name or email substring, capped at `limit` rows.
    async fn search_users(
        &self,
        search: Option<&str>,
        limit: usize,
    ) -> AppResult<Vec<DirectoryUser>>;
}
