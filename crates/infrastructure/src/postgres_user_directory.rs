use async_trait::async_trait;
use peerloop_application::{DirectoryUser, UserDirectory};
use peerloop_core::{AppError, AppResult};
use peerloop_domain::UserId;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed lookup into the user directory table maintained by
/// the auth service.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
}

impl From<UserRow> for DirectoryUser {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, id: UserId) -> AppResult<Option<DirectoryUser>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user '{id}': {error}")))?;

        Ok(row.map(DirectoryUser::from))
    }

    async fn search_users(
        &self,
        search: Option<&str>,
        limit: usize,
    ) -> AppResult<Vec<DirectoryUser>> {
        let pattern = search.map(|fragment| format!("%{}%", escape_like(fragment)));

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE $1::text IS NULL
               OR name ILIKE $1
               OR email ILIKE $1
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to search users: {error}")))?;

        Ok(rows.into_iter().map(DirectoryUser::from).collect())
    }
}

/// Escapes LIKE wildcards in a user-supplied search fragment.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
