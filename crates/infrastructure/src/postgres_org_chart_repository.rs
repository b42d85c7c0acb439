mod areas;
mod assignments;
mod positions;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use peerloop_application::{
    AreaSummary, AssignmentDetail, DirectoryUser, OrgChartRepository, PositionDetail,
    PositionEdge, PositionRef, PositionWithUsers,
};
use peerloop_core::{AppError, AppResult};
use peerloop_domain::{Area, AreaId, Position, PositionId, UserId};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed position store.
#[derive(Clone)]
pub struct PostgresOrgChartRepository {
    pool: PgPool,
}

impl PostgresOrgChartRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AreaRow {
    id: Uuid,
    name: String,
}

impl AreaRow {
    fn into_area(self) -> AppResult<Area> {
        Area::new(AreaId::from_uuid(self.id), self.name).map_err(|error| {
            AppError::Internal(format!("persisted area '{}' is invalid: {error}", self.id))
        })
    }
}

#[derive(Debug, FromRow)]
struct PositionRow {
    id: Uuid,
    name: String,
    area_id: Uuid,
    parent_position_id: Option<Uuid>,
}

impl PositionRow {
    fn into_position(self) -> AppResult<Position> {
        Position::new(
            PositionId::from_uuid(self.id),
            self.name,
            AreaId::from_uuid(self.area_id),
            self.parent_position_id.map(PositionId::from_uuid),
        )
        .map_err(|error| {
            AppError::Internal(format!(
                "persisted position '{}' is invalid: {error}",
                self.id
            ))
        })
    }
}

#[derive(Debug, FromRow)]
struct PositionDetailRow {
    id: Uuid,
    name: String,
    area_id: Uuid,
    area_name: String,
    parent_id: Option<Uuid>,
    parent_name: Option<String>,
    assigned_user_count: i64,
}

impl From<PositionDetailRow> for PositionDetail {
    fn from(row: PositionDetailRow) -> Self {
        let parent = match (row.parent_id, row.parent_name) {
            (Some(id), Some(name)) => Some(PositionRef {
                id: PositionId::from_uuid(id),
                name,
            }),
            _ => None,
        };

        Self {
            id: PositionId::from_uuid(row.id),
            name: row.name,
            area: AreaSummary {
                id: AreaId::from_uuid(row.area_id),
                name: row.area_name,
            },
            parent,
            assigned_user_count: row.assigned_user_count.max(0) as u64,
        }
    }
}

/// One row per (position, assigned user) pair; `user_*` columns are NULL
/// for positions nobody holds.
#[derive(Debug, FromRow)]
struct PositionUserRow {
    position_id: Uuid,
    position_name: String,
    area_id: Uuid,
    area_name: String,
    parent_position_id: Option<Uuid>,
    user_id: Option<Uuid>,
    user_name: Option<String>,
    user_email: Option<String>,
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    position_id: Uuid,
    position_name: String,
    area_id: Uuid,
    area_name: String,
    assigned_at: DateTime<Utc>,
}

impl From<AssignmentRow> for AssignmentDetail {
    fn from(row: AssignmentRow) -> Self {
        Self {
            position: PositionRef {
                id: PositionId::from_uuid(row.position_id),
                name: row.position_name,
            },
            area: AreaSummary {
                id: AreaId::from_uuid(row.area_id),
                name: row.area_name,
            },
            assigned_at: row.assigned_at.to_rfc3339(),
        }
    }
}

/// Maps a unique-constraint violation to `Conflict`, everything else to
/// `Internal`.
fn map_write_error(error: sqlx::Error, conflict_message: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(conflict_message.to_owned());
    }

    AppError::Internal(format!("org chart write failed: {error}"))
}

#[async_trait]
impl OrgChartRepository for PostgresOrgChartRepository {
    async fn insert_area(&self, area: Area) -> AppResult<()> {
        self.insert_area_impl(area).await
    }

    async fn update_area(&self, area: Area) -> AppResult<()> {
        self.update_area_impl(area).await
    }

    async fn delete_area(&self, id: AreaId) -> AppResult<()> {
        self.delete_area_impl(id).await
    }

    async fn find_area(&self, id: AreaId) -> AppResult<Option<Area>> {
        self.find_area_impl(id).await
    }

    async fn list_areas(&self) -> AppResult<Vec<Area>> {
        self.list_areas_impl().await
    }

    async fn count_positions_in_area(&self, id: AreaId) -> AppResult<u64> {
        self.count_positions_in_area_impl(id).await
    }

    async fn insert_position(&self, position: Position) -> AppResult<()> {
        self.insert_position_impl(position).await
    }

    async fn update_position(&self, position: Position) -> AppResult<()> {
        self.update_position_impl(position).await
    }

    async fn delete_position(&self, id: PositionId) -> AppResult<()> {
        self.delete_position_impl(id).await
    }

    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>> {
        self.find_position_impl(id).await
    }

    async fn find_position_detail(&self, id: PositionId) -> AppResult<Option<PositionDetail>> {
        self.find_position_detail_impl(id).await
    }

    async fn list_position_details(
        &self,
        area_id: Option<AreaId>,
    ) -> AppResult<Vec<PositionDetail>> {
        self.list_position_details_impl(area_id).await
    }

    async fn list_position_edges(&self) -> AppResult<Vec<PositionEdge>> {
        self.list_position_edges_impl().await
    }

    async fn count_child_positions(&self, id: PositionId) -> AppResult<u64> {
        self.count_child_positions_impl(id).await
    }

    async fn list_positions_with_users(&self) -> AppResult<Vec<PositionWithUsers>> {
        self.list_positions_with_users_impl().await
    }

    async fn count_existing_positions(&self, ids: &[PositionId]) -> AppResult<u64> {
        self.count_existing_positions_impl(ids).await
    }

    async fn list_assigned_position_ids(&self, user_id: UserId) -> AppResult<Vec<PositionId>> {
        self.list_assigned_position_ids_impl(user_id).await
    }

    async fn replace_user_positions(
        &self,
        user_id: UserId,
        position_ids: Vec<PositionId>,
    ) -> AppResult<()> {
        self.replace_user_positions_impl(user_id, position_ids)
            .await
    }

    async fn list_user_assignments(&self, user_id: UserId) -> AppResult<Vec<AssignmentDetail>> {
        self.list_user_assignments_impl(user_id).await
    }

    async fn list_users_in_positions(
        &self,
        position_ids: &[PositionId],
    ) -> AppResult<Vec<DirectoryUser>> {
        self.list_users_in_positions_impl(position_ids).await
    }
}
