use async_trait::async_trait;
use peerloop_core::AppResult;
use peerloop_domain::{Area, AreaId, Position, PositionId, UserId};

use super::projections::{
    AssignmentDetail, DirectoryUser, PositionDetail, PositionEdge, PositionWithUsers,
};

/// Durable store for areas, positions and user-position assignments.
///
/// Implementations surface duplicate-name writes as `AppError::Conflict`;
/// existence checks belong to the engine, which reads before it writes.
#[async_trait]
pub trait OrgChartRepository: Send + Sync {
    /// Inserts a new area.
    async fn insert_area(&self, area: Area) -> AppResult<()>;

    /// Updates an existing area.
    async fn update_area(&self, area: Area) -> AppResult<()>;

    /// Deletes an area. The engine guards against remaining positions first.
    async fn delete_area(&self, id: AreaId) -> AppResult<()>;

    /// Looks up an area by identifier.
    async fn find_area(&self, id: AreaId) -> AppResult<Option<Area>>;

    /// Lists all areas ordered by name.
    async fn list_areas(&self) -> AppResult<Vec<Area>>;

    /// Counts positions owned by an area.
    async fn count_positions_in_area(&self, id: AreaId) -> AppResult<u64>;

    /// Inserts a new position.
    async fn insert_position(&self, position: Position) -> AppResult<()>;

    /// Updates an existing position (rename, area move, reparent).
    async fn update_position(&self, position: Position) -> AppResult<()>;

    /// Deletes a position together with its user assignments.
    async fn delete_position(&self, id: PositionId) -> AppResult<()>;

    /// Looks up a position by identifier.
    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>>;

    /// Looks up the display projection of a single position.
    async fn find_position_detail(&self, id: PositionId) -> AppResult<Option<PositionDetail>>;

    /// Lists position projections, optionally filtered by area, ordered by
    /// area name then position name.
    async fn list_position_details(
        &self,
        area_id: Option<AreaId>,
    ) -> AppResult<Vec<PositionDetail>>;

    /// Lists every parent-pointer edge in the forest.
    async fn list_position_edges(&self) -> AppResult<Vec<PositionEdge>>;

    /// Counts positions whose parent is the given position.
    async fn count_child_positions(&self, id: PositionId) -> AppResult<u64>;

    /// Lists every position with its assigned users, ordered by area name
    /// then position name.
    async fn list_positions_with_users(&self) -> AppResult<Vec<PositionWithUsers>>;

    /// Counts how many of the given position ids exist.
    async fn count_existing_positions(&self, ids: &[PositionId]) -> AppResult<u64>;

    /// Lists the position ids a user is directly assigned to.
    async fn list_assigned_position_ids(&self, user_id: UserId) -> AppResult<Vec<PositionId>>;

    /// Replaces a user's assignment set as one atomic unit: delete all
    /// current assignments, then insert the given set.
    async fn replace_user_positions(
        &self,
        user_id: UserId,
        position_ids: Vec<PositionId>,
    ) -> AppResult<()>;

    /// Lists a user's assignments enriched with position and area, ordered
    /// by area name then position name.
    async fn list_user_assignments(&self, user_id: UserId) -> AppResult<Vec<AssignmentDetail>>;

    /// Lists users assigned to any of the given positions. May contain the
    /// same user once per held position; the engine deduplicates.
    async fn list_users_in_positions(
        &self,
        position_ids: &[PositionId],
    ) -> AppResult<Vec<DirectoryUser>>;
}
