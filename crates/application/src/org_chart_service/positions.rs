use peerloop_core::{AppError, AppResult};
use peerloop_domain::{AreaId, Position, PositionId};

use crate::org_chart_ports::{CreatePositionInput, PositionDetail, UpdatePositionInput};

use super::{OrgChartService, closure};

impl OrgChartService {
    /// Creates a position under an area, optionally under a parent.
    ///
    /// No cycle check is needed here: a brand-new node cannot be an
    /// ancestor of anything yet.
    pub async fn create_position(&self, input: CreatePositionInput) -> AppResult<PositionDetail> {
        self.require_area_exists(input.area_id).await?;

        if let Some(parent_id) = input.parent_position_id {
            self.require_position_exists(parent_id).await?;
        }

        let position = Position::new(
            PositionId::new(),
            input.name,
            input.area_id,
            input.parent_position_id,
        )?;

        self.repository.insert_position(position.clone()).await?;
        self.require_position_detail(position.id()).await
    }

    /// Renames, moves or reparents a position.
    ///
    /// A parent change is validated against the current forest snapshot:
    /// self-parenting and cycle-forming moves are rejected before anything
    /// is written.
    pub async fn update_position(
        &self,
        id: PositionId,
        input: UpdatePositionInput,
    ) -> AppResult<PositionDetail> {
        let current = self.require_position_exists(id).await?;

        let area_id = match input.area_id {
            Some(area_id) => self.require_area_exists(area_id).await?.id(),
            None => current.area_id(),
        };

        let parent_position_id = match input.parent_position_id {
            Some(Some(parent_id)) => {
                self.require_position_exists(parent_id).await?;

                let edges = self.repository.list_position_edges().await?;
                closure::ensure_reparent_keeps_forest(&edges, id, parent_id)?;

                Some(parent_id)
            }
            Some(None) => None,
            None => current.parent_position_id(),
        };

        let name = match input.name {
            Some(name) => name,
            None => current.name().as_str().to_owned(),
        };

        let position = Position::new(id, name, area_id, parent_position_id)?;
        self.repository.update_position(position).await?;
        self.require_position_detail(id).await
    }

    /// Deletes a position once nothing reports into it.
    ///
    /// Positions with children are rejected; callers reparent or delete
    /// the children first. The position's user assignments are removed
    /// with it.
    pub async fn delete_position(&self, id: PositionId) -> AppResult<()> {
        self.require_position_exists(id).await?;

        let child_count = self.repository.count_child_positions(id).await?;
        if child_count > 0 {
            return Err(AppError::Conflict(
                "position still has child positions".to_owned(),
            ));
        }

        self.repository.delete_position(id).await
    }

    /// Lists positions with display context, optionally filtered by area,
    /// ordered by area name then position name.
    pub async fn list_positions(
        &self,
        area_id: Option<AreaId>,
    ) -> AppResult<Vec<PositionDetail>> {
        if let Some(area_id) = area_id {
            self.require_area_exists(area_id).await?;
        }

        self.repository.list_position_details(area_id).await
    }

    pub(super) async fn require_position_exists(&self, id: PositionId) -> AppResult<Position> {
        self.repository
            .find_position(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("position '{id}' does not exist")))
    }

    async fn require_position_detail(&self, id: PositionId) -> AppResult<PositionDetail> {
        self.repository
            .find_position_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("position '{id}' does not exist")))
    }
}
