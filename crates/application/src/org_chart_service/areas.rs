use std::collections::HashMap;

use peerloop_core::{AppError, AppResult};
use peerloop_domain::{Area, AreaId};

use crate::org_chart_ports::AreaWithPositions;

use super::OrgChartService;

impl OrgChartService {
    /// Creates a new area with a validated, trimmed name.
    pub async fn create_area(&self, name: impl Into<String>) -> AppResult<Area> {
        let area = Area::new(AreaId::new(), name)?;
        self.repository.insert_area(area.clone()).await?;
        Ok(area)
    }

    /// Renames an existing area.
    pub async fn update_area(&self, id: AreaId, name: impl Into<String>) -> AppResult<Area> {
        self.require_area_exists(id).await?;

        let area = Area::new(id, name)?;
        self.repository.update_area(area.clone()).await?;
        Ok(area)
    }

    /// Deletes an area once no position references it.
    pub async fn delete_area(&self, id: AreaId) -> AppResult<()> {
        self.require_area_exists(id).await?;

        let position_count = self.repository.count_positions_in_area(id).await?;
        if position_count > 0 {
            return Err(AppError::Conflict(
                "area still has positions assigned".to_owned(),
            ));
        }

        self.repository.delete_area(id).await
    }

    /// Returns every area with its positions, ordered by area name then
    /// position name. Areas without positions are included.
    pub async fn list_areas_with_positions(&self) -> AppResult<Vec<AreaWithPositions>> {
        let areas = self.repository.list_areas().await?;
        let positions = self.repository.list_position_details(None).await?;

        let mut listed: Vec<AreaWithPositions> = areas
            .into_iter()
            .map(|area| AreaWithPositions {
                id: area.id(),
                name: area.name().as_str().to_owned(),
                positions: Vec::new(),
            })
            .collect();

        let slot_by_area: HashMap<AreaId, usize> = listed
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.id, slot))
            .collect();

        // Both reads are name-ordered, so grouping preserves the ordering.
        for position in positions {
            if let Some(entry) = slot_by_area
                .get(&position.area.id)
                .and_then(|slot| listed.get_mut(*slot))
            {
                entry.positions.push(position);
            }
        }

        Ok(listed)
    }

    pub(super) async fn require_area_exists(&self, id: AreaId) -> AppResult<Area> {
        self.repository
            .find_area(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("area '{id}' does not exist")))
    }
}
