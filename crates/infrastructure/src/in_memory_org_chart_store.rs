use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use peerloop_application::{
    AreaSummary, AssignmentDetail, DirectoryUser, OrgChartRepository, PositionDetail,
    PositionEdge, PositionRef, PositionWithUsers, UserDirectory,
};
use peerloop_core::{AppError, AppResult};
use peerloop_domain::{Area, AreaId, Position, PositionId, UserId};
use tokio::sync::RwLock;

/// In-memory position store and user directory.
///
/// Backs tests and local development; mirrors the ordering and conflict
/// contract of the Postgres adapters.
#[derive(Debug, Default)]
pub struct InMemoryOrgChartStore {
    areas: RwLock<HashMap<AreaId, Area>>,
    positions: RwLock<HashMap<PositionId, Position>>,
    assignments: RwLock<Vec<AssignmentRecord>>,
    users: RwLock<HashMap<UserId, DirectoryUser>>,
}

#[derive(Debug, Clone)]
struct AssignmentRecord {
    user_id: UserId,
    position_id: PositionId,
    assigned_at: DateTime<Utc>,
}

impl InMemoryOrgChartStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a directory user; development seeding only.
    pub async fn upsert_user(&self, user: DirectoryUser) {
        self.users.write().await.insert(user.id, user);
    }

    async fn position_detail(&self, position: &Position) -> PositionDetail {
        let areas = self.areas.read().await;
        let positions = self.positions.read().await;
        let assignments = self.assignments.read().await;

        let parent = position.parent_position_id().and_then(|parent_id| {
            positions.get(&parent_id).map(|parent| PositionRef {
                id: parent.id(),
                name: parent.name().as_str().to_owned(),
            })
        });

        PositionDetail {
            id: position.id(),
            name: position.name().as_str().to_owned(),
            area: AreaSummary {
                id: position.area_id(),
                name: areas
                    .get(&position.area_id())
                    .map(|area| area.name().as_str().to_owned())
                    .unwrap_or_default(),
            },
            parent,
            assigned_user_count: assignments
                .iter()
                .filter(|record| record.position_id == position.id())
                .count() as u64,
        }
    }
}

#[async_trait]
impl OrgChartRepository for InMemoryOrgChartStore {
    async fn insert_area(&self, area: Area) -> AppResult<()> {
        let mut areas = self.areas.write().await;

        if areas
            .values()
            .any(|existing| existing.name() == area.name())
        {
            return Err(AppError::Conflict(format!(
                "area name '{}' already exists",
                area.name().as_str()
            )));
        }

        areas.insert(area.id(), area);
        Ok(())
    }

    async fn update_area(&self, area: Area) -> AppResult<()> {
        let mut areas = self.areas.write().await;

        if areas
            .values()
            .any(|existing| existing.id() != area.id() && existing.name() == area.name())
        {
            return Err(AppError::Conflict(format!(
                "area name '{}' already exists",
                area.name().as_str()
            )));
        }

        areas.insert(area.id(), area);
        Ok(())
    }

    async fn delete_area(&self, id: AreaId) -> AppResult<()> {
        self.areas.write().await.remove(&id);
        Ok(())
    }

    async fn find_area(&self, id: AreaId) -> AppResult<Option<Area>> {
        Ok(self.areas.read().await.get(&id).cloned())
    }

    async fn list_areas(&self) -> AppResult<Vec<Area>> {
        let areas = self.areas.read().await;
        let mut listed: Vec<Area> = areas.values().cloned().collect();
        listed.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));
        Ok(listed)
    }

    async fn count_positions_in_area(&self, id: AreaId) -> AppResult<u64> {
        let positions = self.positions.read().await;
        Ok(positions
            .values()
            .filter(|position| position.area_id() == id)
            .count() as u64)
    }

    async fn insert_position(&self, position: Position) -> AppResult<()> {
        let mut positions = self.positions.write().await;

        if positions.values().any(|existing| {
            existing.area_id() == position.area_id() && existing.name() == position.name()
        }) {
            return Err(AppError::Conflict(format!(
                "position name '{}' already exists in the area",
                position.name().as_str()
            )));
        }

        positions.insert(position.id(), position);
        Ok(())
    }

    async fn update_position(&self, position: Position) -> AppResult<()> {
        let mut positions = self.positions.write().await;

        if positions.values().any(|existing| {
            existing.id() != position.id()
                && existing.area_id() == position.area_id()
                && existing.name() == position.name()
        }) {
            return Err(AppError::Conflict(format!(
                "position name '{}' already exists in the area",
                position.name().as_str()
            )));
        }

        positions.insert(position.id(), position);
        Ok(())
    }

    async fn delete_position(&self, id: PositionId) -> AppResult<()> {
        self.positions.write().await.remove(&id);
        self.assignments
            .write()
            .await
            .retain(|record| record.position_id != id);
        Ok(())
    }

    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>> {
        Ok(self.positions.read().await.get(&id).cloned())
    }

    async fn find_position_detail(&self, id: PositionId) -> AppResult<Option<PositionDetail>> {
        let position = self.positions.read().await.get(&id).cloned();
        match position {
            Some(position) => Ok(Some(self.position_detail(&position).await)),
            None => Ok(None),
        }
    }

    async fn list_position_details(
        &self,
        area_id: Option<AreaId>,
    ) -> AppResult<Vec<PositionDetail>> {
        let filtered: Vec<Position> = {
            let positions = self.positions.read().await;
            positions
                .values()
                .filter(|position| area_id.is_none_or(|area_id| position.area_id() == area_id))
                .cloned()
                .collect()
        };

        let mut listed = Vec::with_capacity(filtered.len());
        for position in &filtered {
            listed.push(self.position_detail(position).await);
        }

        listed.sort_by(|left, right| {
            left.area
                .name
                .cmp(&right.area.name)
                .then_with(|| left.name.cmp(&right.name))
        });

        Ok(listed)
    }

    async fn list_position_edges(&self) -> AppResult<Vec<PositionEdge>> {
        let positions = self.positions.read().await;
        Ok(positions
            .values()
            .map(|position| PositionEdge {
                id: position.id(),
                parent_position_id: position.parent_position_id(),
            })
            .collect())
    }

    async fn count_child_positions(&self, id: PositionId) -> AppResult<u64> {
        let positions = self.positions.read().await;
        Ok(positions
            .values()
            .filter(|position| position.parent_position_id() == Some(id))
            .count() as u64)
    }

    async fn list_positions_with_users(&self) -> AppResult<Vec<PositionWithUsers>> {
        let areas = self.areas.read().await;
        let positions = self.positions.read().await;
        let assignments = self.assignments.read().await;
        let users = self.users.read().await;

        let mut listed: Vec<PositionWithUsers> = positions
            .values()
            .map(|position| {
                let mut assigned_users: Vec<DirectoryUser> = assignments
                    .iter()
                    .filter(|record| record.position_id == position.id())
                    .filter_map(|record| users.get(&record.user_id).cloned())
                    .collect();
                assigned_users.sort_by(|left, right| left.name.cmp(&right.name));

                PositionWithUsers {
                    id: position.id(),
                    name: position.name().as_str().to_owned(),
                    area: AreaSummary {
                        id: position.area_id(),
                        name: areas
                            .get(&position.area_id())
                            .map(|area| area.name().as_str().to_owned())
                            .unwrap_or_default(),
                    },
                    parent_position_id: position.parent_position_id(),
                    assigned_users,
                }
            })
            .collect();

        listed.sort_by(|left, right| {
            left.area
                .name
                .cmp(&right.area.name)
                .then_with(|| left.name.cmp(&right.name))
        });

        Ok(listed)
    }

    async fn count_existing_positions(&self, ids: &[PositionId]) -> AppResult<u64> {
        let positions = self.positions.read().await;
        Ok(ids.iter().filter(|id| positions.contains_key(id)).count() as u64)
    }

    async fn list_assigned_position_ids(&self, user_id: UserId) -> AppResult<Vec<PositionId>> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .iter()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.position_id)
            .collect())
    }

    async fn replace_user_positions(
        &self,
        user_id: UserId,
        position_ids: Vec<PositionId>,
    ) -> AppResult<()> {
        let mut assignments = self.assignments.write().await;
        let assigned_at = Utc::now();

        assignments.retain(|record| record.user_id != user_id);
        assignments.extend(position_ids.into_iter().map(|position_id| AssignmentRecord {
            user_id,
            position_id,
            assigned_at,
        }));

        Ok(())
    }

    async fn list_user_assignments(&self, user_id: UserId) -> AppResult<Vec<AssignmentDetail>> {
        let areas = self.areas.read().await;
        let positions = self.positions.read().await;
        let assignments = self.assignments.read().await;

        let mut listed: Vec<AssignmentDetail> = assignments
            .iter()
            .filter(|record| record.user_id == user_id)
            .filter_map(|record| {
                positions.get(&record.position_id).map(|position| {
                    AssignmentDetail {
                        position: PositionRef {
                            id: position.id(),
                            name: position.name().as_str().to_owned(),
                        },
                        area: AreaSummary {
                            id: position.area_id(),
                            name: areas
                                .get(&position.area_id())
                                .map(|area| area.name().as_str().to_owned())
                                .unwrap_or_default(),
                        },
                        assigned_at: record.assigned_at.to_rfc3339(),
                    }
                })
            })
            .collect();

        listed.sort_by(|left, right| {
            left.area
                .name
                .cmp(&right.area.name)
                .then_with(|| left.position.name.cmp(&right.position.name))
        });

        Ok(listed)
    }

    async fn list_users_in_positions(
        &self,
        position_ids: &[PositionId],
    ) -> AppResult<Vec<DirectoryUser>> {
        let assignments = self.assignments.read().await;
        let users = self.users.read().await;

        Ok(assignments
            .iter()
            .filter(|record| position_ids.contains(&record.position_id))
            .filter_map(|record| users.get(&record.user_id).cloned())
            .collect())
    }
}

#[async_trait]
impl UserDirectory for InMemoryOrgChartStore {
    async fn find_user(&self, id: UserId) -> AppResult<Option<DirectoryUser>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn search_users(
        &self,
        search: Option<&str>,
        limit: usize,
    ) -> AppResult<Vec<DirectoryUser>> {
        let users = self.users.read().await;
        let needle = search.map(str::to_lowercase);

        let mut listed: Vec<DirectoryUser> = users
            .values()
            .filter(|user| {
                needle.as_deref().is_none_or(|needle| {
                    user.name.to_lowercase().contains(needle)
                        || user.email.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect();

        listed.sort_by(|left, right| left.name.cmp(&right.name));
        listed.truncate(limit);
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use peerloop_application::{CreatePositionInput, OrgChartService};

    use super::*;

    #[tokio::test]
    async fn engine_closure_queries_run_against_the_store() {
        let store = Arc::new(InMemoryOrgChartStore::new());
        let engine = OrgChartService::new(store.clone(), store.clone());

        let area = engine
            .create_area("Engineering")
            .await
            .map(|area| area.id())
            .unwrap_or_else(|error| panic!("area setup failed: {error}"));

        let cto = engine
            .create_position(CreatePositionInput {
                name: "CTO".to_owned(),
                area_id: area,
                parent_position_id: None,
            })
            .await
            .map(|detail| detail.id)
            .unwrap_or_else(|error| panic!("position setup failed: {error}"));
        let engineer = engine
            .create_position(CreatePositionInput {
                name: "Engineer".to_owned(),
                area_id: area,
                parent_position_id: Some(cto),
            })
            .await
            .map(|detail| detail.id)
            .unwrap_or_else(|error| panic!("position setup failed: {error}"));

        let boss = UserId::new();
        let report = UserId::new();
        store
            .upsert_user(DirectoryUser {
                id: boss,
                name: "Dana".to_owned(),
                email: "dana@example.com".to_owned(),
            })
            .await;
        store
            .upsert_user(DirectoryUser {
                id: report,
                name: "Uma".to_owned(),
                email: "uma@example.com".to_owned(),
            })
            .await;

        assert!(engine.replace_user_positions(boss, vec![cto]).await.is_ok());
        assert!(
            engine
                .replace_user_positions(report, vec![engineer])
                .await
                .is_ok()
        );

        let leaders = engine
            .users_in_ancestor_positions(report)
            .await
            .unwrap_or_default();
        let reports = engine
            .users_in_descendant_positions(boss)
            .await
            .unwrap_or_default();

        assert_eq!(leaders.len(), 1);
        assert_eq!(leaders.first().map(|user| user.name.as_str()), Some("Dana"));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports.first().map(|user| user.name.as_str()), Some("Uma"));
    }

    #[tokio::test]
    async fn duplicate_area_name_is_a_conflict() {
        let store = InMemoryOrgChartStore::new();

        let first = Area::new(AreaId::new(), "Engineering").unwrap_or_else(|error| {
            panic!("area fixture failed: {error}");
        });
        let second = Area::new(AreaId::new(), "Engineering").unwrap_or_else(|error| {
            panic!("area fixture failed: {error}");
        });

        assert!(store.insert_area(first).await.is_ok());
        assert!(matches!(
            store.insert_area(second).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn same_position_name_is_allowed_across_areas() {
        let store = InMemoryOrgChartStore::new();

        let engineering = AreaId::new();
        let sales = AreaId::new();
        let first = Position::new(PositionId::new(), "Lead", engineering, None)
            .unwrap_or_else(|error| panic!("position fixture failed: {error}"));
        let second = Position::new(PositionId::new(), "Lead", sales, None)
            .unwrap_or_else(|error| panic!("position fixture failed: {error}"));

        assert!(store.insert_position(first).await.is_ok());
        assert!(store.insert_position(second).await.is_ok());
    }

    #[tokio::test]
    async fn replacing_assignments_is_atomic_per_user() {
        let store = InMemoryOrgChartStore::new();
        let user = UserId::new();
        let other = UserId::new();
        let position = PositionId::new();

        assert!(
            store
                .replace_user_positions(other, vec![position])
                .await
                .is_ok()
        );
        assert!(
            store
                .replace_user_positions(user, vec![position])
                .await
                .is_ok()
        );
        assert!(store.replace_user_positions(user, vec![]).await.is_ok());

        let cleared = store
            .list_assigned_position_ids(user)
            .await
            .unwrap_or_default();
        assert!(cleared.is_empty());

        let untouched = store
            .list_assigned_position_ids(other)
            .await
            .unwrap_or_default();
        assert_eq!(untouched, vec![position]);
    }
}
