use std::collections::HashSet;

use peerloop_core::AppResult;
use peerloop_domain::{PositionId, UserId};

use crate::org_chart_ports::DirectoryUser;

use super::{OrgChartService, USER_SEARCH_LIMIT, closure};

impl OrgChartService {
    /// Users assigned to positions strictly below any of the given user's
    /// positions — "people who report to me", at any depth.
    pub async fn users_in_descendant_positions(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DirectoryUser>> {
        let assigned = self.assigned_position_set(user_id).await?;
        if assigned.is_empty() {
            return Ok(Vec::new());
        }

        let edges = self.repository.list_position_edges().await?;
        let closure = closure::descendant_position_ids(&edges, &assigned);

        self.users_in_position_set(closure).await
    }

    /// Users assigned to positions strictly above any of the given user's
    /// positions — "my structural superiors".
    pub async fn users_in_ancestor_positions(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DirectoryUser>> {
        let assigned = self.assigned_position_set(user_id).await?;
        if assigned.is_empty() {
            return Ok(Vec::new());
        }

        let edges = self.repository.list_position_edges().await?;
        let closure = closure::ancestor_position_ids(&edges, &assigned)?;

        self.users_in_position_set(closure).await
    }

    /// Directory users for the assignment picker, filtered by an optional
    /// case-insensitive name or email fragment, ordered by name.
    pub async fn list_users_for_assignment(
        &self,
        search: Option<&str>,
    ) -> AppResult<Vec<DirectoryUser>> {
        let trimmed = search.map(str::trim).filter(|value| !value.is_empty());
        self.user_directory
            .search_users(trimmed, USER_SEARCH_LIMIT)
            .await
    }

    async fn assigned_position_set(&self, user_id: UserId) -> AppResult<HashSet<PositionId>> {
        let assigned = self.repository.list_assigned_position_ids(user_id).await?;
        Ok(assigned.into_iter().collect())
    }

    /// Resolves a closure to its users, deduplicated and name-sorted.
    async fn users_in_position_set(
        &self,
        position_ids: HashSet<PositionId>,
    ) -> AppResult<Vec<DirectoryUser>> {
        if position_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<PositionId> = position_ids.into_iter().collect();
        let linked = self.repository.list_users_in_positions(&ids).await?;

        let mut seen = HashSet::new();
        let mut users: Vec<DirectoryUser> = linked
            .into_iter()
            .filter(|user| seen.insert(user.id))
            .collect();

        users.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.email.cmp(&right.email))
        });

        Ok(users)
    }
}
