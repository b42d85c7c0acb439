use std::collections::HashSet;

use peerloop_core::{AppError, AppResult};
use peerloop_domain::{PositionId, UserId};

use crate::org_chart_ports::{AssignmentDetail, DirectoryUser, UserPositionsView};

use super::OrgChartService;

impl OrgChartService {
    /// Returns a user together with their current assignments.
    pub async fn get_user_positions(&self, user_id: UserId) -> AppResult<UserPositionsView> {
        let user = self.require_user_exists(user_id).await?;
        let assignments = self.repository.list_user_assignments(user_id).await?;

        Ok(UserPositionsView { user, assignments })
    }

    /// Replaces a user's whole assignment set.
    ///
    /// The requested ids are deduplicated and must all resolve to real
    /// positions. The store applies the replacement as one atomic unit
    /// (delete all, insert the new set); an empty set clears every
    /// assignment. Returns the assignments after replacement.
    pub async fn replace_user_positions(
        &self,
        user_id: UserId,
        position_ids: Vec<PositionId>,
    ) -> AppResult<Vec<AssignmentDetail>> {
        self.require_user_exists(user_id).await?;

        let mut seen = HashSet::new();
        let unique_ids: Vec<PositionId> = position_ids
            .into_iter()
            .filter(|position_id| seen.insert(*position_id))
            .collect();

        if !unique_ids.is_empty() {
            let existing = self.repository.count_existing_positions(&unique_ids).await?;
            if existing != unique_ids.len() as u64 {
                return Err(AppError::NotFound(
                    "one or more positions do not exist".to_owned(),
                ));
            }
        }

        self.repository
            .replace_user_positions(user_id, unique_ids)
            .await?;

        self.repository.list_user_assignments(user_id).await
    }

    pub(super) async fn require_user_exists(&self, user_id: UserId) -> AppResult<DirectoryUser> {
        self.user_directory
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }
}
