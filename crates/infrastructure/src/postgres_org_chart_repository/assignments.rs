use super::*;

impl PostgresOrgChartRepository {
    pub(super) async fn list_assigned_position_ids_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<PositionId>> {
        let rows = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT position_id
            FROM user_org_positions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list assignments for user '{user_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(PositionId::from_uuid).collect())
    }

    /// Delete-all-then-insert-set inside one transaction, so no concurrent
    /// reader observes a partially replaced assignment set.
    pub(super) async fn replace_user_positions_impl(
        &self,
        user_id: UserId,
        position_ids: Vec<PositionId>,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        sqlx::query(
            r#"
            DELETE FROM user_org_positions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to clear assignments for user '{user_id}': {error}"
            ))
        })?;

        for position_id in position_ids {
            sqlx::query(
                r#"
                INSERT INTO user_org_positions (user_id, position_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(user_id.as_uuid())
            .bind(position_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to assign position '{position_id}' to user '{user_id}': {error}"
                ))
            })?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit assignment replacement: {error}"))
        })
    }

    pub(super) async fn list_user_assignments_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<AssignmentDetail>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT
                positions.id AS position_id,
                positions.name AS position_name,
                areas.id AS area_id,
                areas.name AS area_name,
                links.assigned_at
            FROM user_org_positions AS links
            INNER JOIN org_positions AS positions
                ON positions.id = links.position_id
            INNER JOIN org_areas AS areas
                ON areas.id = positions.area_id
            WHERE links.user_id = $1
            ORDER BY areas.name, positions.name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list assignments for user '{user_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(AssignmentDetail::from).collect())
    }

    pub(super) async fn list_users_in_positions_impl(
        &self,
        position_ids: &[PositionId],
    ) -> AppResult<Vec<DirectoryUser>> {
        #[derive(Debug, FromRow)]
        struct LinkedUserRow {
            id: Uuid,
            name: String,
            email: String,
        }

        let uuids: Vec<Uuid> = position_ids.iter().map(PositionId::as_uuid).collect();

        let rows = sqlx::query_as::<_, LinkedUserRow>(
            r#"
            SELECT users.id, users.name, users.email
            FROM user_org_positions AS links
            INNER JOIN users
                ON users.id = links.user_id
            WHERE links.position_id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list users in positions: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| DirectoryUser {
                id: UserId::from_uuid(row.id),
                name: row.name,
                email: row.email,
            })
            .collect())
    }
}
