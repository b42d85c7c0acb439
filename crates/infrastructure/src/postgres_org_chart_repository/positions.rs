use super::*;

const POSITION_DETAIL_SELECT: &str = r#"
    SELECT
        positions.id,
        positions.name,
        areas.id AS area_id,
        areas.name AS area_name,
        parents.id AS parent_id,
        parents.name AS parent_name,
        COUNT(links.user_id) AS assigned_user_count
    FROM org_positions AS positions
    INNER JOIN org_areas AS areas
        ON areas.id = positions.area_id
    LEFT JOIN org_positions AS parents
        ON parents.id = positions.parent_position_id
    LEFT JOIN user_org_positions AS links
        ON links.position_id = positions.id
"#;

impl PostgresOrgChartRepository {
    pub(super) async fn insert_position_impl(&self, position: Position) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO org_positions (id, name, area_id, parent_position_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(position.id().as_uuid())
        .bind(position.name().as_str())
        .bind(position.area_id().as_uuid())
        .bind(position.parent_position_id().map(|parent| parent.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                &format!(
                    "position name '{}' already exists in the area",
                    position.name().as_str()
                ),
            )
        })?;

        Ok(())
    }

    pub(super) async fn update_position_impl(&self, position: Position) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE org_positions
            SET name = $2, area_id = $3, parent_position_id = $4
            WHERE id = $1
            "#,
        )
        .bind(position.id().as_uuid())
        .bind(position.name().as_str())
        .bind(position.area_id().as_uuid())
        .bind(position.parent_position_id().map(|parent| parent.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                &format!(
                    "position name '{}' already exists in the area",
                    position.name().as_str()
                ),
            )
        })?;

        Ok(())
    }

    pub(super) async fn delete_position_impl(&self, id: PositionId) -> AppResult<()> {
        // Assignments cascade with the row; children are guarded by the
        // engine before this runs.
        sqlx::query(
            r#"
            DELETE FROM org_positions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete position '{id}': {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn find_position_impl(&self, id: PositionId) -> AppResult<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, name, area_id, parent_position_id
            FROM org_positions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find position '{id}': {error}"))
        })?;

        row.map(PositionRow::into_position).transpose()
    }

    pub(super) async fn find_position_detail_impl(
        &self,
        id: PositionId,
    ) -> AppResult<Option<PositionDetail>> {
        let query = format!(
            "{POSITION_DETAIL_SELECT} WHERE positions.id = $1 \
             GROUP BY positions.id, positions.name, areas.id, areas.name, parents.id, parents.name"
        );

        let row = sqlx::query_as::<_, PositionDetailRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to load position '{id}': {error}"))
            })?;

        Ok(row.map(PositionDetail::from))
    }

    pub(super) async fn list_position_details_impl(
        &self,
        area_id: Option<AreaId>,
    ) -> AppResult<Vec<PositionDetail>> {
        let filter = if area_id.is_some() {
            " WHERE positions.area_id = $1"
        } else {
            ""
        };
        let query = format!(
            "{POSITION_DETAIL_SELECT}{filter} \
             GROUP BY positions.id, positions.name, areas.id, areas.name, parents.id, parents.name \
             ORDER BY areas.name, positions.name"
        );

        let mut statement = sqlx::query_as::<_, PositionDetailRow>(&query);
        if let Some(area_id) = area_id {
            statement = statement.bind(area_id.as_uuid());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list positions: {error}")))?;

        Ok(rows.into_iter().map(PositionDetail::from).collect())
    }

    pub(super) async fn list_position_edges_impl(&self) -> AppResult<Vec<PositionEdge>> {
        #[derive(Debug, FromRow)]
        struct EdgeRow {
            id: Uuid,
            parent_position_id: Option<Uuid>,
        }

        let rows = sqlx::query_as::<_, EdgeRow>(
            r#"
            SELECT id, parent_position_id
            FROM org_positions
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list position edges: {error}"))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| PositionEdge {
                id: PositionId::from_uuid(row.id),
                parent_position_id: row.parent_position_id.map(PositionId::from_uuid),
            })
            .collect())
    }

    pub(super) async fn count_child_positions_impl(&self, id: PositionId) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM org_positions
            WHERE parent_position_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to count children of position '{id}': {error}"
            ))
        })?;

        Ok(count.max(0) as u64)
    }

    pub(super) async fn list_positions_with_users_impl(
        &self,
    ) -> AppResult<Vec<PositionWithUsers>> {
        let rows = sqlx::query_as::<_, PositionUserRow>(
            r#"
            SELECT
                positions.id AS position_id,
                positions.name AS position_name,
                areas.id AS area_id,
                areas.name AS area_name,
                positions.parent_position_id,
                users.id AS user_id,
                users.name AS user_name,
                users.email AS user_email
            FROM org_positions AS positions
            INNER JOIN org_areas AS areas
                ON areas.id = positions.area_id
            LEFT JOIN user_org_positions AS links
                ON links.position_id = positions.id
            LEFT JOIN users
                ON users.id = links.user_id
            ORDER BY areas.name, positions.name, users.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load the position forest: {error}"))
        })?;

        // One output entry per position, in row order; user columns fan out
        // one row per assignment.
        let mut listed: Vec<PositionWithUsers> = Vec::new();
        for row in rows {
            let position_id = PositionId::from_uuid(row.position_id);

            if listed.last().map(|entry| entry.id) != Some(position_id) {
                listed.push(PositionWithUsers {
                    id: position_id,
                    name: row.position_name,
                    area: AreaSummary {
                        id: AreaId::from_uuid(row.area_id),
                        name: row.area_name,
                    },
                    parent_position_id: row.parent_position_id.map(PositionId::from_uuid),
                    assigned_users: Vec::new(),
                });
            }

            if let (Some(user_id), Some(name), Some(email), Some(entry)) =
                (row.user_id, row.user_name, row.user_email, listed.last_mut())
            {
                entry.assigned_users.push(DirectoryUser {
                    id: UserId::from_uuid(user_id),
                    name,
                    email,
                });
            }
        }

        Ok(listed)
    }

    pub(super) async fn count_existing_positions_impl(
        &self,
        ids: &[PositionId],
    ) -> AppResult<u64> {
        let uuids: Vec<Uuid> = ids.iter().map(PositionId::as_uuid).collect();

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM org_positions
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to count requested positions: {error}"))
        })?;

        Ok(count.max(0) as u64)
    }
}
