use super::*;

impl PostgresOrgChartRepository {
    pub(super) async fn insert_area_impl(&self, area: Area) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO org_areas (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(area.id().as_uuid())
        .bind(area.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                &format!("area name '{}' already exists", area.name().as_str()),
            )
        })?;

        Ok(())
    }

    pub(super) async fn update_area_impl(&self, area: Area) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE org_areas
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(area.id().as_uuid())
        .bind(area.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            map_write_error(
                error,
                &format!("area name '{}' already exists", area.name().as_str()),
            )
        })?;

        Ok(())
    }

    pub(super) async fn delete_area_impl(&self, id: AreaId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM org_areas
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete area '{id}': {error}")))?;

        Ok(())
    }

    pub(super) async fn find_area_impl(&self, id: AreaId) -> AppResult<Option<Area>> {
        let row = sqlx::query_as::<_, AreaRow>(
            r#"
            SELECT id, name
            FROM org_areas
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find area '{id}': {error}")))?;

        row.map(AreaRow::into_area).transpose()
    }

    pub(super) async fn list_areas_impl(&self) -> AppResult<Vec<Area>> {
        let rows = sqlx::query_as::<_, AreaRow>(
            r#"
            SELECT id, name
            FROM org_areas
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list areas: {error}")))?;

        rows.into_iter().map(AreaRow::into_area).collect()
    }

    pub(super) async fn count_positions_in_area_impl(&self, id: AreaId) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM org_positions
            WHERE area_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to count positions in area '{id}': {error}"
            ))
        })?;

        Ok(count.max(0) as u64)
    }
}
