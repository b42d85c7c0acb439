use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use peerloop_application::{CreatePositionInput, UpdatePositionInput};
use peerloop_core::AppError;
use peerloop_domain::{AreaId, PositionId, UserId};
use uuid::Uuid;

use crate::dto::{
    AreaResponse, AreaWithPositionsResponse, AssignmentResponse, CreatePositionRequest,
    DirectoryUserResponse, ListPositionsQuery, MAX_POSITION_IDS_PER_REPLACEMENT, PositionResponse,
    ReplaceUserPositionsRequest, TreeNodeResponse, UpdatePositionRequest, UpsertAreaRequest,
    UserPositionsResponse, UserSearchQuery,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_areas_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AreaWithPositionsResponse>>> {
    let areas = state
        .org_chart_service
        .list_areas_with_positions()
        .await?
        .into_iter()
        .map(AreaWithPositionsResponse::from)
        .collect();

    Ok(Json(areas))
}

pub async fn create_area_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpsertAreaRequest>,
) -> ApiResult<(StatusCode, Json<AreaResponse>)> {
    let area = state.org_chart_service.create_area(payload.name).await?;
    Ok((StatusCode::CREATED, Json(AreaResponse::from(area))))
}

pub async fn update_area_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertAreaRequest>,
) -> ApiResult<Json<AreaResponse>> {
    let area = state
        .org_chart_service
        .update_area(AreaId::from_uuid(id), payload.name)
        .await?;

    Ok(Json(AreaResponse::from(area)))
}

pub async fn delete_area_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .org_chart_service
        .delete_area(AreaId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_positions_handler(
    State(state): State<AppState>,
    Query(query): Query<ListPositionsQuery>,
) -> ApiResult<Json<Vec<PositionResponse>>> {
    let positions = state
        .org_chart_service
        .list_positions(query.area_id.map(AreaId::from_uuid))
        .await?
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Ok(Json(positions))
}

pub async fn create_position_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreatePositionRequest>,
) -> ApiResult<(StatusCode, Json<PositionResponse>)> {
    let position = state
        .org_chart_service
        .create_position(CreatePositionInput {
            name: payload.name,
            area_id: AreaId::from_uuid(payload.area_id),
            parent_position_id: payload.parent_position_id.map(PositionId::from_uuid),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PositionResponse::from(position))))
}

pub async fn update_position_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePositionRequest>,
) -> ApiResult<Json<PositionResponse>> {
    if payload.name.is_none()
        && payload.area_id.is_none()
        && payload.parent_position_id.is_none()
    {
        return Err(AppError::Validation("at least one field must be provided".to_owned()).into());
    }

    let position = state
        .org_chart_service
        .update_position(
            PositionId::from_uuid(id),
            UpdatePositionInput {
                name: payload.name,
                area_id: payload.area_id.map(AreaId::from_uuid),
                parent_position_id: payload
                    .parent_position_id
                    .map(|parent| parent.map(PositionId::from_uuid)),
            },
        )
        .await?;

    Ok(Json(PositionResponse::from(position)))
}

pub async fn delete_position_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .org_chart_service
        .delete_position(PositionId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> ApiResult<Json<Vec<DirectoryUserResponse>>> {
    let users = state
        .org_chart_service
        .list_users_for_assignment(query.search.as_deref())
        .await?
        .into_iter()
        .map(DirectoryUserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn get_user_positions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserPositionsResponse>> {
    let view = state
        .org_chart_service
        .get_user_positions(UserId::from_uuid(user_id))
        .await?;

    Ok(Json(view.into()))
}

pub async fn replace_user_positions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ReplaceUserPositionsRequest>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    if payload.position_ids.len() > MAX_POSITION_IDS_PER_REPLACEMENT {
        return Err(AppError::Validation(format!(
            "at most {MAX_POSITION_IDS_PER_REPLACEMENT} positions can be assigned at once"
        ))
        .into());
    }

    let assignments = state
        .org_chart_service
        .replace_user_positions(
            UserId::from_uuid(user_id),
            payload
                .position_ids
                .into_iter()
                .map(PositionId::from_uuid)
                .collect(),
        )
        .await?
        .into_iter()
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn hierarchy_tree_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TreeNodeResponse>>> {
    let forest = state
        .org_chart_service
        .hierarchy_tree()
        .await?
        .into_iter()
        .map(TreeNodeResponse::from)
        .collect();

    Ok(Json(forest))
}
