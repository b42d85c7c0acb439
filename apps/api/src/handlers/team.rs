use axum::extract::State;
use axum::{Extension, Json};
use peerloop_core::UserIdentity;

use crate::auth::identity_user_id;
use crate::dto::DirectoryUserResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// People whose positions sit below the caller's in the hierarchy.
pub async fn employees_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<DirectoryUserResponse>>> {
    let user_id = identity_user_id(&user)?;
    let employees = state
        .org_chart_service
        .users_in_descendant_positions(user_id)
        .await?
        .into_iter()
        .map(DirectoryUserResponse::from)
        .collect();

    Ok(Json(employees))
}

/// People whose positions sit above the caller's in the hierarchy.
pub async fn leaders_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<DirectoryUserResponse>>> {
    let user_id = identity_user_id(&user)?;
    let leaders = state
        .org_chart_service
        .users_in_ancestor_positions(user_id)
        .await?
        .into_iter()
        .map(DirectoryUserResponse::from)
        .collect();

    Ok(Json(leaders))
}
