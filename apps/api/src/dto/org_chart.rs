mod conversions;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Incoming payload for area creation and rename.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/upsert-area-request.ts"
)]
pub struct UpsertAreaRequest {
    pub name: String,
}

/// Incoming payload for position creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/create-position-request.ts"
)]
pub struct CreatePositionRequest {
    pub name: String,
    pub area_id: Uuid,
    pub parent_position_id: Option<Uuid>,
}

/// Incoming payload for position updates.
///
/// `parent_position_id` distinguishes "absent" (leave the parent alone)
/// from an explicit `null` (detach into a forest root).
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/update-position-request.ts"
)]
pub struct UpdatePositionRequest {
    pub name: Option<String>,
    pub area_id: Option<Uuid>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[ts(as = "Option<Uuid>")]
    pub parent_position_id: Option<Option<Uuid>>,
}

/// Deserializes a present field (including an explicit `null`) as
/// `Some(..)`; serde's `default` covers the absent case.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}

/// Cap on position ids accepted by a single assignment replacement.
pub const MAX_POSITION_IDS_PER_REPLACEMENT: usize = 50;

/// Incoming payload for wholesale assignment replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/replace-user-positions-request.ts"
)]
pub struct ReplaceUserPositionsRequest {
    #[serde(default)]
    pub position_ids: Vec<Uuid>,
}

/// Query parameters for the position listing.
#[derive(Debug, Deserialize)]
pub struct ListPositionsQuery {
    pub area_id: Option<Uuid>,
}

/// Query parameters for the assignment user picker.
#[derive(Debug, Deserialize)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

/// API representation of an area.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/area-response.ts"
)]
pub struct AreaResponse {
    pub id: Uuid,
    pub name: String,
}

/// Area identifier and name nested inside position payloads.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/area-summary-response.ts"
)]
pub struct AreaSummaryResponse {
    pub id: Uuid,
    pub name: String,
}

/// Position identifier and name nested as a parent reference.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/position-ref-response.ts"
)]
pub struct PositionRefResponse {
    pub id: Uuid,
    pub name: String,
}

/// API representation of a position with display context.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/position-response.ts"
)]
pub struct PositionResponse {
    pub id: Uuid,
    pub name: String,
    pub area: AreaSummaryResponse,
    pub parent: Option<PositionRefResponse>,
    pub assigned_user_count: u64,
}

/// Area with its nested positions for the administrative listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/area-with-positions-response.ts"
)]
pub struct AreaWithPositionsResponse {
    pub id: Uuid,
    pub name: String,
    pub positions: Vec<PositionResponse>,
}

/// API representation of a directory user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/directory-user-response.ts"
)]
pub struct DirectoryUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// API representation of a user-position assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/assignment-response.ts"
)]
pub struct AssignmentResponse {
    pub position: PositionRefResponse,
    pub area: AreaSummaryResponse,
    pub assigned_at: String,
}

/// A user with their current assignments.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/user-positions-response.ts"
)]
pub struct UserPositionsResponse {
    pub user: DirectoryUserResponse,
    pub assignments: Vec<AssignmentResponse>,
}

/// One node of the rendered hierarchy forest.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/tree-node-response.ts"
)]
pub struct TreeNodeResponse {
    pub id: Uuid,
    pub name: String,
    pub area: AreaSummaryResponse,
    pub parent_position_id: Option<Uuid>,
    pub assigned_users: Vec<DirectoryUserResponse>,
    pub children: Vec<TreeNodeResponse>,
}
