mod common;
mod org_chart;

pub use common::HealthResponse;
pub use org_chart::{
    AreaResponse, AreaSummaryResponse, AreaWithPositionsResponse, AssignmentResponse,
    CreatePositionRequest, DirectoryUserResponse, ListPositionsQuery,
    MAX_POSITION_IDS_PER_REPLACEMENT, PositionRefResponse, PositionResponse,
    ReplaceUserPositionsRequest, TreeNodeResponse, UpdatePositionRequest, UpsertAreaRequest,
    UserPositionsResponse, UserSearchQuery,
};
