use peerloop_domain::Area;

use super::{
    AreaResponse, AreaSummaryResponse, AreaWithPositionsResponse, AssignmentResponse,
    DirectoryUserResponse, PositionRefResponse, PositionResponse, TreeNodeResponse,
    UserPositionsResponse,
};

impl From<Area> for AreaResponse {
    fn from(value: Area) -> Self {
        Self {
            id: value.id().as_uuid(),
            name: value.name().as_str().to_owned(),
        }
    }
}

impl From<peerloop_application::AreaSummary> for AreaSummaryResponse {
    fn from(value: peerloop_application::AreaSummary) -> Self {
        Self {
            id: value.id.as_uuid(),
            name: value.name,
        }
    }
}

impl From<peerloop_application::PositionRef> for PositionRefResponse {
    fn from(value: peerloop_application::PositionRef) -> Self {
        Self {
            id: value.id.as_uuid(),
            name: value.name,
        }
    }
}

impl From<peerloop_application::PositionDetail> for PositionResponse {
    fn from(value: peerloop_application::PositionDetail) -> Self {
        Self {
            id: value.id.as_uuid(),
            name: value.name,
            area: value.area.into(),
            parent: value.parent.map(PositionRefResponse::from),
            assigned_user_count: value.assigned_user_count,
        }
    }
}

impl From<peerloop_application::AreaWithPositions> for AreaWithPositionsResponse {
    fn from(value: peerloop_application::AreaWithPositions) -> Self {
        Self {
            id: value.id.as_uuid(),
            name: value.name,
            positions: value
                .positions
                .into_iter()
                .map(PositionResponse::from)
                .collect(),
        }
    }
}

impl From<peerloop_application::DirectoryUser> for DirectoryUserResponse {
    fn from(value: peerloop_application::DirectoryUser) -> Self {
        Self {
            id: value.id.as_uuid(),
            name: value.name,
            email: value.email,
        }
    }
}

impl From<peerloop_application::AssignmentDetail> for AssignmentResponse {
    fn from(value: peerloop_application::AssignmentDetail) -> Self {
        Self {
            position: value.position.into(),
            area: value.area.into(),
            assigned_at: value.assigned_at,
        }
    }
}

impl From<peerloop_application::UserPositionsView> for UserPositionsResponse {
    fn from(value: peerloop_application::UserPositionsView) -> Self {
        Self {
            user: value.user.into(),
            assignments: value
                .assignments
                .into_iter()
                .map(AssignmentResponse::from)
                .collect(),
        }
    }
}

impl From<peerloop_application::PositionTreeNode> for TreeNodeResponse {
    fn from(value: peerloop_application::PositionTreeNode) -> Self {
        Self {
            id: value.id.as_uuid(),
            name: value.name,
            area: value.area.into(),
            parent_position_id: value
                .parent_position_id
                .map(|position_id| position_id.as_uuid()),
            assigned_users: value
                .assigned_users
                .into_iter()
                .map(DirectoryUserResponse::from)
                .collect(),
            children: value
                .children
                .into_iter()
                .map(TreeNodeResponse::from)
                .collect(),
        }
    }
}
