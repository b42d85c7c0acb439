use peerloop_domain::{AreaId, PositionId, UserId};

/// Area identifier and name for display alongside a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaSummary {
    /// Stable area identifier.
    pub id: AreaId,
    /// Area name.
    pub name: String,
}

/// Position identifier and name for display as a parent reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRef {
    /// Stable position identifier.
    pub id: PositionId,
    /// Position name.
    pub name: String,
}

/// Position projection with display context and assignment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDetail {
    /// Stable position identifier.
    pub id: PositionId,
    /// Position name.
    pub name: String,
    /// Owning area.
    pub area: AreaSummary,
    /// Parent position, when the position is not a forest root.
    pub parent: Option<PositionRef>,
    /// Number of users currently assigned to the position.
    pub assigned_user_count: u64,
}

/// Area with its positions, for the administrative listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaWithPositions {
    /// Stable area identifier.
    pub id: AreaId,
    /// Area name.
    pub name: String,
    /// Positions owned by the area, ordered by name.
    pub positions: Vec<PositionDetail>,
}

/// Parent-pointer edge used for closure computation and cycle checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionEdge {
    /// Position identifier.
    pub id: PositionId,
    /// Parent position identifier; `None` marks a forest root.
    pub parent_position_id: Option<PositionId>,
}

/// Position with its currently assigned users, for tree assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionWithUsers {
    /// Stable position identifier.
    pub id: PositionId,
    /// Position name.
    pub name: String,
    /// Owning area.
    pub area: AreaSummary,
    /// Parent position identifier; `None` marks a forest root.
    pub parent_position_id: Option<PositionId>,
    /// Users currently holding the position.
    pub assigned_users: Vec<DirectoryUser>,
}

/// User projection from the external user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUser {
    /// Stable user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Primary email address.
    pub email: String,
}

/// A user's assignment to a position, enriched for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDetail {
    /// Assigned position.
    pub position: PositionRef,
    /// Area owning the assigned position.
    pub area: AreaSummary,
    /// Assignment timestamp in RFC3339.
    pub assigned_at: String,
}

/// A user together with their current position assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPositionsView {
    /// The user the assignments belong to.
    pub user: DirectoryUser,
    /// Assignments ordered by area name then position name.
    pub assignments: Vec<AssignmentDetail>,
}
