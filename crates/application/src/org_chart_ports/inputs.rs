use peerloop_domain::{AreaId, PositionId};

/// Input payload for creating a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePositionInput {
    /// Position name, validated and trimmed by the engine.
    pub name: String,
    /// Owning area.
    pub area_id: AreaId,
    /// Optional parent position.
    pub parent_position_id: Option<PositionId>,
}

/// Partial update payload for a position.
///
/// `parent_position_id` is tri-state: `None` leaves the parent untouched,
/// `Some(None)` detaches the position into a forest root, `Some(Some(id))`
/// reparents it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdatePositionInput {
    /// New position name, when renaming.
    pub name: Option<String>,
    /// New owning area, when moving between areas.
    pub area_id: Option<AreaId>,
    /// New parent link, when reparenting.
    pub parent_position_id: Option<Option<PositionId>>,
}
