//! Organizational chart entities.
//!
//! Areas group positions; positions form a forest through optional parent
//! links. The parent link is a weak reference by identifier, never an owned
//! subtree, so the structure stays serializable and cheap to clone.

use peerloop_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an organizational area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaId(Uuid);

impl AreaId {
    /// Creates a new random area identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an area identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AreaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Unique identifier for a position in the organizational forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId(Uuid);

impl PositionId {
    /// Creates a new random position identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a position identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Maximum length for area and position names.
const ORG_UNIT_NAME_MAX_LENGTH: usize = 120;

/// Validated name for an area or a position.
///
/// Trimmed on construction; must be non-empty and at most 120 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgUnitName(String);

impl OrgUnitName {
    /// Creates a validated, trimmed name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "name must not be empty or whitespace".to_owned(),
            ));
        }

        if trimmed.chars().count() > ORG_UNIT_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "name must not exceed {ORG_UNIT_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the validated name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<OrgUnitName> for String {
    fn from(value: OrgUnitName) -> Self {
        value.0
    }
}

/// A named grouping that owns a set of positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    id: AreaId,
    name: OrgUnitName,
}

impl Area {
    /// Creates an area with a validated name.
    pub fn new(id: AreaId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: OrgUnitName::new(name)?,
        })
    }

    /// Returns the area identifier.
    #[must_use]
    pub fn id(&self) -> AreaId {
        self.id
    }

    /// Returns the area name.
    #[must_use]
    pub fn name(&self) -> &OrgUnitName {
        &self.name
    }
}

/// A node in the organizational forest.
///
/// Invariant: a position never references itself as parent. The wider
/// no-cycle invariant needs the full edge set and is enforced by the
/// hierarchy engine on reparenting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    id: PositionId,
    name: OrgUnitName,
    area_id: AreaId,
    parent_position_id: Option<PositionId>,
}

impl Position {
    /// Creates a position with a validated name and parent link.
    pub fn new(
        id: PositionId,
        name: impl Into<String>,
        area_id: AreaId,
        parent_position_id: Option<PositionId>,
    ) -> AppResult<Self> {
        if parent_position_id == Some(id) {
            return Err(AppError::Conflict(
                "a position cannot be its own parent".to_owned(),
            ));
        }

        Ok(Self {
            id,
            name: OrgUnitName::new(name)?,
            area_id,
            parent_position_id,
        })
    }

    /// Returns the position identifier.
    #[must_use]
    pub fn id(&self) -> PositionId {
        self.id
    }

    /// Returns the position name.
    #[must_use]
    pub fn name(&self) -> &OrgUnitName {
        &self.name
    }

    /// Returns the owning area identifier.
    #[must_use]
    pub fn area_id(&self) -> AreaId {
        self.area_id
    }

    /// Returns the parent position identifier; `None` marks a forest root.
    #[must_use]
    pub fn parent_position_id(&self) -> Option<PositionId> {
        self.parent_position_id
    }
}
