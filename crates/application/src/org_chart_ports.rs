//! Ports consumed by the hierarchy engine.
//!
//! The position store and the user directory are external collaborators;
//! these traits are the whole contract the engine holds with them.

mod directory;
mod inputs;
mod projections;
mod repository;

pub use directory::UserDirectory;
pub use inputs::{CreatePositionInput, UpdatePositionInput};
pub use projections::{
    AreaSummary, AreaWithPositions, AssignmentDetail, DirectoryUser, PositionDetail, PositionEdge,
    PositionRef, PositionWithUsers, UserPositionsView,
};
pub use repository::OrgChartRepository;
