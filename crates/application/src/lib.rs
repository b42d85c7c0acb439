//! Application services and ports.

#![forbid(unsafe_code)]

mod org_chart_ports;
mod org_chart_service;

pub use org_chart_ports::{
    AreaSummary, AreaWithPositions, AssignmentDetail, CreatePositionInput, DirectoryUser,
    OrgChartRepository, PositionDetail, PositionEdge, PositionRef, PositionWithUsers,
    UpdatePositionInput, UserDirectory, UserPositionsView,
};
pub use org_chart_service::{OrgChartService, PositionTreeNode};
