//! The organizational hierarchy engine.
//!
//! Maintains the area/position forest and the user-position assignments,
//! and answers the structural queries that gate the org chart and the
//! "who is above/below whom" permission checks elsewhere in the system.
//!
//! The engine is stateless between calls: every operation loads the slice
//! of the forest it needs from the position store, computes in memory and
//! persists the result.

mod areas;
mod assignments;
mod closure;
mod positions;
mod queries;
mod tree;


use std::sync::Arc;

use crate::org_chart_ports::{OrgChartRepository, UserDirectory};

pub use tree::PositionTreeNode;

/// Maximum number of rows returned by the assignment user picker.
const USER_SEARCH_LIMIT: usize = 100;

/// Application service for the organizational hierarchy.
#[derive(Clone)]
pub struct OrgChartService {
    repository: Arc<dyn OrgChartRepository>,
    user_directory: Arc<dyn UserDirectory>,
}

impl OrgChartService {
    /// Creates the engine from its port implementations.
    #[must_use]
    pub fn new(
        repository: Arc<dyn OrgChartRepository>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            repository,
            user_directory,
        }
    }
}
