//! Hierarchy tree assembly for presentation.

use std::collections::{HashMap, HashSet};

use peerloop_core::AppResult;
use peerloop_domain::PositionId;

use crate::org_chart_ports::{AreaSummary, DirectoryUser, PositionWithUsers};

use super::OrgChartService;

/// A position node in the rendered hierarchy forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTreeNode {
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
    /// Child positions ordered by name.
    pub children: Vec<PositionTreeNode>,
}

impl OrgChartService {
    /// Builds the full hierarchy forest for rendering.
    ///
    /// Roots are ordered by area name then position name; children are
    /// ordered by name at every depth.
    pub async fn hierarchy_tree(&self) -> AppResult<Vec<PositionTreeNode>> {
        let positions = self.repository.list_positions_with_users().await?;
        Ok(assemble_forest(positions))
    }
}

/// Links the flat position list into a forest.
///
/// Index-first assembly: group children by parent id, then materialize
/// nodes from the roots down. A position whose parent is missing from the
/// loaded set is rendered as a root rather than dropped.
pub(super) fn assemble_forest(positions: Vec<PositionWithUsers>) -> Vec<PositionTreeNode> {
    let known_ids: HashSet<PositionId> = positions.iter().map(|position| position.id).collect();

    let mut roots = Vec::new();
    let mut children_by_parent: HashMap<PositionId, Vec<PositionWithUsers>> = HashMap::new();

    // The store returns positions ordered by (area name, position name),
    // which is exactly the required root ordering.
    for position in positions {
        match position.parent_position_id {
            Some(parent_id) if parent_id != position.id && known_ids.contains(&parent_id) => {
                children_by_parent
                    .entry(parent_id)
                    .or_default()
                    .push(position);
            }
            _ => roots.push(position),
        }
    }

    roots
        .into_iter()
        .map(|root| build_node(root, &mut children_by_parent))
        .collect()
}

fn build_node(
    position: PositionWithUsers,
    children_by_parent: &mut HashMap<PositionId, Vec<PositionWithUsers>>,
) -> PositionTreeNode {
    let mut child_positions = children_by_parent.remove(&position.id).unwrap_or_default();
    child_positions.sort_by(|left, right| left.name.cmp(&right.name));

    let children = child_positions
        .into_iter()
        .map(|child| build_node(child, children_by_parent))
        .collect();

    PositionTreeNode {
        id: position.id,
        name: position.name,
        area: position.area,
        parent_position_id: position.parent_position_id,
        assigned_users: position.assigned_users,
        children,
    }
}

#[cfg(test)]
mod tests {
    use peerloop_domain::AreaId;

    use super::*;

    fn position(
        name: &str,
        area_name: &str,
        area_id: AreaId,
        parent: Option<PositionId>,
    ) -> PositionWithUsers {
        PositionWithUsers {
            id: PositionId::new(),
            name: name.to_owned(),
            area: AreaSummary {
                id: area_id,
                name: area_name.to_owned(),
            },
            parent_position_id: parent,
            assigned_users: Vec::new(),
        }
    }

    fn count_nodes(nodes: &[PositionTreeNode]) -> usize {
        nodes
            .iter()
            .map(|node| 1 + count_nodes(&node.children))
            .sum()
    }

    #[test]
    fn every_position_appears_exactly_once() {
        let area = AreaId::new();
        let root = position("CTO", "Engineering", area, None);
        let mid = position("Team Lead", "Engineering", area, Some(root.id));
        let leaf_a = position("Engineer", "Engineering", area, Some(mid.id));
        let leaf_b = position("Designer", "Engineering", area, Some(mid.id));

        let forest = assemble_forest(vec![root, mid, leaf_a, leaf_b]);

        assert_eq!(forest.len(), 1);
        assert_eq!(count_nodes(&forest), 4);
    }

    #[test]
    fn children_are_sorted_by_name() {
        let area = AreaId::new();
        let root = position("CTO", "Engineering", area, None);
        let second = position("Platform Lead", "Engineering", area, Some(root.id));
        let first = position("App Lead", "Engineering", area, Some(root.id));

        let forest = assemble_forest(vec![root, second, first]);

        let names: Vec<&str> = forest[0]
            .children
            .iter()
            .map(|child| child.name.as_str())
            .collect();
        assert_eq!(names, vec!["App Lead", "Platform Lead"]);
    }

    #[test]
    fn missing_parent_renders_as_root() {
        let area = AreaId::new();
        let orphan = position("Stray", "Operations", area, Some(PositionId::new()));

        let forest = assemble_forest(vec![orphan]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].name, "Stray");
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn root_order_follows_input_order() {
        let engineering = AreaId::new();
        let sales = AreaId::new();
        // Input arrives ordered by (area name, position name).
        let first = position("CTO", "Engineering", engineering, None);
        let second = position("VP Sales", "Sales", sales, None);

        let forest = assemble_forest(vec![first, second]);

        let names: Vec<&str> = forest.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec!["CTO", "VP Sales"]);
    }
}
