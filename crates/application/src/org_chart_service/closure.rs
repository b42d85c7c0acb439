//! Closure computation over the position forest.
//!
//! All functions operate on the flat parent-pointer edge list loaded from
//! the position store; nothing here touches a port. Walks are explicit
//! loops bounded by the total position count so corrupted data (a
//! pre-existing cycle from a bad migration) surfaces as an error instead
//! of hanging the request.

use std::collections::{HashMap, HashSet};

use peerloop_core::{AppError, AppResult};
use peerloop_domain::PositionId;

use crate::org_chart_ports::PositionEdge;

/// Positions strictly below any of the starting positions, at any depth.
///
/// Breadth-first frontier expansion: each step collects every position
/// whose parent is in the current frontier, the frontier becomes exactly
/// the newly collected set, and the walk stops when a step adds nothing.
pub(super) fn descendant_position_ids(
    edges: &[PositionEdge],
    start: &HashSet<PositionId>,
) -> HashSet<PositionId> {
    let mut collected = HashSet::new();
    let mut frontier = start.clone();

    while !frontier.is_empty() {
        let mut next = HashSet::new();
        for edge in edges {
            if let Some(parent_id) = edge.parent_position_id
                && frontier.contains(&parent_id)
                && collected.insert(edge.id)
            {
                next.insert(edge.id);
            }
        }
        frontier = next;
    }

    collected
}

/// Positions strictly above any of the starting positions.
///
/// Each starting position contributes its single upward parent chain; the
/// result is the union of the chains. A chain stops as soon as it reaches
/// a root or merges into an already-walked chain.
pub(super) fn ancestor_position_ids(
    edges: &[PositionEdge],
    start: &HashSet<PositionId>,
) -> AppResult<HashSet<PositionId>> {
    let parent_by_id = parent_index(edges);
    let mut ancestors = HashSet::new();

    for position_id in start {
        let mut chain = HashSet::from([*position_id]);
        let mut cursor = parent_by_id.get(position_id).copied().flatten();
        let mut steps = 0usize;

        while let Some(current) = cursor {
            if !chain.insert(current) || steps > edges.len() {
                return Err(AppError::Internal(
                    "position hierarchy is corrupted: parent chain exceeds the position count"
                        .to_owned(),
                ));
            }

            if !ancestors.insert(current) {
                // Merged into a chain already walked from another position.
                break;
            }

            steps += 1;
            cursor = parent_by_id.get(&current).copied().flatten();
        }
    }

    Ok(ancestors)
}

/// Validates that reparenting `moving` under `proposed_parent` keeps the
/// forest acyclic.
///
/// Walks upward from the proposed parent with a visited set seeded with the
/// moving position's id; revisiting any identifier means the move would
/// close a cycle. The walk is capped by the total position count.
pub(super) fn ensure_reparent_keeps_forest(
    edges: &[PositionEdge],
    moving: PositionId,
    proposed_parent: PositionId,
) -> AppResult<()> {
    if proposed_parent == moving {
        return Err(AppError::Conflict(
            "a position cannot be its own parent".to_owned(),
        ));
    }

    let parent_by_id = parent_index(edges);
    let mut visited = HashSet::from([moving]);
    let mut cursor = Some(proposed_parent);
    let mut steps = 0usize;

    while let Some(current) = cursor {
        if !visited.insert(current) {
            return Err(AppError::Conflict(
                "moving the position under that parent would create a cycle".to_owned(),
            ));
        }

        steps += 1;
        if steps > edges.len() {
            return Err(AppError::Internal(
                "position hierarchy is corrupted: parent walk exceeds the position count"
                    .to_owned(),
            ));
        }

        cursor = parent_by_id.get(&current).copied().flatten();
    }

    Ok(())
}

fn parent_index(edges: &[PositionEdge]) -> HashMap<PositionId, Option<PositionId>> {
    edges
        .iter()
        .map(|edge| (edge.id, edge.parent_position_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn edge(id: PositionId, parent: Option<PositionId>) -> PositionEdge {
        PositionEdge {
            id,
            parent_position_id: parent,
        }
    }

    /// root -> mid -> leaf
    fn chain() -> (PositionId, PositionId, PositionId, Vec<PositionEdge>) {
        let root = PositionId::new();
        let mid = PositionId::new();
        let leaf = PositionId::new();
        let edges = vec![
            edge(root, None),
            edge(mid, Some(root)),
            edge(leaf, Some(mid)),
        ];
        (root, mid, leaf, edges)
    }

    #[test]
    fn leaf_has_full_ancestor_chain_and_no_descendants() {
        let (root, mid, leaf, edges) = chain();
        let start = HashSet::from([leaf]);

        let ancestors = ancestor_position_ids(&edges, &start).unwrap_or_default();
        assert_eq!(ancestors, HashSet::from([mid, root]));

        assert!(descendant_position_ids(&edges, &start).is_empty());
    }

    #[test]
    fn root_has_full_descendant_set_and_no_ancestors() {
        let (root, mid, leaf, edges) = chain();
        let start = HashSet::from([root]);

        assert!(
            ancestor_position_ids(&edges, &start)
                .unwrap_or_default()
                .is_empty()
        );
        assert_eq!(
            descendant_position_ids(&edges, &start),
            HashSet::from([mid, leaf])
        );
    }

    #[test]
    fn ancestors_of_two_unrelated_leaves_union_without_duplicates() {
        let (root_a, _, leaf_a, mut edges) = chain();
        let root_b = PositionId::new();
        let leaf_b = PositionId::new();
        edges.push(edge(root_b, None));
        edges.push(edge(leaf_b, Some(root_b)));

        let start = HashSet::from([leaf_a, leaf_b]);
        let ancestors = ancestor_position_ids(&edges, &start).unwrap_or_default();

        assert!(ancestors.contains(&root_a));
        assert!(ancestors.contains(&root_b));
        assert_eq!(ancestors.len(), 3);
    }

    #[test]
    fn empty_start_set_yields_empty_closures() {
        let (_, _, _, edges) = chain();
        let start = HashSet::new();

        assert!(descendant_position_ids(&edges, &start).is_empty());
        assert!(
            ancestor_position_ids(&edges, &start)
                .unwrap_or_default()
                .is_empty()
        );
    }

    #[test]
    fn reparent_under_own_descendant_is_rejected() {
        let (root, mid, leaf, edges) = chain();

        assert!(matches!(
            ensure_reparent_keeps_forest(&edges, root, leaf),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            ensure_reparent_keeps_forest(&edges, mid, leaf),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn reparent_to_self_is_rejected() {
        let (root, _, _, edges) = chain();
        assert!(matches!(
            ensure_reparent_keeps_forest(&edges, root, root),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn reparent_between_unrelated_subtrees_is_accepted() {
        let (_, _, leaf_a, mut edges) = chain();
        let root_b = PositionId::new();
        edges.push(edge(root_b, None));

        assert!(ensure_reparent_keeps_forest(&edges, root_b, leaf_a).is_ok());
    }

    #[test]
    fn corrupted_cycle_surfaces_as_internal_error_for_ancestors() {
        let first = PositionId::new();
        let second = PositionId::new();
        let edges = vec![edge(first, Some(second)), edge(second, Some(first))];

        let outsider = PositionId::new();
        let mut with_outsider = edges.clone();
        with_outsider.push(edge(outsider, Some(first)));

        // The chain from the outsider runs into the corrupted loop.
        let result = ancestor_position_ids(&with_outsider, &HashSet::from([outsider]));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    proptest! {
        /// Any permutation of valid reparent operations keeps every upward
        /// walk terminating: each node's chain reaches a root within the
        /// node-count bound.
        #[test]
        fn accepted_reparents_preserve_the_forest_invariant(
            parent_choices in proptest::collection::vec(0usize..12, 12),
        ) {
            let ids: Vec<PositionId> = (0..12).map(|_| PositionId::new()).collect();
            let mut edges: Vec<PositionEdge> =
                ids.iter().map(|id| edge(*id, None)).collect();

            for (index, choice) in parent_choices.iter().enumerate() {
                let moving = ids[index];
                let proposed = ids[*choice];

                if ensure_reparent_keeps_forest(&edges, moving, proposed).is_ok() {
                    edges[index].parent_position_id = Some(proposed);
                }
            }

            let all: HashSet<PositionId> = ids.iter().copied().collect();
            prop_assert!(ancestor_position_ids(&edges, &all).is_ok());

            for id in &ids {
                let ancestors =
                    ancestor_position_ids(&edges, &HashSet::from([*id])).unwrap_or_default();
                prop_assert!(!ancestors.contains(id));
            }
        }
    }
}
