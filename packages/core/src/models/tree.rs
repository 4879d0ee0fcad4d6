//! Category Forest Construction
//!
//! The store returns categories as a list with parent pointers. This module
//! materializes that list into an immutable forest snapshot:
//!
//! - parent -> children links are built explicitly
//! - `level` is derived from ancestry (1 for roots, parent + 1 below),
//!   overriding whatever the wire carried - the level column is display
//!   data, never an input
//! - structural defects (duplicate ids, dangling parents, cycles) fail the
//!   whole build rather than producing a partially-linked tree
//!
//! Snapshots are never mutated in place. After every store mutation the
//! caller re-fetches and rebuilds, which keeps stale-response handling
//! trivial: an old snapshot is simply dropped.

use std::collections::{BTreeMap, HashMap, VecDeque};

use thiserror::Error;

use super::category::{CategoryId, CategoryNode};

/// Structural errors detected while building the forest
#[derive(Error, Debug)]
pub enum TreeError {
    /// Two records carried the same id
    #[error("Duplicate category id: {id}")]
    DuplicateId { id: CategoryId },

    /// A record references a parent that is not in the list
    #[error("Category {id} references unknown parent {parent_id}")]
    UnknownParent {
        id: CategoryId,
        parent_id: CategoryId,
    },

    /// A parent chain never reaches a root
    #[error("Cycle detected in category hierarchy involving {id}")]
    CycleDetected { id: CategoryId },
}

/// Build the category forest from a flat node list.
///
/// Input nodes are flat (their `children` vectors are ignored); output nodes
/// have `children` populated and `level` recomputed from ancestry. Siblings
/// are ordered by `sort_order`, then by id for a stable tie-break.
///
/// # Errors
///
/// Fails on duplicate ids, parents missing from the list, and parent chains
/// that never terminate at a root. No partial forest is ever returned.
pub fn build_forest(nodes: Vec<CategoryNode>) -> Result<Vec<CategoryNode>, TreeError> {
    let total = nodes.len();
    let mut by_id: HashMap<CategoryId, CategoryNode> = HashMap::with_capacity(total);
    let mut child_ids: BTreeMap<CategoryId, Vec<CategoryId>> = BTreeMap::new();
    let mut root_ids: Vec<CategoryId> = Vec::new();

    for mut node in nodes {
        node.children.clear();
        let id = node.id;
        match node.parent_id {
            None => root_ids.push(id),
            Some(parent_id) => child_ids.entry(parent_id).or_default().push(id),
        }
        if by_id.insert(id, node).is_some() {
            return Err(TreeError::DuplicateId { id });
        }
    }

    for (&parent_id, ids) in &child_ids {
        if !by_id.contains_key(&parent_id) {
            return Err(TreeError::UnknownParent {
                id: ids[0],
                parent_id,
            });
        }
    }

    // Breadth-first from the roots, deriving levels as we go. Anything left
    // unvisited afterwards sits on a parent chain that never reaches a root.
    let mut levels: HashMap<CategoryId, u32> = HashMap::with_capacity(total);
    let mut queue: VecDeque<CategoryId> = VecDeque::new();
    for &id in &root_ids {
        levels.insert(id, 1);
        queue.push_back(id);
    }
    let mut order: Vec<CategoryId> = Vec::with_capacity(total);
    while let Some(id) = queue.pop_front() {
        order.push(id);
        let level = levels[&id];
        if let Some(children) = child_ids.get(&id) {
            for &child_id in children {
                levels.insert(child_id, level + 1);
                queue.push_back(child_id);
            }
        }
    }
    if order.len() < total {
        let stranded = by_id
            .keys()
            .filter(|id| !levels.contains_key(id))
            .min()
            .copied()
            .expect("at least one unvisited node");
        return Err(TreeError::CycleDetected { id: stranded });
    }

    // Assemble bottom-up: children are complete before their parent takes them
    let mut built: HashMap<CategoryId, CategoryNode> = HashMap::with_capacity(total);
    for &id in order.iter().rev() {
        let mut node = by_id.remove(&id).expect("visited node present");
        let declared = node.level;
        node.level = levels[&id];
        if declared != 0 && declared != node.level {
            tracing::warn!(
                "Category {} declared level {} but sits at depth {}; using derived value",
                id,
                declared,
                node.level
            );
        }
        let mut children: Vec<CategoryNode> = child_ids
            .get(&id)
            .map(|ids| {
                ids.iter()
                    .map(|cid| built.remove(cid).expect("child built before parent"))
                    .collect()
            })
            .unwrap_or_default();
        children.sort_by_key(|c| (c.sort_order, c.id));
        node.children = children;
        built.insert(id, node);
    }

    let mut forest: Vec<CategoryNode> = root_ids
        .iter()
        .map(|id| built.remove(id).expect("root built"))
        .collect();
    forest.sort_by_key(|n| (n.sort_order, n.id));
    Ok(forest)
}

/// Depth-first lookup of a node anywhere in the forest.
pub fn find_node(forest: &[CategoryNode], id: CategoryId) -> Option<&CategoryNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Flatten the forest depth-first for table display.
pub fn flatten_forest(forest: &[CategoryNode]) -> Vec<&CategoryNode> {
    let mut rows = Vec::new();
    fn walk<'a>(nodes: &'a [CategoryNode], out: &mut Vec<&'a CategoryNode>) {
        for node in nodes {
            out.push(node);
            walk(&node.children, out);
        }
    }
    walk(forest, &mut rows);
    rows
}
