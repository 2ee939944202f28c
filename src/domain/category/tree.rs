// src/domain/category/tree.rs
use std::collections::{HashMap, HashSet};

use super::entity::CategoryView;

/// Nesting bound for [`build_category_tree`]. Anything deeper is cut off.
pub const MAX_TREE_DEPTH: usize = 64;

/// Nest a flat category list under `parent_id`.
///
/// Siblings keep the order in which they appear in `items`. Categories whose
/// parent is not reachable from the anchor are dropped. Each id is emitted at
/// most once, so stored cycles and duplicate rows cannot make construction
/// loop or repeat a subtree.
pub fn build_category_tree(items: &[CategoryView], parent_id: i64) -> Vec<CategoryView> {
    let mut by_parent: HashMap<i64, Vec<&CategoryView>> = HashMap::new();
    for item in items {
        by_parent.entry(item.parent_id).or_default().push(item);
    }

    let mut visited = HashSet::from([parent_id]);
    attach_children(&by_parent, parent_id, 0, &mut visited)
}

fn attach_children(
    by_parent: &HashMap<i64, Vec<&CategoryView>>,
    parent_id: i64,
    depth: usize,
    visited: &mut HashSet<i64>,
) -> Vec<CategoryView> {
    if depth >= MAX_TREE_DEPTH {
        return Vec::new();
    }
    let Some(candidates) = by_parent.get(&parent_id) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !visited.insert(candidate.id) {
            continue;
        }
        let mut node = (*candidate).clone();
        node.children = attach_children(by_parent, candidate.id, depth + 1, visited);
        nodes.push(node);
    }
    nodes
}

/// Pre-order walk of a built tree with every `children` list emptied.
pub fn flatten_category_tree(roots: &[CategoryView]) -> Vec<CategoryView> {
    let mut flat = Vec::new();
    let mut stack: Vec<&CategoryView> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        stack.extend(node.children.iter().rev());
        flat.push(CategoryView {
            children: Vec::new(),
            ..node.clone()
        });
    }
    flat
}
