//! Flat category list to navigation forest.
//!
//! [`materialize_tree`] is what the reading pages render as the sidebar. It
//! never fails: referentially inconsistent input (a parent that is missing,
//! or a parent cycle) is repaired by promoting the affected nodes to roots.

use std::collections::HashMap;

use serde::Serialize;

use crate::category::{category_href, Category};
use crate::types::DbId;

/// A category with its navigation link and nested children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub href: String,
    pub children: Vec<CategoryNode>,
}

/// Assemble `categories` into a forest sorted by `sort_order` at every level.
///
/// Ties keep their input order. A node whose `parent_id` is not in the input
/// becomes a root. Nodes that are only reachable through a parent cycle are
/// entered at the first cycle member in input order, which becomes a root.
pub fn materialize_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let index: HashMap<DbId, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); categories.len()];
    let mut root_indices = Vec::new();

    for (i, category) in categories.iter().enumerate() {
        match category.parent_id.and_then(|pid| index.get(&pid)) {
            Some(&parent) if parent != i => children[parent].push(i),
            _ => root_indices.push(i),
        }
    }

    let mut visited = vec![false; categories.len()];
    let mut roots: Vec<CategoryNode> = root_indices
        .into_iter()
        .map(|i| build_node(i, categories, &children, &mut visited))
        .collect();

    for i in 0..categories.len() {
        if !visited[i] {
            roots.push(build_node(i, categories, &children, &mut visited));
        }
    }

    sort_level(&mut roots);
    roots
}

fn build_node(
    idx: usize,
    categories: &[Category],
    children: &[Vec<usize>],
    visited: &mut [bool],
) -> CategoryNode {
    visited[idx] = true;

    let mut nodes = Vec::with_capacity(children[idx].len());
    for &child in &children[idx] {
        if !visited[child] {
            nodes.push(build_node(child, categories, children, visited));
        }
    }
    sort_level(&mut nodes);

    let category = categories[idx].clone();
    CategoryNode {
        href: category_href(category.id),
        category,
        children: nodes,
    }
}

fn sort_level(nodes: &mut [CategoryNode]) {
    nodes.sort_by_key(|n| n.category.sort_order);
}

/// Pre-order flattening of a forest back into plain categories.
pub fn flatten_tree(nodes: &[CategoryNode]) -> Vec<Category> {
    let mut out = Vec::new();
    for node in nodes {
        collect(node, &mut out);
    }
    out
}

fn collect(node: &CategoryNode, out: &mut Vec<Category>) {
    out.push(node.category.clone());
    for child in &node.children {
        collect(child, out);
    }
}

/// Total number of nodes in a forest.
pub fn node_count(nodes: &[CategoryNode]) -> usize {
    nodes.iter().map(|n| 1 + node_count(&n.children)).sum()
}
