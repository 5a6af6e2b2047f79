// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category taxonomy as a parent/child forest.
//!
//! Nodes are stored in an arena keyed by id, with child lists kept in
//! provider order. The catalog owns the data; a forest is rebuilt for each
//! resolution and never mutated.

use std::collections::{HashMap, HashSet};

use vitrine_core::{CategoryNode, TermId};

#[derive(Debug, Clone, Default)]
pub struct CategoryForest {
    nodes: Vec<CategoryNode>,
    index: HashMap<TermId, usize>,
    children: HashMap<Option<TermId>, Vec<usize>>,
}

impl CategoryForest {
    /// Build from the catalog's taxonomy projection.
    ///
    /// Later duplicates of an id are ignored. For the outline, a node whose
    /// parent is not in the projection (or is itself) is listed with the
    /// roots.
    pub fn build(nodes: impl IntoIterator<Item = CategoryNode>) -> Self {
        let mut forest = CategoryForest::default();
        for node in nodes {
            if forest.index.contains_key(&node.id) {
                tracing::debug!(id = node.id, "duplicate category ignored");
                continue;
            }
            forest.index.insert(node.id, forest.nodes.len());
            forest.nodes.push(node);
        }
        for (pos, node) in forest.nodes.iter().enumerate() {
            let parent = node
                .parent_id
                .filter(|p| *p != node.id && forest.index.contains_key(p));
            forest.children.entry(parent).or_default().push(pos);
        }
        forest
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: TermId) -> Option<&CategoryNode> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Direct children of `parent` in provider order. `None` yields the
    /// outline roots, which include orphans.
    pub fn children_of(&self, parent: Option<TermId>) -> impl Iterator<Item = &CategoryNode> {
        self.children
            .get(&parent)
            .into_iter()
            .flatten()
            .map(|&pos| &self.nodes[pos])
    }

    /// The scope used when no categories are selected: every node without a
    /// parent id, in provider order. Orphans and cycle members are excluded.
    pub fn default_scope(&self) -> Vec<&CategoryNode> {
        self.nodes.iter().filter(|n| n.parent_id.is_none()).collect()
    }

    /// Depth-first outline of the forest as `(depth, node)` pairs.
    ///
    /// Nodes caught in a parent cycle are unreachable from any root and are
    /// emitted afterwards at depth 0, so every node appears exactly once.
    pub fn walk(&self) -> Vec<(usize, &CategoryNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::with_capacity(self.nodes.len());
        let roots: Vec<usize> = self.children.get(&None).cloned().unwrap_or_default();
        self.walk_from(roots, &mut visited, &mut out);

        for pos in 0..self.nodes.len() {
            if !visited.contains(&pos) {
                self.walk_from(vec![pos], &mut visited, &mut out);
            }
        }
        out
    }

    fn walk_from<'a>(
        &'a self,
        starts: Vec<usize>,
        visited: &mut HashSet<usize>,
        out: &mut Vec<(usize, &'a CategoryNode)>,
    ) {
        let mut stack: Vec<(usize, usize)> = starts.into_iter().rev().map(|p| (0, p)).collect();
        while let Some((depth, pos)) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }
            let node = &self.nodes[pos];
            out.push((depth, node));
            if let Some(kids) = self.children.get(&Some(node.id)) {
                stack.extend(kids.iter().rev().map(|&k| (depth + 1, k)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: TermId, name: &str, parent: Option<TermId>, count: u32) -> CategoryNode {
        CategoryNode {
            id,
            name: name.to_string(),
            parent_id: parent,
            product_count: count,
        }
    }

    fn sample() -> CategoryForest {
        CategoryForest::build(vec![
            node(1, "Clothing", None, 4),
            node(2, "Shirts", Some(1), 3),
            node(3, "Shoes", None, 0),
            node(4, "Polos", Some(2), 1),
            node(5, "Hats", Some(1), 0),
        ])
    }

    #[test]
    fn roots_are_the_default_scope() {
        let forest = sample();
        let ids: Vec<_> = forest.default_scope().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn children_keep_provider_order() {
        let forest = sample();
        let ids: Vec<_> = forest.children_of(Some(1)).map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(forest.children_of(Some(3)).count(), 0);
    }

    #[test]
    fn walk_is_depth_first() {
        let forest = sample();
        let outline: Vec<_> = forest.walk().iter().map(|(d, n)| (*d, n.id)).collect();
        assert_eq!(outline, vec![(0, 1), (1, 2), (2, 4), (1, 5), (0, 3)]);
    }

    #[test]
    fn orphans_are_outlined_as_roots_and_duplicates_are_dropped() {
        let forest = CategoryForest::build(vec![
            node(1, "A", None, 0),
            node(2, "B", Some(99), 0),
            node(1, "A again", None, 0),
        ]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.get(1).unwrap().name, "A");
        let roots: Vec<_> = forest.children_of(None).map(|n| n.id).collect();
        assert_eq!(roots, vec![1, 2]);
        let outline: Vec<_> = forest.walk().iter().map(|(d, n)| (*d, n.id)).collect();
        assert_eq!(outline, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn default_scope_is_only_parentless_nodes() {
        let forest = CategoryForest::build(vec![
            node(1, "Root", None, 0),
            node(2, "Orphan", Some(99), 0),
            node(3, "Self", Some(3), 0),
            node(4, "X", Some(5), 0),
            node(5, "Y", Some(4), 0),
        ]);
        let ids: Vec<_> = forest.default_scope().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(forest.walk().len(), 5);
    }

    #[test]
    fn cycles_terminate_and_visit_every_node_once() {
        let forest = CategoryForest::build(vec![
            node(1, "Root", None, 0),
            node(2, "X", Some(3), 0),
            node(3, "Y", Some(2), 0),
            node(4, "Self", Some(4), 0),
        ]);
        let outline = forest.walk();
        assert_eq!(outline.len(), 4);
        let ids: HashSet<_> = outline.iter().map(|(_, n)| n.id).collect();
        assert_eq!(ids, HashSet::from([1, 2, 3, 4]));
        // A self-parented node is outlined but never part of the default scope.
        assert!(forest.walk().iter().any(|(d, n)| *d == 0 && n.id == 4));
        assert!(forest.default_scope().iter().all(|n| n.id == 1));
    }
}
