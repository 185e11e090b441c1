// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp/hpp (PolyNode, PolyTree)
//
// Nested clipping results.
//
// A PolyTree holds outer contours at the top level, their holes as
// children, islands inside those holes as grandchildren, and so on. Open
// paths from the clip are stored as childless top-level nodes.

use crate::geom::{Path, Paths};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolyNode {
    contour: Path,
    childs: Vec<PolyNode>,
    is_hole: bool,
    is_open: bool,
}

impl PolyNode {
    pub fn contour(&self) -> &Path {
        &self.contour
    }

    pub fn childs(&self) -> &[PolyNode] {
        &self.childs
    }

    pub fn child_count(&self) -> usize {
        self.childs.len()
    }

    /// True for contours at odd nesting depth.
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn flip_holes(&mut self) {
        if !self.is_open {
            self.is_hole = !self.is_hole;
        }
        for child in &mut self.childs {
            child.flip_holes();
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolyTree {
    childs: Vec<PolyNode>,
}

/// Flat description of one node; `parent` indexes the same list.
#[derive(Clone, Debug)]
pub(crate) struct NodeEntry {
    pub contour: Path,
    pub is_open: bool,
    pub parent: Option<usize>,
}

impl PolyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes: outer contours and open paths.
    pub fn childs(&self) -> &[PolyNode] {
        &self.childs
    }

    pub fn child_count(&self) -> usize {
        self.childs.len()
    }

    /// All nodes in depth-first order, parents before their children.
    pub fn iter(&self) -> PolyTreeIter<'_> {
        PolyTreeIter {
            stack: self.childs.iter().rev().collect(),
        }
    }

    /// Number of nodes at every depth.
    pub fn total(&self) -> usize {
        self.iter().count()
    }

    pub fn clear(&mut self) {
        self.childs.clear();
    }

    /// Replaces a single enclosing top-level node by its children, one
    /// level up. Anything else leaves the tree empty.
    pub(crate) fn strip_outer(&mut self) {
        if self.childs.len() == 1 && self.childs[0].child_count() > 0 {
            let mut outer = self.childs.remove(0);
            self.childs = std::mem::take(&mut outer.childs);
            for child in &mut self.childs {
                child.flip_holes();
            }
        } else {
            self.childs.clear();
        }
    }

    /// Builds the tree from a flat list. Entries keep their relative order
    /// among siblings; an entry whose parent chain does not reach the top
    /// level is dropped.
    pub(crate) fn assemble(entries: Vec<NodeEntry>) -> Self {
        let mut kids: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
        let mut roots = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            match entry.parent {
                Some(p) if p != i && p < entries.len() => kids[p].push(i),
                _ => roots.push(i),
            }
        }

        let mut slots: Vec<Option<NodeEntry>> = entries.into_iter().map(Some).collect();
        let childs = roots
            .into_iter()
            .filter_map(|i| build_node(i, 0, &kids, &mut slots))
            .collect();
        PolyTree { childs }
    }
}

fn build_node(i: usize, depth: usize, kids: &[Vec<usize>], slots: &mut [Option<NodeEntry>]) -> Option<PolyNode> {
    let entry = slots[i].take()?;
    let childs = kids[i]
        .iter()
        .filter_map(|&k| build_node(k, depth + 1, kids, slots))
        .collect();
    Some(PolyNode {
        contour: entry.contour,
        childs,
        is_hole: !entry.is_open && depth % 2 == 1,
        is_open: entry.is_open,
    })
}

pub struct PolyTreeIter<'a> {
    stack: Vec<&'a PolyNode>,
}

impl<'a> Iterator for PolyTreeIter<'a> {
    type Item = &'a PolyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.childs.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a PolyTree {
    type Item = &'a PolyNode;
    type IntoIter = PolyTreeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Every contour in the tree, open and closed.
pub fn polytree_to_paths(tree: &PolyTree) -> Paths {
    tree.iter().map(|n| n.contour.clone()).collect()
}

pub fn closed_paths_from_polytree(tree: &PolyTree) -> Paths {
    tree.iter().filter(|n| !n.is_open).map(|n| n.contour.clone()).collect()
}

pub fn open_paths_from_polytree(tree: &PolyTree) -> Paths {
    tree.childs.iter().filter(|n| n.is_open).map(|n| n.contour.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::IntPoint;

    fn entry(tag: i64, is_open: bool, parent: Option<usize>) -> NodeEntry {
        NodeEntry {
            contour: vec![IntPoint::new(tag, 0), IntPoint::new(tag, 1), IntPoint::new(tag + 1, 1)],
            is_open,
            parent,
        }
    }

    #[test]
    fn assemble_nests_by_parent() {
        // 0 outer, 1 hole in 0, 2 island in 1, 3 second outer, 4 open.
        let tree = PolyTree::assemble(vec![
            entry(0, false, None),
            entry(1, false, Some(0)),
            entry(2, false, Some(1)),
            entry(3, false, None),
            entry(4, true, None),
        ]);
        assert_eq!(tree.child_count(), 3);
        assert_eq!(tree.total(), 5);
        let outer = &tree.childs()[0];
        assert!(!outer.is_hole());
        assert_eq!(outer.child_count(), 1);
        let hole = &outer.childs()[0];
        assert!(hole.is_hole());
        assert!(!hole.childs()[0].is_hole());
        assert!(tree.childs()[2].is_open());
        assert!(!tree.childs()[2].is_hole());
    }

    #[test]
    fn child_listed_before_parent_still_nests() {
        let tree = PolyTree::assemble(vec![entry(5, false, Some(1)), entry(0, false, None)]);
        assert_eq!(tree.child_count(), 1);
        assert_eq!(tree.childs()[0].child_count(), 1);
        assert!(tree.childs()[0].childs()[0].is_hole());
    }

    #[test]
    fn iter_is_depth_first() {
        let tree = PolyTree::assemble(vec![
            entry(0, false, None),
            entry(1, false, Some(0)),
            entry(2, false, None),
        ]);
        let xs: Vec<i64> = tree.iter().map(|n| n.contour()[0].x).collect();
        assert_eq!(xs, vec![0, 1, 2]);
    }

    #[test]
    fn path_extraction_splits_open_and_closed() {
        let tree = PolyTree::assemble(vec![entry(0, false, None), entry(1, true, None), entry(2, false, Some(0))]);
        assert_eq!(polytree_to_paths(&tree).len(), 3);
        assert_eq!(closed_paths_from_polytree(&tree).len(), 2);
        let open = open_paths_from_polytree(&tree);
        assert_eq!(open.len(), 1);
        assert_eq!(open[0][0].x, 1);
    }

    #[test]
    fn strip_outer_promotes_children() {
        let mut tree = PolyTree::assemble(vec![
            entry(0, false, None),
            entry(1, false, Some(0)),
            entry(2, false, Some(1)),
            entry(3, false, Some(0)),
        ]);
        tree.strip_outer();
        assert_eq!(tree.child_count(), 2);
        assert!(!tree.childs()[0].is_hole());
        assert!(tree.childs()[0].childs()[0].is_hole());
        assert_eq!(tree.childs()[1].contour()[0].x, 3);

        let mut lone = PolyTree::assemble(vec![entry(0, false, None)]);
        lone.strip_outer();
        assert_eq!(lone.total(), 0);
    }

    #[test]
    fn clear_empties_tree() {
        let mut tree = PolyTree::assemble(vec![entry(0, false, None)]);
        tree.clear();
        assert_eq!(tree.total(), 0);
    }
}
