// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (AEL/SEL maintenance)
//
// Active (AEL) and sorted (SEL) edge lists.
//
// Both are doubly-linked lists threaded through the edge records. The AEL
// holds every edge crossing the sweep line ordered by `curr.x`; the SEL is
// scratch space reused for pending horizontals and for intersection sorting.

use super::Clipper;
use crate::arena::INVALID;
use crate::edge::{e2_inserts_before_e1, EdgeIdx};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EdgeList {
    Active,
    Sorted,
}

impl Clipper {
    #[inline]
    fn list_next(&self, list: EdgeList, e: EdgeIdx) -> EdgeIdx {
        match list {
            EdgeList::Active => self.edge(e).next_in_ael,
            EdgeList::Sorted => self.edge(e).next_in_sel,
        }
    }

    #[inline]
    fn list_prev(&self, list: EdgeList, e: EdgeIdx) -> EdgeIdx {
        match list {
            EdgeList::Active => self.edge(e).prev_in_ael,
            EdgeList::Sorted => self.edge(e).prev_in_sel,
        }
    }

    #[inline]
    fn set_list_next(&mut self, list: EdgeList, e: EdgeIdx, to: EdgeIdx) {
        match list {
            EdgeList::Active => self.edge_mut(e).next_in_ael = to,
            EdgeList::Sorted => self.edge_mut(e).next_in_sel = to,
        }
    }

    #[inline]
    fn set_list_prev(&mut self, list: EdgeList, e: EdgeIdx, to: EdgeIdx) {
        match list {
            EdgeList::Active => self.edge_mut(e).prev_in_ael = to,
            EdgeList::Sorted => self.edge_mut(e).prev_in_sel = to,
        }
    }

    #[inline]
    fn set_list_head(&mut self, list: EdgeList, e: EdgeIdx) {
        match list {
            EdgeList::Active => self.active_edges = e,
            EdgeList::Sorted => self.sorted_edges = e,
        }
    }

    #[inline]
    fn list_head(&self, list: EdgeList) -> EdgeIdx {
        match list {
            EdgeList::Active => self.active_edges,
            EdgeList::Sorted => self.sorted_edges,
        }
    }

    /// Inserts `edge` into the AEL at its sorted position, searching
    /// rightward from `start` (or from the head when `start` is INVALID).
    pub(crate) fn insert_edge_into_ael(&mut self, edge: EdgeIdx, start: EdgeIdx) {
        if self.active_edges == INVALID {
            let e = self.edge_mut(edge);
            e.prev_in_ael = INVALID;
            e.next_in_ael = INVALID;
            self.active_edges = edge;
            return;
        }
        if start == INVALID && e2_inserts_before_e1(self.edge(self.active_edges), self.edge(edge)) {
            let head = self.active_edges;
            self.edge_mut(edge).prev_in_ael = INVALID;
            self.edge_mut(edge).next_in_ael = head;
            self.edge_mut(head).prev_in_ael = edge;
            self.active_edges = edge;
            return;
        }
        let mut start = if start == INVALID { self.active_edges } else { start };
        loop {
            let next = self.edge(start).next_in_ael;
            if next == INVALID || e2_inserts_before_e1(self.edge(next), self.edge(edge)) {
                break;
            }
            start = next;
        }
        let next = self.edge(start).next_in_ael;
        self.edge_mut(edge).next_in_ael = next;
        if next != INVALID {
            self.edge_mut(next).prev_in_ael = edge;
        }
        self.edge_mut(edge).prev_in_ael = start;
        self.edge_mut(start).next_in_ael = edge;
    }

    fn delete_from_list(&mut self, list: EdgeList, e: EdgeIdx) {
        let prev = self.list_prev(list, e);
        let next = self.list_next(list, e);
        if prev == INVALID && next == INVALID && e != self.list_head(list) {
            // Already removed.
            return;
        }
        if prev != INVALID {
            self.set_list_next(list, prev, next);
        } else {
            self.set_list_head(list, next);
        }
        if next != INVALID {
            self.set_list_prev(list, next, prev);
        }
        self.set_list_next(list, e, INVALID);
        self.set_list_prev(list, e, INVALID);
    }

    pub(crate) fn delete_from_ael(&mut self, e: EdgeIdx) {
        self.delete_from_list(EdgeList::Active, e);
    }

    pub(crate) fn delete_from_sel(&mut self, e: EdgeIdx) {
        self.delete_from_list(EdgeList::Sorted, e);
    }

    /// Pushes `e` onto the front of the SEL.
    pub(crate) fn add_edge_to_sel(&mut self, e: EdgeIdx) {
        let head = self.sorted_edges;
        self.edge_mut(e).prev_in_sel = INVALID;
        self.edge_mut(e).next_in_sel = head;
        if head != INVALID {
            self.edge_mut(head).prev_in_sel = e;
        }
        self.sorted_edges = e;
    }

    pub(crate) fn pop_edge_from_sel(&mut self) -> Option<EdgeIdx> {
        let e = self.sorted_edges;
        if e == INVALID {
            return None;
        }
        self.delete_from_sel(e);
        Some(e)
    }

    pub(crate) fn copy_ael_to_sel(&mut self) {
        let mut e = self.active_edges;
        self.sorted_edges = e;
        while e != INVALID {
            let (prev, next) = (self.edge(e).prev_in_ael, self.edge(e).next_in_ael);
            let ed = self.edge_mut(e);
            ed.prev_in_sel = prev;
            ed.next_in_sel = next;
            e = next;
        }
    }

    fn swap_positions_in_list(&mut self, list: EdgeList, e1: EdgeIdx, e2: EdgeIdx) {
        if self.list_next(list, e1) == e2 {
            let next = self.list_next(list, e2);
            if next != INVALID {
                self.set_list_prev(list, next, e1);
            }
            let prev = self.list_prev(list, e1);
            if prev != INVALID {
                self.set_list_next(list, prev, e2);
            }
            self.set_list_prev(list, e2, prev);
            self.set_list_next(list, e2, e1);
            self.set_list_prev(list, e1, e2);
            self.set_list_next(list, e1, next);
        } else if self.list_next(list, e2) == e1 {
            let next = self.list_next(list, e1);
            if next != INVALID {
                self.set_list_prev(list, next, e2);
            }
            let prev = self.list_prev(list, e2);
            if prev != INVALID {
                self.set_list_next(list, prev, e1);
            }
            self.set_list_prev(list, e1, prev);
            self.set_list_next(list, e1, e2);
            self.set_list_prev(list, e2, e1);
            self.set_list_next(list, e2, next);
        } else {
            let next = self.list_next(list, e1);
            let prev = self.list_prev(list, e1);
            let e2_next = self.list_next(list, e2);
            let e2_prev = self.list_prev(list, e2);
            self.set_list_next(list, e1, e2_next);
            if e2_next != INVALID {
                self.set_list_prev(list, e2_next, e1);
            }
            self.set_list_prev(list, e1, e2_prev);
            if e2_prev != INVALID {
                self.set_list_next(list, e2_prev, e1);
            }
            self.set_list_next(list, e2, next);
            if next != INVALID {
                self.set_list_prev(list, next, e2);
            }
            self.set_list_prev(list, e2, prev);
            if prev != INVALID {
                self.set_list_next(list, prev, e2);
            }
        }

        if self.list_prev(list, e1) == INVALID {
            self.set_list_head(list, e1);
        } else if self.list_prev(list, e2) == INVALID {
            self.set_list_head(list, e2);
        }
    }

    pub(crate) fn swap_positions_in_ael(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        // Either edge may already have left the AEL.
        if self.edge(e1).next_in_ael == self.edge(e1).prev_in_ael
            || self.edge(e2).next_in_ael == self.edge(e2).prev_in_ael
        {
            return;
        }
        self.swap_positions_in_list(EdgeList::Active, e1, e2);
    }

    pub(crate) fn swap_positions_in_sel(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let detached = |c: &Clipper, e: EdgeIdx| c.edge(e).next_in_sel == INVALID && c.edge(e).prev_in_sel == INVALID;
        if detached(self, e1) || detached(self, e2) {
            return;
        }
        self.swap_positions_in_list(EdgeList::Sorted, e1, e2);
    }

    /// Next edge along the AEL in the given direction.
    #[inline]
    pub(crate) fn next_in_ael_dir(&self, e: EdgeIdx, left_to_right: bool) -> EdgeIdx {
        if left_to_right {
            self.edge(e).next_in_ael
        } else {
            self.edge(e).prev_in_ael
        }
    }
}
