// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (ProcessIntersections, IntersectEdges)
//
// Crossings inside a scanbeam.
//
// Edges are moved to their X at the top of the beam and bubble-sorted in
// the SEL; every swap is a crossing. Crossings are then resolved bottom to
// top, but only between edges that are adjacent at the moment of
// resolution, so winding counts stay consistent.

use log::trace;

use super::winding::{cross_windings, crossing_action, CrossingAction};
use super::{Clipper, ClipType, IntersectNode};
use crate::arena::INVALID;
use crate::edge::{intersect_point, EdgeIdx, OutIdx};
use crate::error::{ClipError, ClipResult};
use crate::geom::{CInt, IntPoint};

impl Clipper {
    /// Resolves one crossing of `e1` and `e2` at `pt`.
    ///
    /// `e1` must be the edge on the right above the crossing.
    pub(crate) fn intersect_edges(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) {
        let e1_contributing = self.edge(e1).out_idx.is_assigned();
        let e2_contributing = self.edge(e2).out_idx.is_assigned();
        let (d1, d2) = (self.edge(e1).wind_delta, self.edge(e2).wind_delta);

        if d1 == 0 || d2 == 0 {
            self.intersect_open_edge(e1, e2, pt, e1_contributing, e2_contributing);
            return;
        }

        let mut w1 = self.winding_of(e1);
        let mut w2 = self.winding_of(e2);
        cross_windings(&self.rules, &mut w1, &mut w2);
        self.store_winding(e1, w1);
        self.store_winding(e2, w2);

        match crossing_action(&self.rules, w1, w2, e1_contributing, e2_contributing) {
            CrossingAction::AddLocalMax => self.add_local_max_poly(e1, e2, pt),
            CrossingAction::PassThrough => {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_sides_and_indices(e1, e2);
            }
            CrossingAction::ContinueFirst => {
                self.add_out_pt(e1, pt);
                self.swap_sides_and_indices(e1, e2);
            }
            CrossingAction::ContinueSecond => {
                self.add_out_pt(e2, pt);
                self.swap_sides_and_indices(e1, e2);
            }
            CrossingAction::AddLocalMin => {
                self.add_local_min_poly(e1, e2, pt);
            }
            CrossingAction::SwapSides => self.swap_sides(e1, e2),
            CrossingAction::Nothing => {}
        }
    }

    /// Crossings involving an open path toggle that path in and out of the
    /// output; the closed edge's windings are left untouched.
    fn intersect_open_edge(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint, e1_contrib: bool, e2_contrib: bool) {
        let (ed1, ed2) = (self.edge(e1), self.edge(e2));
        let (open1, open2) = (ed1.wind_delta == 0, ed2.wind_delta == 0);
        if open1 && open2 {
            return;
        }
        let same_type = ed1.poly_type == ed2.poly_type;
        // An open edge toggles where the closed edge is a boundary of its
        // own polygon and, for unions, outside the other polygon.
        let union = self.clip_type == ClipType::Union;
        let toggles_on = |closed: &crate::edge::Edge| {
            closed.wind_cnt.abs() == 1 && (!union || closed.wind_cnt2 == 0)
        };
        let toggle1 = open1 && toggles_on(ed2);
        let toggle2 = open2 && toggles_on(ed1);

        if same_type && union {
            // Open subject against closed subject.
            if open1 {
                if e2_contrib {
                    self.toggle_open_edge(e1, pt, e1_contrib);
                }
            } else if e1_contrib {
                self.toggle_open_edge(e2, pt, e2_contrib);
            }
        } else if !same_type {
            if toggle1 {
                self.toggle_open_edge(e1, pt, e1_contrib);
            } else if toggle2 {
                self.toggle_open_edge(e2, pt, e2_contrib);
            }
        }
    }

    fn toggle_open_edge(&mut self, e: EdgeIdx, pt: IntPoint, was_contributing: bool) {
        self.add_out_pt(e, pt);
        if was_contributing {
            self.edge_mut(e).out_idx = OutIdx::Unassigned;
        }
    }

    fn swap_sides(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let s1 = self.edge(e1).side;
        let s2 = self.edge(e2).side;
        self.edge_mut(e1).side = s2;
        self.edge_mut(e2).side = s1;
    }

    fn swap_sides_and_indices(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        self.swap_sides(e1, e2);
        let o1 = self.edge(e1).out_idx;
        let o2 = self.edge(e2).out_idx;
        self.edge_mut(e1).out_idx = o2;
        self.edge_mut(e2).out_idx = o1;
    }

    /// Finds and resolves every crossing between the current beam bottom
    /// and `top_y`.
    pub(crate) fn process_intersections(&mut self, top_y: CInt) -> ClipResult<()> {
        if self.active_edges == INVALID {
            return Ok(());
        }
        self.build_intersect_list(top_y);
        let count = self.intersect_list.len();
        if count == 0 {
            return Ok(());
        }
        trace!("{} crossings below y={}", count, top_y);
        if count == 1 || self.fixup_intersection_order() {
            self.process_intersect_list();
        } else {
            self.intersect_list.clear();
            self.sorted_edges = INVALID;
            return Err(ClipError::IntersectionOrder);
        }
        self.sorted_edges = INVALID;
        Ok(())
    }

    fn build_intersect_list(&mut self, top_y: CInt) {
        let mut e = self.active_edges;
        self.sorted_edges = e;
        while e != INVALID {
            let (prev, next) = (self.edge(e).prev_in_ael, self.edge(e).next_in_ael);
            let x = self.edge(e).top_x(top_y);
            let ed = self.edge_mut(e);
            ed.prev_in_sel = prev;
            ed.next_in_sel = next;
            ed.curr.x = x;
            e = next;
        }

        loop {
            let mut modified = false;
            e = self.sorted_edges;
            while self.edge(e).next_in_sel != INVALID {
                let e_next = self.edge(e).next_in_sel;
                if self.edge(e).curr.x > self.edge(e_next).curr.x {
                    let mut pt = intersect_point(self.edge(e), self.edge(e_next));
                    if pt.y < top_y {
                        pt = IntPoint::new(self.edge(e).top_x(top_y), top_y);
                    }
                    self.intersect_list.push(IntersectNode {
                        edge1: e,
                        edge2: e_next,
                        pt,
                    });
                    self.swap_positions_in_sel(e, e_next);
                    modified = true;
                } else {
                    e = e_next;
                }
            }
            // The last edge is now in place; shrink the unsorted range.
            let prev = self.edge(e).prev_in_sel;
            if prev == INVALID || !modified {
                break;
            }
            self.edge_mut(prev).next_in_sel = INVALID;
        }
        self.sorted_edges = INVALID;
    }

    /// Reorders the crossing list so that each pair is adjacent when its
    /// turn comes. Returns false if no such order exists.
    fn fixup_intersection_order(&mut self) -> bool {
        self.copy_ael_to_sel();
        self.intersect_list.sort_by(|a, b| b.pt.y.cmp(&a.pt.y));
        let count = self.intersect_list.len();
        for i in 0..count {
            if !self.edges_adjacent(self.intersect_list[i]) {
                let mut j = i + 1;
                while j < count && !self.edges_adjacent(self.intersect_list[j]) {
                    j += 1;
                }
                if j == count {
                    return false;
                }
                self.intersect_list.swap(i, j);
            }
            let node = self.intersect_list[i];
            self.swap_positions_in_sel(node.edge1, node.edge2);
        }
        true
    }

    #[inline]
    fn edges_adjacent(&self, node: IntersectNode) -> bool {
        let e1 = self.edge(node.edge1);
        e1.next_in_sel == node.edge2 || e1.prev_in_sel == node.edge2
    }

    fn process_intersect_list(&mut self) {
        let list = std::mem::take(&mut self.intersect_list);
        for node in &list {
            self.intersect_edges(node.edge1, node.edge2, node.pt);
            self.swap_positions_in_ael(node.edge1, node.edge2);
        }
        self.intersect_list = list;
        self.intersect_list.clear();
    }
}
