// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (AddOutPt, AppendPolygon, BuildResult)
//
// Output rings and result assembly.
//
// Each OutRec owns a circular doubly-linked ring of OutPts. By convention
// `pts` is the ring's leftmost point and `pts.prev` its rightmost, so an
// edge on the left side of a contour prepends and an edge on the right side
// appends. When two rings merge, the absorbed OutRec forwards to the
// survivor through `idx`.

use super::{Clipper, OutPtIdx};
use crate::arena::INVALID;
use crate::edge::{get_dx, EdgeIdx, EdgeSide, OutIdx, OutRecIdx};
use crate::geom::{point_in_ring, pt2_is_between_pt1_and_pt3, slopes_equal3, slopes_equal4, IntPoint, Path, Paths};
use crate::polytree::{NodeEntry, PolyTree};

#[derive(Clone, Debug)]
pub(crate) struct OutPt {
    /// Owning record; may be stale after a merge until resolved.
    pub idx: OutRecIdx,
    pub pt: IntPoint,
    pub next: OutPtIdx,
    pub prev: OutPtIdx,
}

#[derive(Clone, Debug)]
pub(crate) struct OutRec {
    /// Equals this record's own index unless it was merged into another.
    pub idx: OutRecIdx,
    pub is_hole: bool,
    pub is_open: bool,
    /// Weak link to the nearest enclosing record; may point at a record
    /// whose ring has since been emptied.
    pub first_left: OutRecIdx,
    /// Ring head, or INVALID once the record is dead.
    pub pts: OutPtIdx,
    pub bottom_pt: OutPtIdx,
}

impl Clipper {
    // ─────────────────────────── Records ───────────────────────────────────

    pub(crate) fn create_out_rec(&mut self) -> OutRecIdx {
        let idx = self.poly_outs.len() as OutRecIdx;
        self.poly_outs.push(OutRec {
            idx,
            is_hole: false,
            is_open: false,
            first_left: INVALID,
            pts: INVALID,
            bottom_pt: INVALID,
        });
        idx
    }

    /// Follows merge forwarding to the live record.
    pub(crate) fn get_out_rec(&self, mut r: OutRecIdx) -> OutRecIdx {
        while self.rec(r).idx != r {
            r = self.rec(r).idx;
        }
        r
    }

    /// Walks `first_left` past records whose rings are gone.
    pub(crate) fn parse_first_left(&self, mut r: OutRecIdx) -> OutRecIdx {
        while r != INVALID && self.rec(r).pts == INVALID {
            r = self.rec(r).first_left;
        }
        r
    }

    pub(crate) fn dispose_all_out_recs(&mut self) {
        self.out_pts.clear();
        self.poly_outs.clear();
    }

    fn dispose_out_pts(&mut self, start: OutPtIdx) {
        let mut op = start;
        loop {
            let next = self.op(op).next;
            self.out_pts.free(op);
            if next == start || !self.out_pts.is_live(next) {
                break;
            }
            op = next;
        }
    }

    // ─────────────────────────── Ring building ─────────────────────────────

    /// Adds `pt` to the ring of `e`'s record, opening a record if needed.
    pub(crate) fn add_out_pt(&mut self, e: EdgeIdx, pt: IntPoint) -> OutPtIdx {
        match self.edge(e).out_idx {
            OutIdx::Rec(r) => {
                let op = self.rec(r).pts;
                let to_front = self.edge(e).side == EdgeSide::Left;
                let op_prev = self.op(op).prev;
                if to_front && pt == self.op(op).pt {
                    return op;
                }
                if !to_front && pt == self.op(op_prev).pt {
                    return op_prev;
                }
                let new_op = self.out_pts.alloc(OutPt {
                    idx: r,
                    pt,
                    next: op,
                    prev: op_prev,
                });
                self.op_mut(op_prev).next = new_op;
                self.op_mut(op).prev = new_op;
                if to_front {
                    self.rec_mut(r).pts = new_op;
                }
                new_op
            }
            _ => {
                let r = self.create_out_rec();
                let is_open = self.edge(e).wind_delta == 0;
                let new_op = self.out_pts.alloc(OutPt {
                    idx: r,
                    pt,
                    next: INVALID,
                    prev: INVALID,
                });
                {
                    let op = self.op_mut(new_op);
                    op.next = new_op;
                    op.prev = new_op;
                }
                self.rec_mut(r).pts = new_op;
                self.rec_mut(r).is_open = is_open;
                if !is_open {
                    self.set_hole_state(e, r);
                }
                self.edge_mut(e).out_idx = OutIdx::Rec(r);
                new_op
            }
        }
    }

    /// The ring end that `e` is currently extending.
    pub(crate) fn get_last_out_pt(&self, e: EdgeIdx) -> OutPtIdx {
        let r = match self.edge(e).out_idx.rec() {
            Some(r) => r,
            None => return INVALID,
        };
        let pts = self.rec(r).pts;
        if self.edge(e).side == EdgeSide::Left {
            pts
        } else {
            self.op(pts).prev
        }
    }

    /// A new ring is a hole when an odd number of contributing boundaries
    /// lie to its left.
    fn set_hole_state(&mut self, e: EdgeIdx, r: OutRecIdx) {
        let mut e2 = self.edge(e).prev_in_ael;
        let mut e_tmp = INVALID;
        while e2 != INVALID {
            if self.edge(e2).out_idx.is_assigned() && self.edge(e2).wind_delta != 0 {
                if e_tmp == INVALID {
                    e_tmp = e2;
                } else if self.edge(e_tmp).out_idx == self.edge(e2).out_idx {
                    e_tmp = INVALID;
                }
            }
            e2 = self.edge(e2).prev_in_ael;
        }
        if e_tmp == INVALID {
            self.rec_mut(r).first_left = INVALID;
            self.rec_mut(r).is_hole = false;
        } else if let Some(fl) = self.edge(e_tmp).out_idx.rec() {
            let hole = !self.rec(fl).is_hole;
            self.rec_mut(r).first_left = fl;
            self.rec_mut(r).is_hole = hole;
        }
    }

    pub(crate) fn add_local_min_poly(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) -> OutPtIdx {
        let result;
        let e;
        let prev_e;
        if self.edge(e2).is_horizontal() || self.edge(e1).dx > self.edge(e2).dx {
            result = self.add_out_pt(e1, pt);
            let out_idx = self.edge(e1).out_idx;
            self.edge_mut(e2).out_idx = out_idx;
            self.edge_mut(e1).side = EdgeSide::Left;
            self.edge_mut(e2).side = EdgeSide::Right;
            e = e1;
            prev_e = if self.edge(e).prev_in_ael == e2 {
                self.edge(e2).prev_in_ael
            } else {
                self.edge(e).prev_in_ael
            };
        } else {
            result = self.add_out_pt(e2, pt);
            let out_idx = self.edge(e2).out_idx;
            self.edge_mut(e1).out_idx = out_idx;
            self.edge_mut(e1).side = EdgeSide::Right;
            self.edge_mut(e2).side = EdgeSide::Left;
            e = e2;
            prev_e = if self.edge(e).prev_in_ael == e1 {
                self.edge(e1).prev_in_ael
            } else {
                self.edge(e).prev_in_ael
            };
        }

        if prev_e != INVALID
            && self.edge(prev_e).out_idx.is_assigned()
            && self.edge(prev_e).top.y < pt.y
            && self.edge(e).top.y < pt.y
        {
            let x_prev = self.edge(prev_e).top_x(pt.y);
            let x_e = self.edge(e).top_x(pt.y);
            if x_prev == x_e
                && self.edge(e).wind_delta != 0
                && self.edge(prev_e).wind_delta != 0
                && slopes_equal4(
                    IntPoint::new(x_prev, pt.y),
                    self.edge(prev_e).top,
                    IntPoint::new(x_e, pt.y),
                    self.edge(e).top,
                    self.base.range,
                )
            {
                let out_pt = self.add_out_pt(prev_e, pt);
                let top = self.edge(e).top;
                self.add_join(result, out_pt, top);
            }
        }
        result
    }

    pub(crate) fn add_local_max_poly(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) {
        self.add_out_pt(e1, pt);
        if self.edge(e2).wind_delta == 0 {
            self.add_out_pt(e2, pt);
        }
        let (o1, o2) = (self.edge(e1).out_idx, self.edge(e2).out_idx);
        if o1 == o2 {
            self.edge_mut(e1).out_idx = OutIdx::Unassigned;
            self.edge_mut(e2).out_idx = OutIdx::Unassigned;
        } else {
            match (o1.rec(), o2.rec()) {
                (Some(r1), Some(r2)) if r1 < r2 => self.append_polygon(e1, e2),
                _ => self.append_polygon(e2, e1),
            }
        }
    }

    fn outrec1_right_of_outrec2(&self, mut r1: OutRecIdx, r2: OutRecIdx) -> bool {
        loop {
            r1 = self.rec(r1).first_left;
            if r1 == r2 {
                return true;
            }
            if r1 == INVALID {
                return false;
            }
        }
    }

    /// The record whose hole state should survive a merge of r1 and r2.
    pub(crate) fn hole_state_rec(&mut self, r1: OutRecIdx, r2: OutRecIdx) -> OutRecIdx {
        if r1 == r2 {
            r1
        } else if self.outrec1_right_of_outrec2(r1, r2) {
            r2
        } else if self.outrec1_right_of_outrec2(r2, r1) {
            r1
        } else {
            self.get_lowermost_rec(r1, r2)
        }
    }

    /// Splices e2's ring onto e1's ring after the two edges meet at a maximum.
    fn append_polygon(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let (r1, r2) = match (self.edge(e1).out_idx.rec(), self.edge(e2).out_idx.rec()) {
            (Some(a), Some(b)) => (a, b),
            _ => return,
        };
        let hole_state_rec = self.hole_state_rec(r1, r2);

        let p1_lft = self.rec(r1).pts;
        let p1_rt = self.op(p1_lft).prev;
        let p2_lft = self.rec(r2).pts;
        let p2_rt = self.op(p2_lft).prev;

        let side1 = self.edge(e1).side;
        let side2 = self.edge(e2).side;
        if side1 == EdgeSide::Left {
            if side2 == EdgeSide::Left {
                // z y x a b c
                self.reverse_poly_pt_links(p2_lft);
                self.op_mut(p2_lft).next = p1_lft;
                self.op_mut(p1_lft).prev = p2_lft;
                self.op_mut(p1_rt).next = p2_rt;
                self.op_mut(p2_rt).prev = p1_rt;
                self.rec_mut(r1).pts = p2_rt;
            } else {
                // x y z a b c
                self.op_mut(p2_rt).next = p1_lft;
                self.op_mut(p1_lft).prev = p2_rt;
                self.op_mut(p2_lft).prev = p1_rt;
                self.op_mut(p1_rt).next = p2_lft;
                self.rec_mut(r1).pts = p2_lft;
            }
        } else if side2 == EdgeSide::Right {
            // a b c z y x
            self.reverse_poly_pt_links(p2_lft);
            self.op_mut(p1_rt).next = p2_rt;
            self.op_mut(p2_rt).prev = p1_rt;
            self.op_mut(p2_lft).next = p1_lft;
            self.op_mut(p1_lft).prev = p2_lft;
        } else {
            // a b c x y z
            self.op_mut(p1_rt).next = p2_lft;
            self.op_mut(p2_lft).prev = p1_rt;
            self.op_mut(p1_lft).prev = p2_rt;
            self.op_mut(p2_rt).next = p1_lft;
        }

        self.rec_mut(r1).bottom_pt = INVALID;
        if hole_state_rec == r2 {
            let fl2 = self.rec(r2).first_left;
            if fl2 != r1 {
                self.rec_mut(r1).first_left = fl2;
            }
            let hole = self.rec(r2).is_hole;
            self.rec_mut(r1).is_hole = hole;
        }
        {
            let rec2 = self.rec_mut(r2);
            rec2.pts = INVALID;
            rec2.bottom_pt = INVALID;
            rec2.first_left = r1;
        }

        let ok_idx = self.edge(e1).out_idx;
        let obsolete_idx = self.edge(e2).out_idx;
        // Only reached from add_local_max_poly, where both edges are done.
        self.edge_mut(e1).out_idx = OutIdx::Unassigned;
        self.edge_mut(e2).out_idx = OutIdx::Unassigned;

        let side = self.edge(e1).side;
        let mut e = self.active_edges;
        while e != INVALID {
            if self.edge(e).out_idx == obsolete_idx {
                self.edge_mut(e).out_idx = ok_idx;
                self.edge_mut(e).side = side;
                break;
            }
            e = self.edge(e).next_in_ael;
        }
        let survivor = self.rec(r1).idx;
        self.rec_mut(r2).idx = survivor;
    }

    pub(crate) fn reverse_poly_pt_links(&mut self, start: OutPtIdx) {
        if start == INVALID {
            return;
        }
        let mut pp1 = start;
        loop {
            let op = self.op_mut(pp1);
            let pp2 = op.next;
            op.next = op.prev;
            op.prev = pp2;
            pp1 = pp2;
            if pp1 == start {
                break;
            }
        }
    }

    // ─────────────────────────── Ring measures ─────────────────────────────

    pub(crate) fn point_count(&self, start: OutPtIdx) -> usize {
        if start == INVALID {
            return 0;
        }
        let mut count = 0;
        let mut p = start;
        loop {
            count += 1;
            p = self.op(p).next;
            if p == start {
                break;
            }
        }
        count
    }

    /// Ring vertices in `next` order starting at `start`.
    pub(crate) fn ring_points(&self, start: OutPtIdx) -> Vec<IntPoint> {
        let mut pts = Vec::new();
        let mut p = start;
        loop {
            pts.push(self.op(p).pt);
            p = self.op(p).next;
            if p == start {
                break;
            }
        }
        pts
    }

    pub(crate) fn ring_area(&self, start: OutPtIdx) -> f64 {
        if start == INVALID {
            return 0.0;
        }
        let mut a = 0.0f64;
        let mut op = start;
        loop {
            let prev = self.op(self.op(op).prev).pt;
            let pt = self.op(op).pt;
            a += (prev.x as f64 + pt.x as f64) * (prev.y as f64 - pt.y as f64);
            op = self.op(op).next;
            if op == start {
                break;
            }
        }
        a * 0.5
    }

    /// True if ring `op1` lies inside ring `op2`, judged by its first vertex
    /// not on the boundary of `op2`.
    pub(crate) fn poly2_contains_poly1(&self, op1: OutPtIdx, op2: OutPtIdx) -> bool {
        let outer = self.ring_points(op2);
        let mut op = op1;
        loop {
            let res = point_in_ring(self.op(op).pt, outer.iter().copied());
            if res >= 0 {
                return res > 0;
            }
            op = self.op(op).next;
            if op == op1 {
                break;
            }
        }
        true
    }

    fn get_bottom_pt(&self, mut pp: OutPtIdx) -> OutPtIdx {
        let mut dups = INVALID;
        let mut p = self.op(pp).next;
        while p != pp {
            let (ppt, cur) = (self.op(pp).pt, self.op(p).pt);
            if cur.y > ppt.y {
                pp = p;
                dups = INVALID;
            } else if cur.y == ppt.y && cur.x <= ppt.x {
                if cur.x < ppt.x {
                    dups = INVALID;
                    pp = p;
                } else if self.op(p).next != pp && self.op(p).prev != pp {
                    dups = p;
                }
            }
            p = self.op(p).next;
        }
        if dups != INVALID {
            // At least two vertices share the bottom point.
            while dups != p {
                if !self.first_is_bottom_pt(p, dups) {
                    pp = dups;
                }
                dups = self.op(dups).next;
                while self.op(dups).pt != self.op(pp).pt {
                    dups = self.op(dups).next;
                }
            }
        }
        pp
    }

    fn neighbour_dx(&self, btm: OutPtIdx, forward: bool) -> f64 {
        let pt = self.op(btm).pt;
        let step = |op: OutPtIdx| if forward { self.op(op).next } else { self.op(op).prev };
        let mut p = step(btm);
        while self.op(p).pt == pt && p != btm {
            p = step(p);
        }
        get_dx(pt, self.op(p).pt).abs()
    }

    fn first_is_bottom_pt(&self, btm1: OutPtIdx, btm2: OutPtIdx) -> bool {
        let dx1p = self.neighbour_dx(btm1, false);
        let dx1n = self.neighbour_dx(btm1, true);
        let dx2p = self.neighbour_dx(btm2, false);
        let dx2n = self.neighbour_dx(btm2, true);
        if dx1p.max(dx1n) == dx2p.max(dx2n) && dx1p.min(dx1n) == dx2p.min(dx2n) {
            // Otherwise identical: decide by orientation.
            self.ring_area(btm1) > 0.0
        } else {
            (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
        }
    }

    fn get_lowermost_rec(&mut self, r1: OutRecIdx, r2: OutRecIdx) -> OutRecIdx {
        if self.rec(r1).bottom_pt == INVALID {
            let b = self.get_bottom_pt(self.rec(r1).pts);
            self.rec_mut(r1).bottom_pt = b;
        }
        if self.rec(r2).bottom_pt == INVALID {
            let b = self.get_bottom_pt(self.rec(r2).pts);
            self.rec_mut(r2).bottom_pt = b;
        }
        let op1 = self.rec(r1).bottom_pt;
        let op2 = self.rec(r2).bottom_pt;
        let (p1, p2) = (self.op(op1).pt, self.op(op2).pt);
        if p1.y > p2.y {
            r1
        } else if p1.y < p2.y {
            r2
        } else if p1.x < p2.x {
            r1
        } else if p1.x > p2.x {
            r2
        } else if self.op(op1).next == op1 {
            r2
        } else if self.op(op2).next == op2 {
            r1
        } else if self.first_is_bottom_pt(op1, op2) {
            r1
        } else {
            r2
        }
    }

    // ─────────────────────────── Post-sweep cleanup ────────────────────────

    /// Outer rings get positive area and holes negative (or the reverse).
    pub(crate) fn fix_orientations(&mut self) {
        for r in 0..self.poly_outs.len() as OutRecIdx {
            let rec = self.rec(r);
            if rec.pts == INVALID || rec.is_open {
                continue;
            }
            if (rec.is_hole ^ self.reverse_output) == (self.ring_area(rec.pts) > 0.0) {
                let pts = rec.pts;
                self.reverse_poly_pt_links(pts);
            }
        }
    }

    /// Removes duplicate points and the middle vertex of collinear runs.
    pub(crate) fn fixup_out_polygon(&mut self, r: OutRecIdx) {
        let mut last_ok = INVALID;
        self.rec_mut(r).bottom_pt = INVALID;
        let mut pp = self.rec(r).pts;
        let preserve_col = self.base.preserve_collinear || self.strict_simple;

        loop {
            let (prev, next) = (self.op(pp).prev, self.op(pp).next);
            if prev == pp || prev == next {
                self.dispose_out_pts(pp);
                self.rec_mut(r).pts = INVALID;
                return;
            }
            let (prev_pt, pt, next_pt) = (self.op(prev).pt, self.op(pp).pt, self.op(next).pt);
            if pt == next_pt
                || pt == prev_pt
                || (slopes_equal3(prev_pt, pt, next_pt, self.base.range)
                    && (!preserve_col || !pt2_is_between_pt1_and_pt3(prev_pt, pt, next_pt)))
            {
                last_ok = INVALID;
                self.op_mut(prev).next = next;
                self.op_mut(next).prev = prev;
                self.out_pts.free(pp);
                pp = prev;
            } else if pp == last_ok {
                break;
            } else {
                if last_ok == INVALID {
                    last_ok = pp;
                }
                pp = next;
            }
        }
        self.rec_mut(r).pts = pp;
    }

    /// Removes consecutive duplicates from an open path.
    pub(crate) fn fixup_out_polyline(&mut self, r: OutRecIdx) {
        let mut pp = self.rec(r).pts;
        let mut last_pp = self.op(pp).prev;
        while pp != last_pp {
            pp = self.op(pp).next;
            let prev = self.op(pp).prev;
            if self.op(pp).pt == self.op(prev).pt {
                if pp == last_pp {
                    last_pp = prev;
                }
                let next = self.op(pp).next;
                self.op_mut(prev).next = next;
                self.op_mut(next).prev = prev;
                self.out_pts.free(pp);
                pp = prev;
            }
        }
        if pp == self.op(pp).prev {
            self.dispose_out_pts(pp);
            self.rec_mut(r).pts = INVALID;
        }
    }

    // ─────────────────────────── Results ───────────────────────────────────

    fn contour_of(&self, pts: OutPtIdx, cnt: usize) -> Path {
        let mut path = Vec::with_capacity(cnt);
        let mut p = self.op(pts).prev;
        for _ in 0..cnt {
            path.push(self.op(p).pt);
            p = self.op(p).prev;
        }
        path
    }

    pub(crate) fn build_result(&self) -> Paths {
        let mut result = Vec::with_capacity(self.poly_outs.len());
        for rec in &self.poly_outs {
            if rec.pts == INVALID || rec.is_open {
                continue;
            }
            let cnt = self.point_count(rec.pts);
            if cnt < 2 {
                continue;
            }
            result.push(self.contour_of(rec.pts, cnt));
        }
        result
    }

    /// Re-points `first_left` at the nearest container with the opposite
    /// hole state.
    fn fix_hole_linkage(&mut self, r: OutRecIdx) {
        let fl = self.rec(r).first_left;
        if fl == INVALID || (self.rec(r).is_hole != self.rec(fl).is_hole && self.rec(fl).pts != INVALID) {
            return;
        }
        let is_hole = self.rec(r).is_hole;
        let mut orfl = fl;
        while orfl != INVALID && (self.rec(orfl).is_hole == is_hole || self.rec(orfl).pts == INVALID) {
            orfl = self.rec(orfl).first_left;
        }
        self.rec_mut(r).first_left = orfl;
    }

    pub(crate) fn build_result_tree(&mut self) -> PolyTree {
        let count = self.poly_outs.len();
        let mut node_of: Vec<Option<usize>> = vec![None; count];
        let mut entries: Vec<NodeEntry> = Vec::with_capacity(count);

        for r in 0..count as OutRecIdx {
            let pts = self.rec(r).pts;
            let is_open = self.rec(r).is_open;
            let cnt = self.point_count(pts);
            if (is_open && cnt < 2) || (!is_open && cnt < 3) {
                continue;
            }
            self.fix_hole_linkage(r);
            node_of[r as usize] = Some(entries.len());
            entries.push(NodeEntry {
                contour: self.contour_of(pts, cnt),
                is_open,
                parent: None,
            });
        }

        for r in 0..count {
            let node = match node_of[r] {
                Some(n) => n,
                None => continue,
            };
            let rec = &self.poly_outs[r];
            if rec.is_open || rec.first_left == INVALID {
                continue;
            }
            entries[node].parent = node_of[rec.first_left as usize];
        }
        PolyTree::assemble(entries)
    }
}
