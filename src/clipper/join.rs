// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (JoinCommonEdges, DoSimplePolygons)
//
// Deferred joins and strictly-simple splitting.
//
// During the sweep, pairs of output vertices that lie on a shared
// collinear edge are recorded as joins. After the sweep each join splices
// the two rings: if they belong to different records the records merge,
// if they belong to the same record it splits in two and the hole state
// and containment of both halves is recomputed.

use log::trace;

use super::{Clipper, Join, OutPt, OutPtIdx};
use crate::arena::INVALID;
use crate::edge::OutRecIdx;
use crate::geom::{get_overlap, slopes_equal3, IntPoint};

impl Clipper {
    pub(crate) fn add_join(&mut self, op1: OutPtIdx, op2: OutPtIdx, off_pt: IntPoint) {
        self.joins.push(Join { op1, op2, off_pt });
    }

    pub(crate) fn add_ghost_join(&mut self, op: OutPtIdx, off_pt: IntPoint) {
        self.ghost_joins.push(Join {
            op1: op,
            op2: INVALID,
            off_pt,
        });
    }

    /// Inserts a copy of `op` next to it.
    fn dup_out_pt(&mut self, op: OutPtIdx, insert_after: bool) -> OutPtIdx {
        let src = self.op(op).clone();
        let (prev, next) = if insert_after { (op, src.next) } else { (src.prev, op) };
        let result = self.out_pts.alloc(OutPt {
            idx: src.idx,
            pt: src.pt,
            next,
            prev,
        });
        self.op_mut(prev).next = result;
        self.op_mut(next).prev = result;
        result
    }

    /// Cuts both rings at the join point and cross-links them. The two
    /// orientations are mirror images of each other.
    fn splice_at(&mut self, join: &mut Join, op1: OutPtIdx, op2: OutPtIdx, reverse1: bool) {
        if reverse1 {
            let op1b = self.dup_out_pt(op1, false);
            let op2b = self.dup_out_pt(op2, true);
            self.op_mut(op1).prev = op2;
            self.op_mut(op2).next = op1;
            self.op_mut(op1b).next = op2b;
            self.op_mut(op2b).prev = op1b;
            join.op1 = op1;
            join.op2 = op1b;
        } else {
            let op1b = self.dup_out_pt(op1, true);
            let op2b = self.dup_out_pt(op2, false);
            self.op_mut(op1).next = op2;
            self.op_mut(op2).prev = op1;
            self.op_mut(op1b).prev = op2b;
            self.op_mut(op2b).next = op1b;
            join.op1 = op1;
            join.op2 = op1b;
        }
    }

    /// First vertex from `op` in the given direction at a different point.
    fn skip_same_pt(&self, op: OutPtIdx, forward: bool) -> OutPtIdx {
        let pt = self.op(op).pt;
        let step = |p: OutPtIdx| if forward { self.op(p).next } else { self.op(p).prev };
        let mut b = step(op);
        while self.op(b).pt == pt && b != op {
            b = step(b);
        }
        b
    }

    fn join_points(&mut self, join: &mut Join, r1: OutRecIdx, r2: OutRecIdx) -> bool {
        let mut op1 = join.op1;
        let mut op2 = join.op2;
        let off = join.off_pt;
        let is_horizontal = self.op(op1).pt.y == off.y;

        if is_horizontal && off == self.op(op1).pt && off == self.op(op2).pt {
            // Strictly-simple touch: only splits a single record.
            if r1 != r2 {
                return false;
            }
            let mut op1b = self.op(op1).next;
            while op1b != op1 && self.op(op1b).pt == off {
                op1b = self.op(op1b).next;
            }
            let reverse1 = self.op(op1b).pt.y > off.y;
            let mut op2b = self.op(op2).next;
            while op2b != op2 && self.op(op2b).pt == off {
                op2b = self.op(op2b).next;
            }
            let reverse2 = self.op(op2b).pt.y > off.y;
            if reverse1 == reverse2 {
                return false;
            }
            self.splice_at(join, op1, op2, reverse1);
            true
        } else if is_horizontal {
            // The shared span may lie anywhere along either horizontal, so
            // expand both to their full extent first.
            let mut op1b = op1;
            while self.op(self.op(op1).prev).pt.y == self.op(op1).pt.y
                && self.op(op1).prev != op1b
                && self.op(op1).prev != op2
            {
                op1 = self.op(op1).prev;
            }
            while self.op(self.op(op1b).next).pt.y == self.op(op1b).pt.y
                && self.op(op1b).next != op1
                && self.op(op1b).next != op2
            {
                op1b = self.op(op1b).next;
            }
            if self.op(op1b).next == op1 || self.op(op1b).next == op2 {
                return false;
            }

            let mut op2b = op2;
            while self.op(self.op(op2).prev).pt.y == self.op(op2).pt.y
                && self.op(op2).prev != op2b
                && self.op(op2).prev != op1b
            {
                op2 = self.op(op2).prev;
            }
            while self.op(self.op(op2b).next).pt.y == self.op(op2b).pt.y
                && self.op(op2b).next != op2
                && self.op(op2b).next != op1
            {
                op2b = self.op(op2b).next;
            }
            if self.op(op2b).next == op2 || self.op(op2b).next == op1 {
                return false;
            }

            let (p1, p1b, p2, p2b) = (self.op(op1).pt, self.op(op1b).pt, self.op(op2).pt, self.op(op2b).pt);
            let (left, right) = match get_overlap(p1.x, p1b.x, p2.x, p2b.x) {
                Some(span) => span,
                None => return false,
            };

            // Keep op1 and op2 out of the discarded spike; later joins may
            // still refer to them.
            let in_span = |x: i64| x >= left && x <= right;
            let (pt, discard_left) = if in_span(p1.x) {
                (p1, p1.x > p1b.x)
            } else if in_span(p2.x) {
                (p2, p2.x > p2b.x)
            } else if in_span(p1b.x) {
                (p1b, p1b.x > p1.x)
            } else {
                (p2b, p2b.x > p2.x)
            };
            join.op1 = op1;
            join.op2 = op2;
            self.join_horz(op1, op1b, op2, op2b, pt, discard_left)
        } else {
            // Non-horizontal: both points share a Y above off_pt.
            let mut op1b = self.skip_same_pt(op1, true);
            let p1 = self.op(op1).pt;
            let reverse1 =
                self.op(op1b).pt.y > p1.y || !slopes_equal3(p1, self.op(op1b).pt, off, self.base.range);
            if reverse1 {
                op1b = self.skip_same_pt(op1, false);
                if self.op(op1b).pt.y > p1.y || !slopes_equal3(p1, self.op(op1b).pt, off, self.base.range) {
                    return false;
                }
            }
            let mut op2b = self.skip_same_pt(op2, true);
            let p2 = self.op(op2).pt;
            let reverse2 =
                self.op(op2b).pt.y > p2.y || !slopes_equal3(p2, self.op(op2b).pt, off, self.base.range);
            if reverse2 {
                op2b = self.skip_same_pt(op2, false);
                if self.op(op2b).pt.y > p2.y || !slopes_equal3(p2, self.op(op2b).pt, off, self.base.range) {
                    return false;
                }
            }

            if op1b == op1 || op2b == op2 || op1b == op2b || (r1 == r2 && reverse1 == reverse2) {
                return false;
            }
            self.splice_at(join, op1, op2, reverse1);
            true
        }
    }

    /// Walks `op` along its horizontal towards `pt` and leaves a duplicate
    /// vertex exactly at `pt` on the kept side.
    fn horz_anchor(&mut self, mut op: OutPtIdx, left_to_right: bool, pt: IntPoint, discard_left: bool) -> (OutPtIdx, OutPtIdx) {
        let after;
        if left_to_right {
            loop {
                let (cur, nxt) = (self.op(op).pt, self.op(self.op(op).next).pt);
                if nxt.x <= pt.x && nxt.x >= cur.x && nxt.y == pt.y {
                    op = self.op(op).next;
                } else {
                    break;
                }
            }
            if discard_left && self.op(op).pt.x != pt.x {
                op = self.op(op).next;
            }
            after = !discard_left;
        } else {
            loop {
                let (cur, nxt) = (self.op(op).pt, self.op(self.op(op).next).pt);
                if nxt.x >= pt.x && nxt.x <= cur.x && nxt.y == pt.y {
                    op = self.op(op).next;
                } else {
                    break;
                }
            }
            if !discard_left && self.op(op).pt.x != pt.x {
                op = self.op(op).next;
            }
            after = discard_left;
        }
        let mut opb = self.dup_out_pt(op, after);
        if self.op(opb).pt != pt {
            op = opb;
            self.op_mut(op).pt = pt;
            opb = self.dup_out_pt(op, after);
        }
        (op, opb)
    }

    fn join_horz(
        &mut self,
        op1: OutPtIdx,
        op1b: OutPtIdx,
        op2: OutPtIdx,
        op2b: OutPtIdx,
        pt: IntPoint,
        discard_left: bool,
    ) -> bool {
        let dir1_ltr = self.op(op1).pt.x <= self.op(op1b).pt.x;
        let dir2_ltr = self.op(op2).pt.x <= self.op(op2b).pt.x;
        if dir1_ltr == dir2_ltr {
            return false;
        }

        let (op1, op1b) = self.horz_anchor(op1, dir1_ltr, pt, discard_left);
        let (op2, op2b) = self.horz_anchor(op2, dir2_ltr, pt, discard_left);

        if dir1_ltr == discard_left {
            self.op_mut(op1).prev = op2;
            self.op_mut(op2).next = op1;
            self.op_mut(op1b).next = op2b;
            self.op_mut(op2b).prev = op1b;
        } else {
            self.op_mut(op1).next = op2;
            self.op_mut(op2).prev = op1;
            self.op_mut(op1b).prev = op2b;
            self.op_mut(op2b).next = op1b;
        }
        true
    }

    pub(crate) fn join_common_edges(&mut self) {
        trace!("applying {} joins", self.joins.len());
        for i in 0..self.joins.len() {
            let mut join = self.joins[i];
            let r1 = self.get_out_rec(self.op(join.op1).idx);
            let mut r2 = self.get_out_rec(self.op(join.op2).idx);

            if self.rec(r1).pts == INVALID || self.rec(r2).pts == INVALID {
                continue;
            }
            if self.rec(r1).is_open || self.rec(r2).is_open {
                continue;
            }

            // Hole state must be chosen before the rings are spliced.
            let hole_state_rec = self.hole_state_rec(r1, r2);

            if !self.join_points(&mut join, r1, r2) {
                continue;
            }
            self.joins[i] = join;

            if r1 == r2 {
                // One ring became two.
                self.rec_mut(r1).pts = join.op1;
                self.rec_mut(r1).bottom_pt = INVALID;
                r2 = self.create_out_rec();
                self.rec_mut(r2).pts = join.op2;
                self.update_out_pt_idxs(r2);
                self.classify_split(r1, r2, true);
            } else {
                // Two rings became one.
                let survivor = self.rec(r1).idx;
                {
                    let rec2 = self.rec_mut(r2);
                    rec2.pts = INVALID;
                    rec2.bottom_pt = INVALID;
                    rec2.idx = survivor;
                }
                let hole = self.rec(hole_state_rec).is_hole;
                self.rec_mut(r1).is_hole = hole;
                if hole_state_rec == r2 {
                    let fl = self.rec(r2).first_left;
                    self.rec_mut(r1).first_left = fl;
                }
                self.rec_mut(r2).first_left = r1;
                if self.using_poly_tree {
                    self.fixup_first_lefts3(r2, r1);
                }
            }
        }
    }

    /// Sets hole state and containment after record `r1` was split off
    /// into new record `r2`. `reorient` re-applies the orientation rule to
    /// whichever ring turned out to be inner.
    fn classify_split(&mut self, r1: OutRecIdx, r2: OutRecIdx, reorient: bool) {
        let (pts1, pts2) = (self.rec(r1).pts, self.rec(r2).pts);
        if self.poly2_contains_poly1(pts2, pts1) {
            // r1 contains r2.
            let hole = !self.rec(r1).is_hole;
            self.rec_mut(r2).is_hole = hole;
            self.rec_mut(r2).first_left = r1;
            if self.using_poly_tree {
                self.fixup_first_lefts2(r2, r1);
            }
            if reorient {
                self.orient_ring(r2);
            }
        } else if self.poly2_contains_poly1(pts1, pts2) {
            // r2 contains r1.
            let hole = self.rec(r1).is_hole;
            self.rec_mut(r2).is_hole = hole;
            self.rec_mut(r1).is_hole = !hole;
            let fl = self.rec(r1).first_left;
            self.rec_mut(r2).first_left = fl;
            self.rec_mut(r1).first_left = r2;
            if self.using_poly_tree {
                self.fixup_first_lefts2(r1, r2);
            }
            if reorient {
                self.orient_ring(r1);
            }
        } else {
            let hole = self.rec(r1).is_hole;
            let fl = self.rec(r1).first_left;
            self.rec_mut(r2).is_hole = hole;
            self.rec_mut(r2).first_left = fl;
            if self.using_poly_tree {
                self.fixup_first_lefts1(r1, r2);
            }
        }
    }

    fn orient_ring(&mut self, r: OutRecIdx) {
        let pts = self.rec(r).pts;
        if (self.rec(r).is_hole ^ self.reverse_output) == (self.ring_area(pts) > 0.0) {
            self.reverse_poly_pt_links(pts);
        }
    }

    fn update_out_pt_idxs(&mut self, r: OutRecIdx) {
        let start = self.rec(r).pts;
        let mut op = start;
        loop {
            self.op_mut(op).idx = r;
            op = self.op(op).next;
            if op == start {
                break;
            }
        }
    }

    /// Re-parents records inside `new_rec` that pointed at `old_rec`.
    fn fixup_first_lefts1(&mut self, old_rec: OutRecIdx, new_rec: OutRecIdx) {
        for r in 0..self.poly_outs.len() as OutRecIdx {
            let first_left = self.parse_first_left(self.rec(r).first_left);
            if self.rec(r).pts != INVALID && first_left == old_rec {
                if self.poly2_contains_poly1(self.rec(r).pts, self.rec(new_rec).pts) {
                    self.rec_mut(r).first_left = new_rec;
                }
            }
        }
    }

    /// After a split into an inner and outer ring, re-parents records that
    /// now lie inside one of them.
    fn fixup_first_lefts2(&mut self, inner: OutRecIdx, outer: OutRecIdx) {
        let orfl = self.rec(outer).first_left;
        for r in 0..self.poly_outs.len() as OutRecIdx {
            let pts = self.rec(r).pts;
            if pts == INVALID || r == outer || r == inner {
                continue;
            }
            let first_left = self.parse_first_left(self.rec(r).first_left);
            if first_left != orfl && first_left != inner && first_left != outer {
                continue;
            }
            if self.poly2_contains_poly1(pts, self.rec(inner).pts) {
                self.rec_mut(r).first_left = inner;
            } else if self.poly2_contains_poly1(pts, self.rec(outer).pts) {
                self.rec_mut(r).first_left = outer;
            } else if self.rec(r).first_left == inner || self.rec(r).first_left == outer {
                self.rec_mut(r).first_left = orfl;
            }
        }
    }

    /// Re-parents without a containment test; used when records merge.
    fn fixup_first_lefts3(&mut self, old_rec: OutRecIdx, new_rec: OutRecIdx) {
        for r in 0..self.poly_outs.len() as OutRecIdx {
            let first_left = self.parse_first_left(self.rec(r).first_left);
            if self.rec(r).pts != INVALID && first_left == old_rec {
                self.rec_mut(r).first_left = new_rec;
            }
        }
    }

    /// Splits every ring that revisits one of its own vertices.
    pub(crate) fn do_simple_polygons(&mut self) {
        let mut i = 0;
        while i < self.poly_outs.len() {
            let r = i as OutRecIdx;
            i += 1;
            let mut op = self.rec(r).pts;
            if op == INVALID || self.rec(r).is_open {
                continue;
            }
            loop {
                let mut op2 = self.op(op).next;
                while op2 != self.rec(r).pts {
                    if self.op(op).pt == self.op(op2).pt && self.op(op2).next != op && self.op(op2).prev != op {
                        let op3 = self.op(op).prev;
                        let op4 = self.op(op2).prev;
                        self.op_mut(op).prev = op4;
                        self.op_mut(op4).next = op;
                        self.op_mut(op2).prev = op3;
                        self.op_mut(op3).next = op2;

                        self.rec_mut(r).pts = op;
                        let r2 = self.create_out_rec();
                        self.rec_mut(r2).pts = op2;
                        self.update_out_pt_idxs(r2);
                        self.classify_split(r, r2, false);
                        op2 = op;
                    }
                    op2 = self.op(op2).next;
                }
                op = self.op(op).next;
                if op == self.rec(r).pts {
                    break;
                }
            }
        }
    }
}
