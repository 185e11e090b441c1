// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (InsertLocalMinimaIntoAEL, ProcessEdgesAtTopOfScanbeam)
//
// Scanbeam boundaries.
//
// At the bottom of a beam, local minima starting there enter the AEL. At
// the top, edges ending there are either retired (maxima) or replaced by
// the next edge of their bound (intermediate vertices).

use super::Clipper;
use crate::arena::INVALID;
use crate::edge::{EdgeIdx, OutIdx};
use crate::geom::{horz_segments_overlap, slopes_equal4, CInt, IntPoint};

impl Clipper {
    pub(crate) fn insert_local_minima_into_ael(&mut self, bot_y: CInt) {
        while let Some(lm) = self.base.pop_local_minimum(bot_y) {
            let (lb, rb) = (lm.left_bound, lm.right_bound);
            let mut op1 = INVALID;

            if lb == INVALID {
                self.insert_edge_into_ael(rb, INVALID);
                self.set_winding_count(rb);
                if self.is_contributing(rb) {
                    let bot = self.edge(rb).bot;
                    op1 = self.add_out_pt(rb, bot);
                }
            } else if rb == INVALID {
                self.insert_edge_into_ael(lb, INVALID);
                self.set_winding_count(lb);
                if self.is_contributing(lb) {
                    let bot = self.edge(lb).bot;
                    op1 = self.add_out_pt(lb, bot);
                }
                let top_y = self.edge(lb).top.y;
                self.scanbeam.insert(top_y);
            } else {
                self.insert_edge_into_ael(lb, INVALID);
                self.insert_edge_into_ael(rb, lb);
                self.set_winding_count(lb);
                let (wc, wc2) = (self.edge(lb).wind_cnt, self.edge(lb).wind_cnt2);
                self.edge_mut(rb).wind_cnt = wc;
                self.edge_mut(rb).wind_cnt2 = wc2;
                if self.is_contributing(lb) {
                    let bot = self.edge(lb).bot;
                    op1 = self.add_local_min_poly(lb, rb, bot);
                }
                let top_y = self.edge(lb).top.y;
                self.scanbeam.insert(top_y);
            }

            if rb != INVALID {
                if self.edge(rb).is_horizontal() {
                    self.add_edge_to_sel(rb);
                    let next = self.edge(rb).next_in_lml;
                    if next != INVALID {
                        let top_y = self.edge(next).top.y;
                        self.scanbeam.insert(top_y);
                    }
                } else {
                    let top_y = self.edge(rb).top.y;
                    self.scanbeam.insert(top_y);
                }
            }

            if lb == INVALID || rb == INVALID {
                continue;
            }

            // A new horizontal overlapping a horizontal finished earlier in
            // this beam shares an edge with it.
            if op1 != INVALID
                && self.edge(rb).is_horizontal()
                && !self.ghost_joins.is_empty()
                && self.edge(rb).wind_delta != 0
            {
                let (rb_bot_x, rb_top_x) = (self.edge(rb).bot.x, self.edge(rb).top.x);
                for i in 0..self.ghost_joins.len() {
                    let ghost = self.ghost_joins[i];
                    if horz_segments_overlap(self.op(ghost.op1).pt.x, ghost.off_pt.x, rb_bot_x, rb_top_x) {
                        self.add_join(ghost.op1, op1, ghost.off_pt);
                    }
                }
            }

            let lb_prev = self.edge(lb).prev_in_ael;
            if op1 != INVALID && self.edge(lb).out_idx.is_assigned() && lb_prev != INVALID {
                let (p, l) = (self.edge(lb_prev), self.edge(lb));
                if p.curr.x == l.bot.x
                    && p.out_idx.is_assigned()
                    && slopes_equal4(p.bot, p.top, l.curr, l.top, self.base.range)
                    && l.wind_delta != 0
                    && p.wind_delta != 0
                {
                    let (bot, top) = (l.bot, l.top);
                    let op2 = self.add_out_pt(lb_prev, bot);
                    self.add_join(op1, op2, top);
                }
            }

            if self.edge(lb).next_in_ael != rb {
                let rb_prev = self.edge(rb).prev_in_ael;
                if op1 != INVALID && self.edge(rb).out_idx.is_assigned() && rb_prev != INVALID {
                    let (p, r) = (self.edge(rb_prev), self.edge(rb));
                    if p.out_idx.is_assigned()
                        && slopes_equal4(p.curr, p.top, r.curr, r.top, self.base.range)
                        && r.wind_delta != 0
                        && p.wind_delta != 0
                    {
                        let (bot, top) = (r.bot, r.top);
                        let op2 = self.add_out_pt(rb_prev, bot);
                        self.add_join(op1, op2, top);
                    }
                }

                // Edges already in the AEL between the two bounds cross the
                // right bound at the minimum.
                let lb_curr = self.edge(lb).curr;
                let mut e = self.edge(lb).next_in_ael;
                while e != INVALID && e != rb {
                    self.intersect_edges(rb, e, lb_curr);
                    e = self.edge(e).next_in_ael;
                }
            }
        }
    }

    #[inline]
    fn is_maxima(&self, e: EdgeIdx, y: CInt) -> bool {
        let ed = self.edge(e);
        ed.top.y == y && ed.next_in_lml == INVALID
    }

    #[inline]
    fn is_intermediate(&self, e: EdgeIdx, y: CInt) -> bool {
        let ed = self.edge(e);
        ed.top.y == y && ed.next_in_lml != INVALID
    }

    /// The other edge ending at `e`'s top vertex, if that vertex is a
    /// local maximum.
    pub(crate) fn get_maxima_pair(&self, e: EdgeIdx) -> EdgeIdx {
        let ed = self.edge(e);
        let next = self.edge(ed.next);
        if next.top == ed.top && next.next_in_lml == INVALID {
            return ed.next;
        }
        let prev = self.edge(ed.prev);
        if prev.top == ed.top && prev.next_in_lml == INVALID {
            return ed.prev;
        }
        INVALID
    }

    /// As `get_maxima_pair`, but only a pair that is still active (or is
    /// a pending horizontal).
    fn get_maxima_pair_ex(&self, e: EdgeIdx) -> EdgeIdx {
        let pair = self.get_maxima_pair(e);
        if pair == INVALID {
            return INVALID;
        }
        let p = self.edge(pair);
        if p.out_idx == OutIdx::Skip || (p.next_in_ael == p.prev_in_ael && !p.is_horizontal()) {
            INVALID
        } else {
            pair
        }
    }

    /// Replaces `e` in the AEL by the next edge of its bound, carrying over
    /// its output link and windings. Returns the replacement.
    pub(crate) fn update_edge_into_ael(&mut self, e: EdgeIdx) -> EdgeIdx {
        let next = self.edge(e).next_in_lml;
        assert!(next != INVALID, "update_edge_into_ael called on the last edge of a bound");
        let old = self.edge(e).clone();
        if old.prev_in_ael != INVALID {
            self.edge_mut(old.prev_in_ael).next_in_ael = next;
        } else {
            self.active_edges = next;
        }
        if old.next_in_ael != INVALID {
            self.edge_mut(old.next_in_ael).prev_in_ael = next;
        }
        let ne = self.edge_mut(next);
        ne.out_idx = old.out_idx;
        ne.side = old.side;
        ne.wind_delta = old.wind_delta;
        ne.wind_cnt = old.wind_cnt;
        ne.wind_cnt2 = old.wind_cnt2;
        ne.curr = ne.bot;
        ne.prev_in_ael = old.prev_in_ael;
        ne.next_in_ael = old.next_in_ael;
        if !ne.is_horizontal() {
            let top_y = ne.top.y;
            self.scanbeam.insert(top_y);
        }
        next
    }

    pub(crate) fn process_edges_at_top_of_scanbeam(&mut self, top_y: CInt) {
        let mut e = self.active_edges;
        while e != INVALID {
            // Maxima are treated as bent horizontals, except where the pair
            // really is horizontal.
            let mut is_maxima_edge = self.is_maxima(e, top_y);
            if is_maxima_edge {
                let pair = self.get_maxima_pair_ex(e);
                is_maxima_edge = pair == INVALID || !self.edge(pair).is_horizontal();
            }

            if is_maxima_edge {
                if self.strict_simple {
                    let x = self.edge(e).top.x;
                    self.maxima.push(x);
                }
                let prev = self.edge(e).prev_in_ael;
                self.do_maxima(e);
                e = if prev == INVALID {
                    self.active_edges
                } else {
                    self.edge(prev).next_in_ael
                };
                continue;
            }

            let next_lml = self.edge(e).next_in_lml;
            if self.is_intermediate(e, top_y) && self.edge(next_lml).is_horizontal() {
                e = self.update_edge_into_ael(e);
                if self.edge(e).out_idx.is_assigned() {
                    let bot = self.edge(e).bot;
                    self.add_out_pt(e, bot);
                }
                self.add_edge_to_sel(e);
            } else {
                let x = self.edge(e).top_x(top_y);
                self.edge_mut(e).curr = IntPoint::new(x, top_y);
            }

            // Touching edges both get a vertex here so the contours can be
            // separated afterwards.
            if self.strict_simple {
                let prev = self.edge(e).prev_in_ael;
                if prev != INVALID {
                    let (ed, p) = (self.edge(e), self.edge(prev));
                    if ed.out_idx.is_assigned()
                        && ed.wind_delta != 0
                        && p.out_idx.is_assigned()
                        && p.curr.x == ed.curr.x
                        && p.wind_delta != 0
                    {
                        let pt = ed.curr;
                        let op = self.add_out_pt(prev, pt);
                        let op2 = self.add_out_pt(e, pt);
                        self.add_join(op, op2, pt);
                    }
                }
            }

            e = self.edge(e).next_in_ael;
        }

        self.maxima.sort_unstable();
        self.process_horizontals();
        self.maxima.clear();

        // Promote intermediate vertices.
        let mut e = self.active_edges;
        while e != INVALID {
            if self.is_intermediate(e, top_y) {
                let op = if self.edge(e).out_idx.is_assigned() {
                    let top = self.edge(e).top;
                    self.add_out_pt(e, top)
                } else {
                    INVALID
                };
                e = self.update_edge_into_ael(e);

                // Output contours sharing an edge are joined later.
                if op != INVALID {
                    let prev = self.edge(e).prev_in_ael;
                    let next = self.edge(e).next_in_ael;
                    if self.shares_edge_with(e, prev) {
                        let (bot, top) = (self.edge(e).bot, self.edge(e).top);
                        let op2 = self.add_out_pt(prev, bot);
                        self.add_join(op, op2, top);
                    } else if self.shares_edge_with(e, next) {
                        let (bot, top) = (self.edge(e).bot, self.edge(e).top);
                        let op2 = self.add_out_pt(next, bot);
                        self.add_join(op, op2, top);
                    }
                }
            }
            e = self.edge(e).next_in_ael;
        }
    }

    fn shares_edge_with(&self, e: EdgeIdx, other: EdgeIdx) -> bool {
        if other == INVALID {
            return false;
        }
        let (ed, o) = (self.edge(e), self.edge(other));
        o.curr == ed.bot
            && o.out_idx.is_assigned()
            && o.curr.y > o.top.y
            && slopes_equal4(ed.curr, ed.top, o.curr, o.top, self.base.range)
            && ed.wind_delta != 0
            && o.wind_delta != 0
    }

    fn do_maxima(&mut self, e: EdgeIdx) {
        let pair = self.get_maxima_pair_ex(e);
        if pair == INVALID {
            if self.edge(e).out_idx.is_assigned() {
                let top = self.edge(e).top;
                self.add_out_pt(e, top);
            }
            self.delete_from_ael(e);
            return;
        }

        let top = self.edge(e).top;
        let mut next = self.edge(e).next_in_ael;
        while next != INVALID && next != pair {
            self.intersect_edges(e, next, top);
            self.swap_positions_in_ael(e, next);
            next = self.edge(e).next_in_ael;
        }

        let (o1, o2) = (self.edge(e).out_idx, self.edge(pair).out_idx);
        if o1 == OutIdx::Unassigned && o2 == OutIdx::Unassigned {
            self.delete_from_ael(e);
            self.delete_from_ael(pair);
        } else if o1.is_assigned() && o2.is_assigned() {
            self.add_local_max_poly(e, pair, top);
            self.delete_from_ael(e);
            self.delete_from_ael(pair);
        } else if self.edge(e).wind_delta == 0 {
            for edge in [e, pair] {
                if self.edge(edge).out_idx.is_assigned() {
                    self.add_out_pt(edge, top);
                    self.edge_mut(edge).out_idx = OutIdx::Unassigned;
                }
                self.delete_from_ael(edge);
            }
        } else {
            panic!("unbalanced local maximum at ({}, {})", top.x, top.y);
        }
    }
}
