// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (ProcessHorizontals)
//
// Horizontal edges.
//
// A horizontal is swept along its own length from `bot.x` to `top.x`,
// crossing every edge it passes. Consecutive horizontals in one bound are
// processed as a single run. Strictly-simple maxima lying on the
// horizontal become extra output vertices so that touching contours can
// later be separated.

use super::Clipper;
use crate::arena::INVALID;
use crate::edge::{slopes_equal_edges, EdgeIdx};
use crate::geom::{horz_segments_overlap, CInt, IntPoint};

/// Travel direction of a horizontal and the X span it covers.
#[derive(Copy, Clone, Debug)]
struct HorzSpan {
    left_to_right: bool,
    left: CInt,
    right: CInt,
}

impl Clipper {
    pub(crate) fn process_horizontals(&mut self) {
        while let Some(horz) = self.pop_edge_from_sel() {
            self.process_horizontal(horz);
        }
    }

    fn horz_span(&self, e: EdgeIdx) -> HorzSpan {
        let ed = self.edge(e);
        if ed.bot.x < ed.top.x {
            HorzSpan {
                left_to_right: true,
                left: ed.bot.x,
                right: ed.top.x,
            }
        } else {
            HorzSpan {
                left_to_right: false,
                left: ed.top.x,
                right: ed.bot.x,
            }
        }
    }

    /// Joins the output of `horz` with every pending horizontal it overlaps,
    /// and records a ghost join for horizontals inserted later in this beam.
    fn join_overlapping_horizontals(&mut self, horz: EdgeIdx, op1: u32, ghost_off: IntPoint) {
        let (hb, ht) = (self.edge(horz).bot.x, self.edge(horz).top.x);
        let mut e_next_horz = self.sorted_edges;
        while e_next_horz != INVALID {
            let en = self.edge(e_next_horz);
            if en.out_idx.is_assigned() && horz_segments_overlap(hb, ht, en.bot.x, en.top.x) {
                let off = en.top;
                let op2 = self.get_last_out_pt(e_next_horz);
                self.add_join(op2, op1, off);
            }
            e_next_horz = self.edge(e_next_horz).next_in_sel;
        }
        self.add_ghost_join(op1, ghost_off);
    }

    fn process_horizontal(&mut self, mut horz: EdgeIdx) {
        let is_open = self.edge(horz).wind_delta == 0;
        let mut span = self.horz_span(horz);

        let mut e_last_horz = horz;
        loop {
            let next = self.edge(e_last_horz).next_in_lml;
            if next == INVALID || !self.edge(next).is_horizontal() {
                break;
            }
            e_last_horz = next;
        }
        let e_max_pair = if self.edge(e_last_horz).next_in_lml == INVALID {
            self.get_maxima_pair(e_last_horz)
        } else {
            INVALID
        };

        // Cursors into the sorted maxima: `max_fwd` indexes the next one to
        // the right, `max_rev` counts those still to the left.
        let mut max_fwd = 0usize;
        let mut max_rev = self.maxima.len();
        if !self.maxima.is_empty() {
            let bot_x = self.edge(horz).bot.x;
            let last_top_x = self.edge(e_last_horz).top.x;
            while max_fwd < self.maxima.len() && self.maxima[max_fwd] <= bot_x {
                max_fwd += 1;
            }
            if max_fwd < self.maxima.len() && self.maxima[max_fwd] >= last_top_x {
                max_fwd = self.maxima.len();
            }
            while max_rev > 0 && self.maxima[max_rev - 1] > bot_x {
                max_rev -= 1;
            }
            if max_rev > 0 && self.maxima[max_rev - 1] <= last_top_x {
                max_rev = 0;
            }
        }

        let mut op1 = INVALID;

        loop {
            let is_last_horz = horz == e_last_horz;
            let mut e = self.next_in_ael_dir(horz, span.left_to_right);
            while e != INVALID {
                if !self.maxima.is_empty() {
                    let curr_x = self.edge(e).curr.x;
                    let horz_y = self.edge(horz).bot.y;
                    let emit = self.edge(horz).out_idx.is_assigned() && !is_open;
                    if span.left_to_right {
                        while max_fwd < self.maxima.len() && self.maxima[max_fwd] < curr_x {
                            if emit {
                                let x = self.maxima[max_fwd];
                                self.add_out_pt(horz, IntPoint::new(x, horz_y));
                            }
                            max_fwd += 1;
                        }
                    } else {
                        while max_rev > 0 && self.maxima[max_rev - 1] > curr_x {
                            if emit {
                                let x = self.maxima[max_rev - 1];
                                self.add_out_pt(horz, IntPoint::new(x, horz_y));
                            }
                            max_rev -= 1;
                        }
                    }
                }

                let curr_x = self.edge(e).curr.x;
                if (span.left_to_right && curr_x > span.right) || (!span.left_to_right && curr_x < span.left) {
                    break;
                }

                // End of an intermediate horizontal: smaller dx lies to the
                // right of larger dx above it.
                let next_lml = self.edge(horz).next_in_lml;
                if curr_x == self.edge(horz).top.x
                    && next_lml != INVALID
                    && self.edge(e).dx < self.edge(next_lml).dx
                {
                    break;
                }

                if self.edge(horz).out_idx.is_assigned() && !is_open {
                    let curr = self.edge(e).curr;
                    op1 = self.add_out_pt(horz, curr);
                    let bot = self.edge(horz).bot;
                    self.join_overlapping_horizontals(horz, op1, bot);
                }

                if e == e_max_pair && is_last_horz {
                    if self.edge(horz).out_idx.is_assigned() {
                        let top = self.edge(horz).top;
                        self.add_local_max_poly(horz, e_max_pair, top);
                    }
                    self.delete_from_ael(horz);
                    self.delete_from_ael(e_max_pair);
                    return;
                }

                let pt = IntPoint::new(self.edge(e).curr.x, self.edge(horz).curr.y);
                if span.left_to_right {
                    self.intersect_edges(horz, e, pt);
                } else {
                    self.intersect_edges(e, horz, pt);
                }
                let e_next = self.next_in_ael_dir(e, span.left_to_right);
                self.swap_positions_in_ael(horz, e);
                e = e_next;
            }

            let next_lml = self.edge(horz).next_in_lml;
            if next_lml == INVALID || !self.edge(next_lml).is_horizontal() {
                break;
            }
            horz = self.update_edge_into_ael(horz);
            if self.edge(horz).out_idx.is_assigned() {
                let bot = self.edge(horz).bot;
                self.add_out_pt(horz, bot);
            }
            span = self.horz_span(horz);
        }

        if self.edge(horz).out_idx.is_assigned() && op1 == INVALID {
            op1 = self.get_last_out_pt(horz);
            let top = self.edge(horz).top;
            self.join_overlapping_horizontals(horz, op1, top);
        }

        if self.edge(horz).next_in_lml != INVALID {
            if self.edge(horz).out_idx.is_assigned() {
                let top = self.edge(horz).top;
                let op1 = self.add_out_pt(horz, top);
                horz = self.update_edge_into_ael(horz);
                if self.edge(horz).wind_delta == 0 {
                    return;
                }
                // No longer horizontal: join with a collinear neighbour
                // starting at the same point.
                let prev = self.edge(horz).prev_in_ael;
                let next = self.edge(horz).next_in_ael;
                if self.joinable_neighbour(horz, prev) {
                    let bot = self.edge(horz).bot;
                    let op2 = self.add_out_pt(prev, bot);
                    let top = self.edge(horz).top;
                    self.add_join(op1, op2, top);
                } else if self.joinable_neighbour(horz, next) {
                    let bot = self.edge(horz).bot;
                    let op2 = self.add_out_pt(next, bot);
                    let top = self.edge(horz).top;
                    self.add_join(op1, op2, top);
                }
            } else {
                self.update_edge_into_ael(horz);
            }
        } else {
            if self.edge(horz).out_idx.is_assigned() {
                let top = self.edge(horz).top;
                self.add_out_pt(horz, top);
            }
            self.delete_from_ael(horz);
        }
    }

    fn joinable_neighbour(&self, e: EdgeIdx, other: EdgeIdx) -> bool {
        if other == INVALID {
            return false;
        }
        let (ed, o) = (self.edge(e), self.edge(other));
        o.curr == ed.bot
            && o.wind_delta != 0
            && o.out_idx.is_assigned()
            && o.curr.y > o.top.y
            && slopes_equal_edges(ed, o, self.base.range)
    }
}
