// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (TEdge, LocalMinimum)
//
// Sweep edges and local minima.
//
// Y grows downward: an edge's `bot` has the larger Y and `top` the smaller,
// and the sweep climbs from bottom to top. Each input contour becomes a
// circular ring of edges (`next`/`prev`); the ring is then cut into bounds
// chained through `next_in_lml`. The active and sorted edge lists are
// threaded through the same records via `*_in_ael` / `*_in_sel` links.

use crate::arena::INVALID;
use crate::clipper::PolyType;
use crate::geom::{round, CInt, IntPoint, RangeMode};

pub type EdgeIdx = u32;
pub type OutRecIdx = u32;

/// Slope assigned to horizontal edges.
pub const HORIZONTAL: f64 = -1.0e40;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeSide {
    Left,
    Right,
}

/// Link from an edge to the output contour it is currently building.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutIdx {
    Unassigned,
    /// Terminal edge of an open path; never enters the sweep.
    Skip,
    Rec(OutRecIdx),
}

impl OutIdx {
    #[inline]
    pub fn rec(self) -> Option<OutRecIdx> {
        match self {
            OutIdx::Rec(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn is_assigned(self) -> bool {
        matches!(self, OutIdx::Rec(_))
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub bot: IntPoint,
    /// Position at the current sweep Y.
    pub curr: IntPoint,
    pub top: IntPoint,
    pub dx: f64,
    pub poly_type: PolyType,
    pub side: EdgeSide,
    /// +1 / -1 by ring direction, 0 for open paths.
    pub wind_delta: i32,
    pub wind_cnt: i32,
    /// Winding of the other polygon type.
    pub wind_cnt2: i32,
    pub out_idx: OutIdx,
    pub next: EdgeIdx,
    pub prev: EdgeIdx,
    pub next_in_lml: EdgeIdx,
    pub next_in_ael: EdgeIdx,
    pub prev_in_ael: EdgeIdx,
    pub next_in_sel: EdgeIdx,
    pub prev_in_sel: EdgeIdx,
}

impl Default for Edge {
    fn default() -> Self {
        Edge {
            bot: IntPoint::default(),
            curr: IntPoint::default(),
            top: IntPoint::default(),
            dx: 0.0,
            poly_type: PolyType::Subject,
            side: EdgeSide::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: OutIdx::Unassigned,
            next: INVALID,
            prev: INVALID,
            next_in_lml: INVALID,
            next_in_ael: INVALID,
            prev_in_ael: INVALID,
            next_in_sel: INVALID,
            prev_in_sel: INVALID,
        }
    }
}

impl Edge {
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.dx == HORIZONTAL
    }

    /// X of this edge's supporting line at `y`.
    #[inline]
    pub fn top_x(&self, y: CInt) -> CInt {
        if y == self.top.y {
            self.top.x
        } else {
            self.bot.x + round(self.dx * (y - self.bot.y) as f64)
        }
    }

    /// Orients the edge from its stored vertex toward `next_pt` and computes dx.
    pub fn init_bounds(&mut self, next_pt: IntPoint, poly_type: PolyType) {
        if self.curr.y >= next_pt.y {
            self.bot = self.curr;
            self.top = next_pt;
        } else {
            self.top = self.curr;
            self.bot = next_pt;
        }
        self.set_dx();
        self.poly_type = poly_type;
    }

    pub fn set_dx(&mut self) {
        let dy = self.top.y - self.bot.y;
        self.dx = if dy == 0 {
            HORIZONTAL
        } else {
            (self.top.x - self.bot.x) as f64 / dy as f64
        };
    }

    /// Swaps ends of a horizontal edge so that `bot` meets the preceding edge.
    pub fn reverse_horizontal(&mut self) {
        std::mem::swap(&mut self.top.x, &mut self.bot.x);
    }
}

/// Exact parallel test of two edges' supporting lines.
#[inline]
pub fn slopes_equal_edges(e1: &Edge, e2: &Edge, mode: RangeMode) -> bool {
    crate::geom::cross_sign(
        e1.top.y - e1.bot.y,
        e2.top.x - e2.bot.x,
        e1.top.x - e1.bot.x,
        e2.top.y - e2.bot.y,
        mode,
    ) == std::cmp::Ordering::Equal
}

/// Slope of pt1 -> pt2 in the same convention as `Edge::dx`.
#[inline]
pub fn get_dx(pt1: IntPoint, pt2: IntPoint) -> f64 {
    if pt1.y == pt2.y {
        HORIZONTAL
    } else {
        (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
    }
}

/// Ordering predicate for AEL insertion: true if `e2` belongs left of `e1`.
pub fn e2_inserts_before_e1(e1: &Edge, e2: &Edge) -> bool {
    if e2.curr.x == e1.curr.x {
        if e2.top.y > e1.top.y {
            e2.top.x < e1.top_x(e2.top.y)
        } else {
            e1.top.x > e2.top_x(e1.top.y)
        }
    } else {
        e2.curr.x < e1.curr.x
    }
}

/// Crossing point of two edges, clamped into the current scanbeam.
pub fn intersect_point(e1: &Edge, e2: &Edge) -> IntPoint {
    let mut ip = IntPoint::default();
    if e1.dx == e2.dx {
        ip.y = e1.curr.y;
        ip.x = e1.top_x(ip.y);
        return ip;
    } else if e1.dx == 0.0 {
        ip.x = e1.bot.x;
        if e2.is_horizontal() {
            ip.y = e2.bot.y;
        } else {
            let b2 = e2.bot.y as f64 - (e2.bot.x as f64 / e2.dx);
            ip.y = round(ip.x as f64 / e2.dx + b2);
        }
    } else if e2.dx == 0.0 {
        ip.x = e2.bot.x;
        if e1.is_horizontal() {
            ip.y = e1.bot.y;
        } else {
            let b1 = e1.bot.y as f64 - (e1.bot.x as f64 / e1.dx);
            ip.y = round(ip.x as f64 / e1.dx + b1);
        }
    } else {
        let b1 = e1.bot.x as f64 - e1.bot.y as f64 * e1.dx;
        let b2 = e2.bot.x as f64 - e2.bot.y as f64 * e2.dx;
        let q = (b2 - b1) / (e1.dx - e2.dx);
        ip.y = round(q);
        ip.x = if e1.dx.abs() < e2.dx.abs() {
            round(e1.dx * q + b1)
        } else {
            round(e2.dx * q + b2)
        };
    }

    if ip.y < e1.top.y || ip.y < e2.top.y {
        ip.y = e1.top.y.max(e2.top.y);
        ip.x = if e1.dx.abs() < e2.dx.abs() {
            e1.top_x(ip.y)
        } else {
            e2.top_x(ip.y)
        };
    }
    // Never below the bottom of the scanbeam.
    if ip.y > e1.curr.y {
        ip.y = e1.curr.y;
        ip.x = if e1.dx.abs() > e2.dx.abs() {
            e2.top_x(ip.y)
        } else {
            e1.top_x(ip.y)
        };
    }
    ip
}

/// One local minimum: the Y where a left and/or right bound start upward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LocalMinimum {
    pub y: CInt,
    pub left_bound: EdgeIdx,
    pub right_bound: EdgeIdx,
}
