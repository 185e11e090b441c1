// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp/hpp (ClipperBase)
//
// Path ingestion.
//
// Each added path is turned into a ring of edges, cleaned of duplicate and
// (optionally) collinear vertices, and split into monotone bounds. Every
// pair of bounds meeting at a low point is recorded as a LocalMinimum.
// Nothing here depends on the clip type or fill rules; the sweep reads the
// prepared minima list after `reset`.

use log::{debug, warn};

use crate::arena::{Arena, INVALID};
use crate::clipper::PolyType;
use crate::edge::{Edge, EdgeIdx, EdgeSide, LocalMinimum, OutIdx};
use crate::error::{ClipError, ClipResult};
use crate::geom::{pt2_is_between_pt1_and_pt3, slopes_equal3, IntPoint, IntRect, Path, RangeMode};

/// Result of walking one bound.
enum BoundOutcome {
    /// The bound is complete; carries the first edge beyond it.
    Done(EdgeIdx),
    /// A skip edge split the bound; the remainder starts a new open minimum.
    Split { rest: EdgeIdx, minimum: LocalMinimum },
}

pub struct ClipperBase {
    pub(crate) edges: Arena<Edge>,
    pub(crate) minima_list: Vec<LocalMinimum>,
    pub(crate) current_lm: usize,
    pub(crate) range: RangeMode,
    pub(crate) has_open_paths: bool,
    pub(crate) preserve_collinear: bool,
}

impl ClipperBase {
    pub fn new() -> Self {
        ClipperBase {
            edges: Arena::new(),
            minima_list: Vec::new(),
            current_lm: 0,
            range: RangeMode::Low,
            has_open_paths: false,
            preserve_collinear: false,
        }
    }

    /// Adds one path. Returns `Ok(false)` when the path is degenerate and
    /// was dropped.
    pub fn add_path(&mut self, path: &[IntPoint], poly_type: PolyType, closed: bool) -> ClipResult<bool> {
        if !closed && poly_type == PolyType::Clip {
            return Err(ClipError::OpenPathNotSupported);
        }

        if path.is_empty() {
            debug!("add_path: dropping empty path");
            return Ok(false);
        }
        let mut high_i = path.len() - 1;
        if closed {
            while high_i > 0 && path[high_i] == path[0] {
                high_i -= 1;
            }
        }
        while high_i > 0 && path[high_i] == path[high_i - 1] {
            high_i -= 1;
        }
        if (closed && high_i < 2) || (!closed && high_i < 1) {
            debug!("add_path: dropping degenerate path of {} points", path.len());
            return Ok(false);
        }

        let mut range = self.range;
        for pt in &path[..=high_i] {
            range = range.widen_for(*pt)?;
        }
        if range != self.range {
            warn!("coordinates exceed the 32-bit range; using 128-bit slope tests");
            self.range = range;
        }

        // 1. Basic edge ring, one edge per vertex.
        let ids: Vec<EdgeIdx> = (0..=high_i)
            .map(|i| {
                self.edges.alloc(Edge {
                    curr: path[i],
                    ..Edge::default()
                })
            })
            .collect();
        let n = ids.len();
        for i in 0..n {
            let e = &mut self.edges[ids[i]];
            e.next = ids[(i + 1) % n];
            e.prev = ids[(i + n - 1) % n];
        }

        // 2. Remove duplicate vertices and, for closed paths, collinear ones.
        let mut e_start = ids[0];
        let mut e = e_start;
        let mut e_loop_stop = e_start;
        loop {
            let next = self.edges[e].next;
            if self.edges[e].curr == self.edges[next].curr && (closed || next != e_start) {
                if e == next {
                    break;
                }
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e_loop_stop = e;
                continue;
            }
            let prev = self.edges[e].prev;
            if prev == next {
                break;
            }
            if closed {
                let (p, c, nx) = (self.edges[prev].curr, self.edges[e].curr, self.edges[next].curr);
                if slopes_equal3(p, c, nx, self.range)
                    && (!self.preserve_collinear || !pt2_is_between_pt1_and_pt3(p, c, nx))
                {
                    if e == e_start {
                        e_start = next;
                    }
                    e = self.remove_edge(e);
                    e = self.edges[e].prev;
                    e_loop_stop = e;
                    continue;
                }
            }
            e = self.edges[e].next;
            if e == e_loop_stop || (!closed && self.edges[e].next == e_start) {
                break;
            }
        }

        if (!closed && e == self.edges[e].next) || (closed && self.edges[e].prev == self.edges[e].next) {
            self.free_ring(e);
            debug!("add_path: path collapsed during cleanup");
            return Ok(false);
        }

        if !closed {
            self.has_open_paths = true;
            let last = self.edges[e_start].prev;
            self.edges[last].out_idx = OutIdx::Skip;
        }

        // 3. Second stage: orient edges and compute slopes.
        let mut is_flat = true;
        let start_y = self.edges[e_start].curr.y;
        e = e_start;
        loop {
            let next = self.edges[e].next;
            let next_pt = self.edges[next].curr;
            self.edges[e].init_bounds(next_pt, poly_type);
            e = next;
            if is_flat && self.edges[e].curr.y != start_y {
                is_flat = false;
            }
            if e == e_start {
                break;
            }
        }

        // 4. Register the bounds as local minima.
        if is_flat {
            if closed {
                self.free_ring(e);
                debug!("add_path: dropping zero-area closed path");
                return Ok(false);
            }
            let last = self.edges[e].prev;
            self.edges[last].out_idx = OutIdx::Skip;
            let lm = LocalMinimum {
                y: self.edges[e].bot.y,
                left_bound: INVALID,
                right_bound: e,
            };
            self.edges[e].side = EdgeSide::Right;
            self.edges[e].wind_delta = 0;
            loop {
                let prev = self.edges[e].prev;
                if self.edges[e].bot.x != self.edges[prev].top.x {
                    self.edges[e].reverse_horizontal();
                }
                let next = self.edges[e].next;
                if self.edges[next].out_idx == OutIdx::Skip {
                    break;
                }
                self.edges[e].next_in_lml = next;
                e = next;
            }
            self.minima_list.push(lm);
            return Ok(true);
        }

        let mut e_min = INVALID;
        // Open paths whose ends meet would otherwise loop forever below.
        let prev = self.edges[e].prev;
        if self.edges[prev].bot == self.edges[prev].top {
            e = self.edges[e].next;
        }

        loop {
            e = self.find_next_loc_min(e);
            if e == e_min {
                break;
            }
            if e_min == INVALID {
                e_min = e;
            }

            // e and e.prev share a local minimum (left-aligned if horizontal).
            let prev = self.edges[e].prev;
            let (mut left, mut right, left_is_forward) = if self.edges[e].dx < self.edges[prev].dx {
                (prev, e, false)
            } else {
                (e, prev, true)
            };
            let y = self.edges[e].bot.y;

            let wd = if !closed {
                0
            } else if self.edges[left].next == right {
                -1
            } else {
                1
            };
            self.edges[left].wind_delta = wd;
            self.edges[right].wind_delta = -wd;

            let mut e_left = self.process_bound(left, left_is_forward);
            if self.edges[e_left].out_idx == OutIdx::Skip {
                e_left = self.process_bound(e_left, left_is_forward);
            }
            let mut e_right = self.process_bound(right, !left_is_forward);
            if self.edges[e_right].out_idx == OutIdx::Skip {
                e_right = self.process_bound(e_right, !left_is_forward);
            }

            if self.edges[left].out_idx == OutIdx::Skip {
                left = INVALID;
            } else if self.edges[right].out_idx == OutIdx::Skip {
                right = INVALID;
            }
            self.minima_list.push(LocalMinimum {
                y,
                left_bound: left,
                right_bound: right,
            });
            e = if left_is_forward { e_left } else { e_right };
        }
        Ok(true)
    }

    /// Adds several paths; true if at least one was kept.
    pub fn add_paths(&mut self, paths: &[Path], poly_type: PolyType, closed: bool) -> ClipResult<bool> {
        let mut any = false;
        for p in paths {
            if self.add_path(p, poly_type, closed)? {
                any = true;
            }
        }
        Ok(any)
    }

    /// Drops every ingested path.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.minima_list.clear();
        self.current_lm = 0;
        self.range = RangeMode::Low;
        self.has_open_paths = false;
    }

    /// Rewinds the prepared edges so the sweep can run over them again.
    pub fn reset(&mut self) {
        self.current_lm = 0;
        if self.minima_list.is_empty() {
            return;
        }
        self.minima_list.sort_by(|a, b| b.y.cmp(&a.y));
        let ids: Vec<EdgeIdx> = self.edges.live_indices().collect();
        for id in ids {
            let e = &mut self.edges[id];
            e.curr = e.bot;
            if e.out_idx != OutIdx::Skip {
                e.out_idx = OutIdx::Unassigned;
            }
            e.next_in_ael = INVALID;
            e.prev_in_ael = INVALID;
            e.next_in_sel = INVALID;
            e.prev_in_sel = INVALID;
        }
        for lm in &self.minima_list {
            if lm.left_bound != INVALID {
                self.edges[lm.left_bound].side = EdgeSide::Left;
            }
            if lm.right_bound != INVALID {
                self.edges[lm.right_bound].side = EdgeSide::Right;
            }
        }
    }

    pub(crate) fn pop_local_minimum(&mut self, y: i64) -> Option<LocalMinimum> {
        match self.minima_list.get(self.current_lm) {
            Some(lm) if lm.y == y => {
                self.current_lm += 1;
                Some(*lm)
            }
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn local_minima_pending(&self) -> bool {
        self.current_lm < self.minima_list.len()
    }

    /// Bounding box of everything ingested, without running the sweep.
    pub fn get_bounds(&self) -> IntRect {
        let mut result: Option<IntRect> = None;
        let mut grow = |pt: IntPoint| {
            let r = result.get_or_insert(IntRect {
                left: pt.x,
                top: pt.y,
                right: pt.x,
                bottom: pt.y,
            });
            r.left = r.left.min(pt.x);
            r.right = r.right.max(pt.x);
            r.top = r.top.min(pt.y);
            r.bottom = r.bottom.max(pt.y);
        };
        for lm in &self.minima_list {
            for bound in [lm.left_bound, lm.right_bound] {
                let mut e = bound;
                while e != INVALID {
                    grow(self.edges[e].bot);
                    grow(self.edges[e].top);
                    e = self.edges[e].next_in_lml;
                }
            }
        }
        result.unwrap_or_default()
    }

    // ─────────────────────────── Bound construction ─────────────────────────

    fn remove_edge(&mut self, e: EdgeIdx) -> EdgeIdx {
        let (prev, next) = (self.edges[e].prev, self.edges[e].next);
        self.edges[prev].next = next;
        self.edges[next].prev = prev;
        self.edges.free(e);
        next
    }

    fn free_ring(&mut self, start: EdgeIdx) {
        let mut e = start;
        loop {
            let next = self.edges[e].next;
            self.edges.free(e);
            if next == start || !self.edges.is_live(next) {
                break;
            }
            e = next;
        }
    }

    fn find_next_loc_min(&self, mut e: EdgeIdx) -> EdgeIdx {
        let ed = &self.edges;
        loop {
            while ed[e].bot != ed[ed[e].prev].bot || ed[e].curr == ed[e].top {
                e = ed[e].next;
            }
            if !ed[e].is_horizontal() && !ed[ed[e].prev].is_horizontal() {
                break;
            }
            while ed[ed[e].prev].is_horizontal() {
                e = ed[e].prev;
            }
            let e2 = e;
            while ed[e].is_horizontal() {
                e = ed[e].next;
            }
            if ed[e].top.y == ed[ed[e].prev].bot.y {
                // Just an intermediate horizontal.
                continue;
            }
            if ed[ed[e2].prev].bot.x < ed[e].bot.x {
                e = e2;
            }
            break;
        }
        e
    }

    /// Walks a bound, chaining `next_in_lml`, and returns the first edge
    /// beyond it. Splits at skip edges are queued as extra open minima.
    fn process_bound(&mut self, e: EdgeIdx, forward: bool) -> EdgeIdx {
        let mut pending = Vec::new();
        let mut start = e;
        let result = loop {
            match self.bound_step(start, forward) {
                BoundOutcome::Done(beyond) => break beyond,
                BoundOutcome::Split { rest, minimum } => {
                    pending.push(minimum);
                    start = rest;
                }
            }
        };
        self.minima_list.extend(pending);
        result
    }

    fn bound_step(&mut self, mut e: EdgeIdx, forward: bool) -> BoundOutcome {
        let mut result = e;
        let step = |ed: &Arena<Edge>, i: EdgeIdx| if forward { ed[i].next } else { ed[i].prev };
        let back = |ed: &Arena<Edge>, i: EdgeIdx| if forward { ed[i].prev } else { ed[i].next };

        if self.edges[e].out_idx == OutIdx::Skip {
            // Edges may remain in this bound beyond the skip edge.
            let ed = &self.edges;
            while ed[e].top.y == ed[step(ed, e)].bot.y {
                e = step(ed, e);
            }
            // Top horizontals belong to the opposite bound on a second pass.
            while e != result && ed[e].is_horizontal() {
                e = back(ed, e);
            }
            if e == result {
                return BoundOutcome::Done(step(ed, e));
            }
            let rest = step(ed, result);
            let minimum = LocalMinimum {
                y: ed[rest].bot.y,
                left_bound: INVALID,
                right_bound: rest,
            };
            self.edges[rest].wind_delta = 0;
            return BoundOutcome::Split { rest, minimum };
        }

        if self.edges[e].is_horizontal() {
            // Not necessarily a true minimum when following a skip edge, and
            // consecutive horizontals may head left before turning right.
            let e_start = back(&self.edges, e);
            let (es_bot, es_top, e_bot) = (
                self.edges[e_start].bot.x,
                self.edges[e_start].top.x,
                self.edges[e].bot.x,
            );
            if self.edges[e_start].is_horizontal() {
                if es_bot != e_bot && es_top != e_bot {
                    self.edges[e].reverse_horizontal();
                }
            } else if es_bot != e_bot {
                self.edges[e].reverse_horizontal();
            }
        }

        let e_start = e;
        {
            let ed = &self.edges;
            while ed[result].top.y == ed[step(ed, result)].bot.y
                && ed[step(ed, result)].out_idx != OutIdx::Skip
            {
                result = step(ed, result);
            }
            if ed[result].is_horizontal() && ed[step(ed, result)].out_idx != OutIdx::Skip {
                // Top horizontals join this bound only when the preceding
                // edge attaches to the horizontal's left end.
                let mut horz = result;
                while ed[back(ed, horz)].is_horizontal() {
                    horz = back(ed, horz);
                }
                let beyond_top = ed[step(ed, result)].top.x;
                let before_top = ed[back(ed, horz)].top.x;
                if forward {
                    if before_top > beyond_top {
                        result = back(ed, horz);
                    }
                } else if before_top >= beyond_top {
                    result = back(ed, horz);
                }
            }
        }

        loop {
            let nxt = step(&self.edges, e);
            let adjoining_top = self.edges[back(&self.edges, e)].top.x;
            if self.edges[e].is_horizontal() && e != e_start && self.edges[e].bot.x != adjoining_top {
                self.edges[e].reverse_horizontal();
            }
            if e == result {
                break;
            }
            self.edges[e].next_in_lml = nxt;
            e = nxt;
        }
        BoundOutcome::Done(step(&self.edges, result))
    }
}

impl Default for ClipperBase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i64, i64)]) -> Path {
        coords.iter().map(|&c| c.into()).collect()
    }

    #[test]
    fn square_yields_one_minimum() {
        let mut base = ClipperBase::new();
        let added = base
            .add_path(&pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]), PolyType::Subject, true)
            .unwrap();
        assert!(added);
        assert_eq!(base.minima_list.len(), 1);
        assert_eq!(base.minima_list[0].y, 10);
    }

    #[test]
    fn degenerate_paths_are_dropped() {
        let mut base = ClipperBase::new();
        assert!(!base.add_path(&pts(&[(1, 1)]), PolyType::Subject, true).unwrap());
        assert!(!base.add_path(&pts(&[(1, 1), (5, 5)]), PolyType::Subject, true).unwrap());
        assert!(!base
            .add_path(&pts(&[(0, 0), (5, 5), (10, 10)]), PolyType::Subject, true)
            .unwrap());
        assert!(!base
            .add_path(&pts(&[(0, 0), (5, 0), (5, 0), (0, 0)]), PolyType::Subject, true)
            .unwrap());
        assert!(base.minima_list.is_empty());
        assert_eq!(base.edges.live_count(), 0);
    }

    #[test]
    fn open_clip_path_is_rejected() {
        let mut base = ClipperBase::new();
        let err = base.add_path(&pts(&[(0, 0), (5, 5)]), PolyType::Clip, false);
        assert_eq!(err, Err(ClipError::OpenPathNotSupported));
    }

    #[test]
    fn open_subject_path_is_accepted() {
        let mut base = ClipperBase::new();
        assert!(base.add_path(&pts(&[(0, 0), (5, 5)]), PolyType::Subject, false).unwrap());
        assert!(base.has_open_paths);
        assert!(!base.minima_list.is_empty());
    }

    #[test]
    fn out_of_range_coordinate_is_an_error() {
        let mut base = ClipperBase::new();
        let r = base.add_path(
            &pts(&[(0, 0), (i64::MAX, 0), (0, 10)]),
            PolyType::Subject,
            true,
        );
        assert!(matches!(r, Err(ClipError::CoordinateOutOfRange { .. })));
    }

    #[test]
    fn large_coordinates_switch_to_full_range() {
        let mut base = ClipperBase::new();
        let big = 1i64 << 40;
        base.add_path(&pts(&[(0, 0), (big, 0), (big, big)]), PolyType::Subject, true)
            .unwrap();
        assert_eq!(base.range, RangeMode::Full);
    }

    #[test]
    fn bounds_cover_all_paths() {
        let mut base = ClipperBase::new();
        base.add_path(&pts(&[(0, 0), (10, 0), (10, 10), (0, 10)]), PolyType::Subject, true)
            .unwrap();
        base.add_path(&pts(&[(-5, 20), (3, 2), (7, 30)]), PolyType::Clip, true)
            .unwrap();
        assert_eq!(
            base.get_bounds(),
            IntRect {
                left: -5,
                top: 0,
                right: 10,
                bottom: 30
            }
        );
    }

    #[test]
    fn empty_bounds_are_zero() {
        assert_eq!(ClipperBase::new().get_bounds(), IntRect::default());
    }

    #[test]
    fn collinear_vertices_removed_unless_preserved() {
        let square_with_midpoints = pts(&[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);
        let mut base = ClipperBase::new();
        base.add_path(&square_with_midpoints, PolyType::Subject, true).unwrap();
        assert_eq!(base.edges.live_count(), 4);

        let mut keep = ClipperBase::new();
        keep.preserve_collinear = true;
        keep.add_path(&square_with_midpoints, PolyType::Subject, true).unwrap();
        assert_eq!(keep.edges.live_count(), 5);
    }
}
