// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp/hpp (Clipper class)
//
// Vatti sweep: boolean operations on integer polygons.
//
// The sweep climbs scanbeam by scanbeam from the bottom of the input. At
// each scanbeam Y it inserts the bounds starting there into the active
// edge list, processes horizontal edges, resolves every crossing inside the
// beam in an adjacency-consistent order, and then retires or promotes the
// edges ending at the top of the beam. Output contours are grown from the
// contributing edges as rings of OutPts; rings that touch along collinear
// edges are stitched together after the sweep.
//
// The engine is split across submodules that all extend `Clipper`:
//   beam        - local minima insertion and top-of-scanbeam updates
//   edge_lists  - active/sorted edge list maintenance
//   winding     - winding counts and fill-rule decisions
//   intersect   - crossing detection, ordering and resolution
//   horizontal  - horizontal edge processing
//   output      - output rings, hole state and result building
//   join        - deferred joins and strictly-simple splitting

use log::{debug, trace};

use crate::arena::{Arena, INVALID};
use crate::clipper_base::ClipperBase;
use crate::edge::{Edge, EdgeIdx, OutRecIdx};
use crate::error::ClipResult;
use crate::geom::{CInt, IntPoint, IntRect, Path, Paths};
use crate::polytree::PolyTree;
use crate::scanbeam::Scanbeam;

mod beam;
mod edge_lists;
mod horizontal;
mod intersect;
mod join;
mod output;
mod winding;

#[cfg(test)]
mod tests;

pub(crate) use output::{OutPt, OutRec};
pub(crate) use winding::FillRules;

// ─────────────────────────────── Public types ──────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipType {
    Intersection,
    Union,
    Difference,
    Xor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PolyType {
    Subject,
    Clip,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PolyFillType {
    EvenOdd,
    NonZero,
    Positive,
    Negative,
}

/// Construction-time switches for `Clipper`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Emit outer contours clockwise and holes counter-clockwise.
    pub reverse_solution: bool,
    /// Split contours that touch themselves at a vertex.
    pub strictly_simple: bool,
    /// Keep collinear vertices in input and output.
    pub preserve_collinear: bool,
}

pub(crate) type OutPtIdx = u32;

/// Deferred splice of two output vertices; `op2 == INVALID` for ghost joins.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Join {
    pub op1: OutPtIdx,
    pub op2: OutPtIdx,
    pub off_pt: IntPoint,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct IntersectNode {
    pub edge1: EdgeIdx,
    pub edge2: EdgeIdx,
    pub pt: IntPoint,
}

// ─────────────────────────────── Clipper ───────────────────────────────────────

pub struct Clipper {
    pub(crate) base: ClipperBase,
    scanbeam: Scanbeam,
    active_edges: EdgeIdx,
    sorted_edges: EdgeIdx,
    out_pts: Arena<OutPt>,
    poly_outs: Vec<OutRec>,
    joins: Vec<Join>,
    ghost_joins: Vec<Join>,
    intersect_list: Vec<IntersectNode>,
    /// X positions of maxima at the current scanbeam top (strictly simple only).
    maxima: Vec<CInt>,
    clip_type: ClipType,
    rules: FillRules,
    reverse_output: bool,
    strict_simple: bool,
    using_poly_tree: bool,
}

impl Clipper {
    pub fn new() -> Self {
        Self::with_options(InitOptions::default())
    }

    pub fn with_options(options: InitOptions) -> Self {
        let mut base = ClipperBase::new();
        base.preserve_collinear = options.preserve_collinear;
        Clipper {
            base,
            scanbeam: Scanbeam::new(),
            active_edges: INVALID,
            sorted_edges: INVALID,
            out_pts: Arena::new(),
            poly_outs: Vec::new(),
            joins: Vec::new(),
            ghost_joins: Vec::new(),
            intersect_list: Vec::new(),
            maxima: Vec::new(),
            clip_type: ClipType::Intersection,
            rules: FillRules::new(ClipType::Intersection, PolyFillType::EvenOdd, PolyFillType::EvenOdd),
            reverse_output: options.reverse_solution,
            strict_simple: options.strictly_simple,
            using_poly_tree: false,
        }
    }

    pub fn set_reverse_solution(&mut self, value: bool) {
        self.reverse_output = value;
    }

    pub fn reverse_solution(&self) -> bool {
        self.reverse_output
    }

    pub fn set_strictly_simple(&mut self, value: bool) {
        self.strict_simple = value;
    }

    pub fn strictly_simple(&self) -> bool {
        self.strict_simple
    }

    /// Affects paths added after the call.
    pub fn set_preserve_collinear(&mut self, value: bool) {
        self.base.preserve_collinear = value;
    }

    pub fn preserve_collinear(&self) -> bool {
        self.base.preserve_collinear
    }

    /// Adds a subject or clip path. `Ok(false)` means the path was
    /// degenerate and dropped.
    pub fn add_path(&mut self, path: &[IntPoint], poly_type: PolyType, closed: bool) -> ClipResult<bool> {
        self.base.add_path(path, poly_type, closed)
    }

    pub fn add_paths(&mut self, paths: &[Path], poly_type: PolyType, closed: bool) -> ClipResult<bool> {
        self.base.add_paths(paths, poly_type, closed)
    }

    pub fn clear(&mut self) {
        self.base.clear();
        self.dispose_all_out_recs();
    }

    pub fn get_bounds(&self) -> IntRect {
        self.base.get_bounds()
    }

    /// Rewinds the ingested edges and refills the scanbeam queue.
    pub fn reset(&mut self) {
        self.base.reset();
        self.scanbeam.clear();
        for lm in &self.base.minima_list {
            self.scanbeam.insert(lm.y);
        }
        self.active_edges = INVALID;
        self.sorted_edges = INVALID;
        self.maxima.clear();
    }

    /// Runs the operation and returns closed contours only.
    ///
    /// Clipped open subject paths are left out; `execute_tree` reports them.
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        subj_fill: PolyFillType,
        clip_fill: PolyFillType,
    ) -> ClipResult<Paths> {
        if self.base.has_open_paths {
            debug!("execute: open subject paths are omitted from a flat result");
        }
        self.configure(clip_type, subj_fill, clip_fill, false);
        let outcome = self.execute_internal();
        let result = outcome.map(|()| self.build_result());
        self.dispose_all_out_recs();
        result
    }

    /// Runs the operation and returns the nested contour tree.
    pub fn execute_tree(
        &mut self,
        clip_type: ClipType,
        subj_fill: PolyFillType,
        clip_fill: PolyFillType,
    ) -> ClipResult<PolyTree> {
        self.configure(clip_type, subj_fill, clip_fill, true);
        let outcome = self.execute_internal();
        let result = outcome.map(|()| self.build_result_tree());
        self.dispose_all_out_recs();
        result
    }

    fn configure(&mut self, clip_type: ClipType, subj_fill: PolyFillType, clip_fill: PolyFillType, tree: bool) {
        self.clip_type = clip_type;
        self.rules = FillRules::new(clip_type, subj_fill, clip_fill);
        self.using_poly_tree = tree;
    }

    fn execute_internal(&mut self) -> ClipResult<()> {
        debug!(
            "execute: {:?} subject={:?} clip={:?} minima={}",
            self.clip_type,
            self.rules.subject,
            self.rules.clip,
            self.base.minima_list.len()
        );
        self.reset();

        let swept = self.sweep();
        if swept.is_ok() {
            self.fix_orientations();
            if !self.joins.is_empty() {
                self.join_common_edges();
            }
            // Cleanup must follow the joins.
            for i in 0..self.poly_outs.len() as OutRecIdx {
                if self.rec(i).pts == INVALID {
                    continue;
                }
                if self.rec(i).is_open {
                    self.fixup_out_polyline(i);
                } else {
                    self.fixup_out_polygon(i);
                }
            }
            if self.strict_simple {
                self.do_simple_polygons();
            }
        }
        self.joins.clear();
        self.ghost_joins.clear();
        self.intersect_list.clear();
        debug!("execute: finished with {} output records", self.poly_outs.len());
        swept
    }

    fn sweep(&mut self) -> ClipResult<()> {
        let mut bot_y = match self.scanbeam.pop() {
            Some(y) => y,
            None => return Ok(()),
        };
        self.insert_local_minima_into_ael(bot_y);
        loop {
            let top_y = match self.scanbeam.pop() {
                Some(y) => y,
                None if self.base.local_minima_pending() => self.base.minima_list[self.base.current_lm].y,
                None => break,
            };
            trace!("scanbeam {} -> {}", bot_y, top_y);
            self.process_horizontals();
            self.ghost_joins.clear();
            if let Err(err) = self.process_intersections(top_y) {
                debug!("execute: intersection ordering failed below y={}", top_y);
                return Err(err);
            }
            self.process_edges_at_top_of_scanbeam(top_y);
            bot_y = top_y;
            self.insert_local_minima_into_ael(bot_y);
        }
        Ok(())
    }

    // ─────────────────────────── Accessors ─────────────────────────────────

    #[inline]
    pub(crate) fn edge(&self, e: EdgeIdx) -> &Edge {
        &self.base.edges[e]
    }

    #[inline]
    pub(crate) fn edge_mut(&mut self, e: EdgeIdx) -> &mut Edge {
        &mut self.base.edges[e]
    }

    #[inline]
    pub(crate) fn op(&self, op: OutPtIdx) -> &OutPt {
        &self.out_pts[op]
    }

    #[inline]
    pub(crate) fn op_mut(&mut self, op: OutPtIdx) -> &mut OutPt {
        &mut self.out_pts[op]
    }

    #[inline]
    pub(crate) fn rec(&self, r: OutRecIdx) -> &OutRec {
        &self.poly_outs[r as usize]
    }

    #[inline]
    pub(crate) fn rec_mut(&mut self, r: OutRecIdx) -> &mut OutRec {
        &mut self.poly_outs[r as usize]
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}
