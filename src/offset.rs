// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp/hpp (ClipperOffset)
//
// Polygon and polyline offsetting.
//
// Every input path is outlined at distance `delta` by walking its edge
// normals and emitting corner geometry according to the join type. Open
// paths are outlined on both sides and capped at their ends. The raw
// outlines self-intersect at concave corners; a union with the Positive
// (or, for shrinking, Negative) fill rule removes those overlaps.

use std::f64::consts::PI;

use log::debug;

use crate::clipper::{ClipType, Clipper, PolyFillType, PolyType};
use crate::error::{ClipError, ClipResult};
use crate::geom::{dist_sqrd, get_unit_normal, orientation, reverse_path, round, DoublePoint, IntPoint, Path, Paths};
use crate::polytree::PolyTree;

/// Default `arc_tolerance`, also the cap as a fraction of `|delta|`.
pub const DEF_ARC_TOLERANCE: f64 = 0.25;
pub const DEF_MITER_LIMIT: f64 = 2.0;

/// Margin around the bounds of a shrinking outline.
const OUTER_MARGIN: i64 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    Square,
    Round,
    Miter,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EndType {
    ClosedPolygon,
    /// A closed path outlined on both sides, like a ring of track.
    ClosedLine,
    OpenButt,
    OpenSquare,
    OpenRound,
}

impl EndType {
    #[inline]
    fn is_closed(self) -> bool {
        matches!(self, EndType::ClosedPolygon | EndType::ClosedLine)
    }
}

#[derive(Clone, Debug)]
struct OffsetPath {
    contour: Path,
    join_type: JoinType,
    end_type: EndType,
}

pub struct ClipperOffset {
    /// Miter joins whose tip would lie further than `miter_limit * delta`
    /// from the vertex are squared off instead.
    pub miter_limit: f64,
    /// Maximum distance between a round join's chords and the true arc.
    pub arc_tolerance: f64,
    /// Vertices closer than this to the previously kept vertex are dropped
    /// before offsetting. Zero keeps every distinct vertex.
    pub shortest_edge_length: f64,
    paths: Vec<OffsetPath>,
    /// (path, vertex) of the lowest vertex among closed polygons.
    lowest: Option<(usize, usize)>,
}

impl ClipperOffset {
    pub fn new(miter_limit: f64, arc_tolerance: f64) -> Self {
        ClipperOffset {
            miter_limit,
            arc_tolerance,
            shortest_edge_length: 0.0,
            paths: Vec::new(),
            lowest: None,
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.lowest = None;
    }

    pub fn add_path(&mut self, path: &[IntPoint], join_type: JoinType, end_type: EndType) {
        let mut high = match path.len() {
            0 => return,
            n => n - 1,
        };
        if end_type.is_closed() {
            while high > 0 && path[0] == path[high] {
                high -= 1;
            }
        }

        let min_sqrd = self.shortest_edge_length * self.shortest_edge_length;
        let mut contour: Path = Vec::with_capacity(high + 1);
        contour.push(path[0]);
        for &pt in &path[1..=high] {
            let last = contour[contour.len() - 1];
            if pt == last || (min_sqrd > 0.0 && dist_sqrd(pt, last) < min_sqrd) {
                continue;
            }
            contour.push(pt);
        }
        if end_type.is_closed() && min_sqrd > 0.0 {
            while contour.len() > 1 && dist_sqrd(contour[contour.len() - 1], contour[0]) < min_sqrd {
                contour.pop();
            }
        }
        if end_type == EndType::ClosedPolygon && contour.len() < 3 {
            return;
        }

        // Lowest vertex, leftmost on ties.
        let mut k = 0;
        for (i, pt) in contour.iter().enumerate().skip(1) {
            let low = contour[k];
            if pt.y > low.y || (pt.y == low.y && pt.x < low.x) {
                k = i;
            }
        }

        let candidate = contour[k];
        self.paths.push(OffsetPath {
            contour,
            join_type,
            end_type,
        });
        if end_type != EndType::ClosedPolygon {
            return;
        }
        let idx = self.paths.len() - 1;
        match self.lowest {
            None => self.lowest = Some((idx, k)),
            Some((pi, vi)) => {
                let ip = self.paths[pi].contour[vi];
                if candidate.y > ip.y || (candidate.y == ip.y && candidate.x < ip.x) {
                    self.lowest = Some((idx, k));
                }
            }
        }
    }

    pub fn add_paths(&mut self, paths: &[Path], join_type: JoinType, end_type: EndType) {
        for path in paths {
            self.add_path(path, join_type, end_type);
        }
    }

    /// Orients closed inputs so the one holding the lowest vertex is an
    /// outer boundary; closed lines are always oriented positively.
    fn fix_orientations(&mut self) {
        let flip_all = match self.lowest {
            Some((pi, _)) => !orientation(&self.paths[pi].contour),
            None => false,
        };
        for path in &mut self.paths {
            let reverse = match path.end_type {
                EndType::ClosedPolygon => flip_all,
                EndType::ClosedLine => orientation(&path.contour) == flip_all,
                _ => false,
            };
            if reverse {
                reverse_path(&mut path.contour);
            }
        }
    }

    fn check_delta(delta: f64) -> ClipResult<()> {
        if delta.is_finite() {
            Ok(())
        } else {
            Err(ClipError::InvalidParameter(format!("offset delta {} is not finite", delta)))
        }
    }

    /// Offsets all paths by `delta` and returns the cleaned outlines.
    pub fn execute(&mut self, delta: f64) -> ClipResult<Paths> {
        Self::check_delta(delta)?;
        let mut clipper = self.prepare(delta)?;
        if delta > 0.0 {
            clipper.execute(ClipType::Union, PolyFillType::Positive, PolyFillType::Positive)
        } else {
            self.add_outer(&mut clipper)?;
            let mut solution = clipper.execute(ClipType::Union, PolyFillType::Negative, PolyFillType::Negative)?;
            if !solution.is_empty() {
                solution.remove(0);
            }
            Ok(solution)
        }
    }

    /// As `execute`, keeping the nesting of the outlines.
    pub fn execute_tree(&mut self, delta: f64) -> ClipResult<PolyTree> {
        Self::check_delta(delta)?;
        let mut clipper = self.prepare(delta)?;
        if delta > 0.0 {
            clipper.execute_tree(ClipType::Union, PolyFillType::Positive, PolyFillType::Positive)
        } else {
            self.add_outer(&mut clipper)?;
            let mut tree = clipper.execute_tree(ClipType::Union, PolyFillType::Negative, PolyFillType::Negative)?;
            tree.strip_outer();
            Ok(tree)
        }
    }

    fn prepare(&mut self, delta: f64) -> ClipResult<Clipper> {
        self.fix_orientations();
        let outlines = self.do_offset(delta);
        debug!("offset: delta={} paths={} outlines={}", delta, self.paths.len(), outlines.len());
        let mut clipper = Clipper::new();
        clipper.add_paths(&outlines, PolyType::Subject, true)?;
        Ok(clipper)
    }

    /// A shrinking outline is unioned inside a reversed frame; the frame
    /// comes out as the first contour and is discarded.
    fn add_outer(&self, clipper: &mut Clipper) -> ClipResult<()> {
        let r = clipper.get_bounds();
        let outer = vec![
            IntPoint::new(r.left - OUTER_MARGIN, r.bottom + OUTER_MARGIN),
            IntPoint::new(r.right + OUTER_MARGIN, r.bottom + OUTER_MARGIN),
            IntPoint::new(r.right + OUTER_MARGIN, r.top - OUTER_MARGIN),
            IntPoint::new(r.left - OUTER_MARGIN, r.top - OUTER_MARGIN),
        ];
        clipper.add_path(&outer, PolyType::Subject, true)?;
        clipper.set_reverse_solution(true);
        Ok(())
    }

    fn do_offset(&self, delta: f64) -> Paths {
        if delta.abs() < 1.0e-20 {
            return self
                .paths
                .iter()
                .filter(|p| p.end_type == EndType::ClosedPolygon)
                .map(|p| p.contour.clone())
                .collect();
        }

        let miter_lim = if self.miter_limit > 2.0 {
            2.0 / (self.miter_limit * self.miter_limit)
        } else {
            0.5
        };
        let y = if self.arc_tolerance <= 0.0 {
            DEF_ARC_TOLERANCE
        } else if self.arc_tolerance > delta.abs() * DEF_ARC_TOLERANCE {
            delta.abs() * DEF_ARC_TOLERANCE
        } else {
            self.arc_tolerance
        };
        let mut steps = PI / (1.0 - y / delta.abs()).acos();
        if steps > delta.abs() * PI {
            steps = delta.abs() * PI;
        }
        let sin = (2.0 * PI / steps).sin();
        let mut outline = Outliner {
            delta,
            sin: if delta < 0.0 { -sin } else { sin },
            cos: (2.0 * PI / steps).cos(),
            steps_per_rad: steps / (2.0 * PI),
            miter_lim,
            sin_a: 0.0,
            normals: Vec::new(),
            dest: Vec::new(),
        };

        let mut result = Vec::with_capacity(self.paths.len() * 2);
        for path in &self.paths {
            let src = &path.contour;
            let len = src.len();
            if len == 0 || (delta <= 0.0 && (len < 3 || path.end_type != EndType::ClosedPolygon)) {
                continue;
            }
            outline.dest = Vec::new();
            if len == 1 {
                outline.point_cap(src[0], path.join_type, steps);
                result.push(std::mem::take(&mut outline.dest));
                continue;
            }

            outline.normals.clear();
            for j in 0..len - 1 {
                outline.normals.push(get_unit_normal(src[j], src[j + 1]));
            }
            if path.end_type.is_closed() {
                outline.normals.push(get_unit_normal(src[len - 1], src[0]));
            } else {
                let last = outline.normals[len - 2];
                outline.normals.push(last);
            }

            match path.end_type {
                EndType::ClosedPolygon => {
                    let mut k = len - 1;
                    for j in 0..len {
                        outline.offset_point(src, j, &mut k, path.join_type);
                    }
                    result.push(std::mem::take(&mut outline.dest));
                }
                EndType::ClosedLine => {
                    let mut k = len - 1;
                    for j in 0..len {
                        outline.offset_point(src, j, &mut k, path.join_type);
                    }
                    result.push(std::mem::take(&mut outline.dest));
                    // Walk back along the other side.
                    let n = outline.normals[len - 1];
                    for j in (1..len).rev() {
                        outline.normals[j] = neg(outline.normals[j - 1]);
                    }
                    outline.normals[0] = neg(n);
                    k = 0;
                    for j in (0..len).rev() {
                        outline.offset_point(src, j, &mut k, path.join_type);
                    }
                    result.push(std::mem::take(&mut outline.dest));
                }
                _ => {
                    outline.open_path(src, path.join_type, path.end_type);
                    result.push(std::mem::take(&mut outline.dest));
                }
            }
        }
        result
    }
}

impl Default for ClipperOffset {
    fn default() -> Self {
        Self::new(DEF_MITER_LIMIT, DEF_ARC_TOLERANCE)
    }
}

#[inline]
fn neg(p: DoublePoint) -> DoublePoint {
    DoublePoint::new(-p.x, -p.y)
}

/// Per-execution state for emitting one outline at a time.
struct Outliner {
    delta: f64,
    sin: f64,
    cos: f64,
    steps_per_rad: f64,
    miter_lim: f64,
    /// Cross product of the two normals at the current corner.
    sin_a: f64,
    normals: Vec<DoublePoint>,
    dest: Path,
}

impl Outliner {
    #[inline]
    fn push_offset(&mut self, pt: IntPoint, n: DoublePoint, scale: f64) {
        self.dest.push(IntPoint::new(
            round(pt.x as f64 + n.x * scale),
            round(pt.y as f64 + n.y * scale),
        ));
    }

    /// A single vertex becomes a circle (round joins) or a square.
    fn point_cap(&mut self, pt: IntPoint, join_type: JoinType, steps: f64) {
        if join_type == JoinType::Round {
            let (mut x, mut y) = (1.0f64, 0.0f64);
            for _ in 0..steps.floor() as usize {
                self.push_offset(pt, DoublePoint::new(x, y), self.delta);
                let x2 = x;
                x = x * self.cos - self.sin * y;
                y = x2 * self.sin + y * self.cos;
            }
        } else {
            for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                self.push_offset(pt, DoublePoint::new(x, y), self.delta);
            }
        }
    }

    fn open_path(&mut self, src: &[IntPoint], join_type: JoinType, end_type: EndType) {
        let len = src.len();
        let mut k = 0;
        for j in 1..len - 1 {
            self.offset_point(src, j, &mut k, join_type);
        }

        let j = len - 1;
        if end_type == EndType::OpenButt {
            let n = self.normals[j];
            self.push_offset(src[j], n, self.delta);
            self.push_offset(src[j], n, -self.delta);
        } else {
            self.sin_a = 0.0;
            self.normals[j] = neg(self.normals[j]);
            self.cap(src, j, len - 2, end_type);
        }

        // Walk back along the other side.
        for j in (1..len).rev() {
            self.normals[j] = neg(self.normals[j - 1]);
        }
        self.normals[0] = neg(self.normals[1]);

        k = len - 1;
        for j in (1..k).rev() {
            self.offset_point(src, j, &mut k, join_type);
        }

        if end_type == EndType::OpenButt {
            let n = self.normals[0];
            self.push_offset(src[0], n, -self.delta);
            self.push_offset(src[0], n, self.delta);
        } else {
            self.sin_a = 0.0;
            self.cap(src, 0, 1, end_type);
        }
    }

    fn cap(&mut self, src: &[IntPoint], j: usize, k: usize, end_type: EndType) {
        if end_type == EndType::OpenSquare {
            self.do_square(src, j, k);
        } else {
            self.do_round(src, j, k);
        }
    }

    fn offset_point(&mut self, src: &[IntPoint], j: usize, k: &mut usize, join_type: JoinType) {
        let (nj, nk) = (self.normals[j], self.normals[*k]);
        self.sin_a = nk.x * nj.y - nj.x * nk.y;
        if (self.sin_a * self.delta).abs() < 1.0 {
            let cos_a = nk.x * nj.x + nj.y * nk.y;
            if cos_a > 0.0 {
                // Nearly straight: a single vertex suffices.
                self.push_offset(src[j], nk, self.delta);
                return;
            }
        } else if self.sin_a > 1.0 {
            self.sin_a = 1.0;
        } else if self.sin_a < -1.0 {
            self.sin_a = -1.0;
        }

        if self.sin_a * self.delta < 0.0 {
            // Concave corner; the union removes the loop.
            self.push_offset(src[j], nk, self.delta);
            self.dest.push(src[j]);
            self.push_offset(src[j], nj, self.delta);
        } else {
            match join_type {
                JoinType::Miter => {
                    let r = 1.0 + (nj.x * nk.x + nj.y * nk.y);
                    if r >= self.miter_lim {
                        self.do_miter(src, j, *k, r);
                    } else {
                        self.do_square(src, j, *k);
                    }
                }
                JoinType::Square => self.do_square(src, j, *k),
                JoinType::Round => self.do_round(src, j, *k),
            }
        }
        *k = j;
    }

    fn do_square(&mut self, src: &[IntPoint], j: usize, k: usize) {
        let (nj, nk) = (self.normals[j], self.normals[k]);
        let dx = (self.sin_a.atan2(nk.x * nj.x + nk.y * nj.y) / 4.0).tan();
        let p = src[j];
        self.dest.push(IntPoint::new(
            round(p.x as f64 + self.delta * (nk.x - nk.y * dx)),
            round(p.y as f64 + self.delta * (nk.y + nk.x * dx)),
        ));
        self.dest.push(IntPoint::new(
            round(p.x as f64 + self.delta * (nj.x + nj.y * dx)),
            round(p.y as f64 + self.delta * (nj.y - nj.x * dx)),
        ));
    }

    fn do_miter(&mut self, src: &[IntPoint], j: usize, k: usize, r: f64) {
        let (nj, nk) = (self.normals[j], self.normals[k]);
        let q = self.delta / r;
        self.push_offset(src[j], DoublePoint::new(nk.x + nj.x, nk.y + nj.y), q);
    }

    fn do_round(&mut self, src: &[IntPoint], j: usize, k: usize) {
        let (nj, nk) = (self.normals[j], self.normals[k]);
        let a = self.sin_a.atan2(nk.x * nj.x + nk.y * nj.y);
        let steps = (round(self.steps_per_rad * a.abs()) as usize).max(1);

        let (mut x, mut y) = (nk.x, nk.y);
        for _ in 0..steps {
            self.push_offset(src[j], DoublePoint::new(x, y), self.delta);
            let x2 = x;
            x = x * self.cos - self.sin * y;
            y = x2 * self.sin + y * self.cos;
        }
        self.push_offset(src[j], nj, self.delta);
    }
}
