// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (SimplifyPolygons, CleanPolygons, Minkowski)
//
// Path utilities built on the clipper: simplification, vertex cleaning
// and Minkowski sums.

use crate::clipper::{ClipType, Clipper, InitOptions, PolyFillType, PolyType};
use crate::error::ClipResult;
use crate::geom::{orientation, points_are_close, reverse_path, slopes_near_collinear, IntPoint, Path, Paths};

/// Default `clean_polygon` distance: just over one diagonal unit.
pub const DEF_CLEAN_DISTANCE: f64 = 1.415;

fn strictly_simple_union(paths: &[Path], fill: PolyFillType) -> ClipResult<Paths> {
    let mut c = Clipper::with_options(InitOptions {
        strictly_simple: true,
        ..InitOptions::default()
    });
    c.add_paths(paths, PolyType::Subject, true)?;
    c.execute(ClipType::Union, fill, fill)
}

/// Splits a self-intersecting polygon into simple ones under `fill`.
pub fn simplify_polygon(poly: &[IntPoint], fill: PolyFillType) -> ClipResult<Paths> {
    strictly_simple_union(&[poly.to_vec()], fill)
}

pub fn simplify_polygons(polys: &[Path], fill: PolyFillType) -> ClipResult<Paths> {
    strictly_simple_union(polys, fill)
}

/// Removes vertices within `distance` of a neighbour and vertices that are
/// nearly collinear with their neighbours. Returns an empty path when
/// fewer than three vertices survive.
pub fn clean_polygon(poly: &[IntPoint], distance: f64) -> Path {
    let size = poly.len();
    if size == 0 {
        return Vec::new();
    }
    let mut next: Vec<usize> = (0..size).map(|i| (i + 1) % size).collect();
    let mut prev: Vec<usize> = (0..size).map(|i| (i + size - 1) % size).collect();
    // A vertex is marked once it has been checked against its current
    // neighbours; removing a neighbour clears the mark.
    let mut checked = vec![false; size];
    let mut remaining = size;

    let exclude = |op: usize, next: &mut Vec<usize>, prev: &mut Vec<usize>, checked: &mut Vec<bool>| -> usize {
        let result = prev[op];
        next[result] = next[op];
        prev[next[op]] = result;
        checked[result] = false;
        result
    };

    let dist_sqrd = distance * distance;
    let mut op = 0;
    while !checked[op] && next[op] != prev[op] {
        let (p, pp, pn) = (poly[op], poly[prev[op]], poly[next[op]]);
        if points_are_close(p, pp, dist_sqrd) {
            op = exclude(op, &mut next, &mut prev, &mut checked);
            remaining -= 1;
        } else if points_are_close(pp, pn, dist_sqrd) {
            exclude(next[op], &mut next, &mut prev, &mut checked);
            op = exclude(op, &mut next, &mut prev, &mut checked);
            remaining -= 2;
        } else if slopes_near_collinear(pp, p, pn, dist_sqrd) {
            op = exclude(op, &mut next, &mut prev, &mut checked);
            remaining -= 1;
        } else {
            checked[op] = true;
            op = next[op];
        }
    }

    if remaining < 3 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(remaining);
    for _ in 0..remaining {
        out.push(poly[op]);
        op = next[op];
    }
    out
}

pub fn clean_polygons(polys: &[Path], distance: f64) -> Paths {
    polys.iter().map(|p| clean_polygon(p, distance)).collect()
}

/// Quads swept by `poly` placed at each vertex of `path`, each oriented
/// positively so a NonZero union fills the whole strip.
fn minkowski(poly: &[IntPoint], path: &[IntPoint], is_sum: bool, is_closed: bool) -> Paths {
    let poly_cnt = poly.len();
    let path_cnt = path.len();
    if poly_cnt == 0 || path_cnt == 0 {
        return Vec::new();
    }
    let pp: Vec<Path> = path
        .iter()
        .map(|a| {
            poly.iter()
                .map(|b| {
                    if is_sum {
                        IntPoint::new(a.x + b.x, a.y + b.y)
                    } else {
                        IntPoint::new(a.x - b.x, a.y - b.y)
                    }
                })
                .collect()
        })
        .collect();

    let strips = if is_closed { path_cnt } else { path_cnt - 1 };
    let mut quads = Vec::with_capacity(strips * poly_cnt);
    for i in 0..strips {
        let (a, b) = (&pp[i % path_cnt], &pp[(i + 1) % path_cnt]);
        for j in 0..poly_cnt {
            let j1 = (j + 1) % poly_cnt;
            let mut quad = vec![a[j], b[j], b[j1], a[j1]];
            if !orientation(&quad) {
                reverse_path(&mut quad);
            }
            quads.push(quad);
        }
    }
    quads
}

fn nonzero_union(subject: &[Path], clip: &[Path]) -> ClipResult<Paths> {
    let mut c = Clipper::new();
    c.add_paths(subject, PolyType::Subject, true)?;
    c.add_paths(clip, PolyType::Clip, true)?;
    c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
}

/// The region swept by `pattern` as its origin travels along `path`.
pub fn minkowski_sum(pattern: &[IntPoint], path: &[IntPoint], path_is_closed: bool) -> ClipResult<Paths> {
    let quads = minkowski(pattern, path, true, path_is_closed);
    nonzero_union(&quads, &[])
}

/// As `minkowski_sum` over several paths. Closed paths also contribute
/// their interior, shifted by the pattern's first vertex.
pub fn minkowski_sum_paths(pattern: &[IntPoint], paths: &[Path], path_is_closed: bool) -> ClipResult<Paths> {
    let mut quads = Vec::new();
    let mut interiors = Vec::new();
    for path in paths {
        quads.extend(minkowski(pattern, path, true, path_is_closed));
        if path_is_closed {
            if let Some(&origin) = pattern.first() {
                interiors.push(path.iter().map(|p| IntPoint::new(p.x + origin.x, p.y + origin.y)).collect());
            }
        }
    }
    nonzero_union(&quads, &interiors)
}

pub fn minkowski_diff(poly1: &[IntPoint], poly2: &[IntPoint]) -> ClipResult<Paths> {
    let quads = minkowski(poly1, poly2, false, true);
    nonzero_union(&quads, &[])
}
