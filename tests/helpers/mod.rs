// Copyright 2025 Lars Brubaker
// Shared test utilities for vatti-clip tests.

#![allow(dead_code)]

use vatti_clip::{area, point_in_polygon, ClipType, Clipper, IntPoint, Path, Paths, PolyFillType, PolyType};

/// Build a path from `(x, y)` pairs.
pub fn pts(coords: &[(i64, i64)]) -> Path {
    coords.iter().map(|&c| c.into()).collect()
}

/// Axis-aligned square with positive orientation.
pub fn square(x: i64, y: i64, size: i64) -> Path {
    rect(x, y, size, size)
}

pub fn rect(x: i64, y: i64, w: i64, h: i64) -> Path {
    pts(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
}

/// Regular polygon approximating a circle, positively oriented.
pub fn regular_polygon(cx: i64, cy: i64, radius: f64, sides: usize) -> Path {
    (0..sides)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / sides as f64;
            IntPoint::new(cx + (radius * a.cos()).round() as i64, cy + (radius * a.sin()).round() as i64)
        })
        .collect()
}

/// Sum of signed areas; holes subtract from their outers.
pub fn total_area(paths: &Paths) -> f64 {
    paths.iter().map(|p| area(p)).sum()
}

pub fn total_abs_area(paths: &Paths) -> f64 {
    paths.iter().map(|p| area(p).abs()).sum()
}

/// Run one boolean operation with the same fill rule on both operands.
pub fn clip(op: ClipType, subject: &[Path], clip: &[Path], fill: PolyFillType) -> Paths {
    let mut c = Clipper::new();
    c.add_paths(subject, PolyType::Subject, true).unwrap();
    c.add_paths(clip, PolyType::Clip, true).unwrap();
    c.execute(op, fill, fill).unwrap()
}

/// Area of the result of `op`, or zero for an empty result.
pub fn clip_area(op: ClipType, subject: &[Path], clip_paths: &[Path]) -> f64 {
    total_area(&clip(op, subject, clip_paths, PolyFillType::NonZero))
}

/// True when every vertex of `inner` lies inside or on `outer`.
pub fn path_inside(inner: &Path, outer: &Path) -> bool {
    inner.iter().all(|&p| point_in_polygon(p, outer) != 0)
}

/// True when no vertex of `path` lies inside or on `other`.
pub fn path_outside(path: &Path, other: &Path) -> bool {
    path.iter().all(|&p| point_in_polygon(p, other) == 0)
}

/// Vertices in a canonical order, for comparing contours up to rotation
/// and direction.
pub fn sorted_vertices(path: &Path) -> Vec<(i64, i64)> {
    let mut v: Vec<(i64, i64)> = path.iter().map(|p| (p.x, p.y)).collect();
    v.sort_unstable();
    v
}

/// Assert no vertex appears twice within a contour.
pub fn assert_unique_vertices(path: &Path) {
    for (i, a) in path.iter().enumerate() {
        for b in &path[i + 1..] {
            assert_ne!(a, b, "vertex {:?} repeats in {:?}", a, path);
        }
    }
}

pub fn assert_area_approx(actual: f64, expected: f64, rel_tolerance: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= expected.abs() * rel_tolerance,
        "{}: expected area ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}
