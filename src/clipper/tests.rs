// Copyright 2025 Lars Brubaker
// Unit tests for the clipper internals.

use super::*;
use crate::edge::{EdgeSide, OutIdx};
use crate::geom::area;

fn pts(coords: &[(i64, i64)]) -> Path {
    coords.iter().map(|&c| c.into()).collect()
}

fn square(x: i64, y: i64, s: i64) -> Path {
    pts(&[(x, y), (x + s, y), (x + s, y + s), (x, y + s)])
}

/// A clipper holding one square, reset and ready, plus one edge on each
/// side of its local minimum.
fn prepared() -> (Clipper, EdgeIdx, EdgeIdx) {
    let mut c = Clipper::new();
    assert!(c.add_path(&square(0, 0, 10), PolyType::Subject, true).unwrap());
    c.reset();
    let lm = c.base.minima_list[0];
    let (left, right) = (lm.left_bound, lm.right_bound);
    assert!(left != INVALID && right != INVALID);
    c.edge_mut(left).side = EdgeSide::Left;
    c.edge_mut(right).side = EdgeSide::Right;
    (c, left, right)
}

#[test]
fn add_out_pt_opens_record_and_skips_repeats() {
    let (mut c, left, _) = prepared();
    let first = c.add_out_pt(left, IntPoint::new(0, 10));
    assert_eq!(c.poly_outs.len(), 1);
    assert!(!c.rec(0).is_hole);
    assert!(!c.rec(0).is_open);
    assert_eq!(c.edge(left).out_idx, OutIdx::Rec(0));

    // Same point on the front of the ring is not duplicated.
    assert_eq!(c.add_out_pt(left, IntPoint::new(0, 10)), first);
    assert_eq!(c.point_count(c.rec(0).pts), 1);

    let second = c.add_out_pt(left, IntPoint::new(0, 0));
    assert_ne!(second, first);
    assert_eq!(c.rec(0).pts, second, "left side prepends");
    assert_eq!(c.point_count(second), 2);
}

#[test]
fn right_side_appends() {
    let (mut c, _, right) = prepared();
    let first = c.add_out_pt(right, IntPoint::new(10, 10));
    c.add_out_pt(right, IntPoint::new(10, 0));
    assert_eq!(c.rec(0).pts, first);
    assert_eq!(c.op(c.op(first).prev).pt, IntPoint::new(10, 0));
    assert_eq!(c.get_last_out_pt(right), c.op(first).prev);
}

#[test]
fn ring_area_flips_with_link_reversal() {
    let (mut c, _, right) = prepared();
    let first = c.add_out_pt(right, IntPoint::new(0, 0));
    for p in [(10, 0), (10, 10), (0, 10)] {
        c.add_out_pt(right, p.into());
    }
    let a = c.ring_area(first);
    assert_eq!(a.abs(), 100.0);
    c.reverse_poly_pt_links(first);
    assert_eq!(c.ring_area(first), -a);
    assert_eq!(c.ring_points(first).len(), 4);
}

#[test]
fn fixup_removes_collinear_points() {
    let (mut c, _, right) = prepared();
    for p in [(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)] {
        c.add_out_pt(right, p.into());
    }
    assert_eq!(c.point_count(c.rec(0).pts), 5);
    c.fixup_out_polygon(0);
    let ring = c.ring_points(c.rec(0).pts);
    assert_eq!(ring.len(), 4);
    assert!(!ring.contains(&IntPoint::new(5, 0)));
}

#[test]
fn fixup_drops_collapsed_ring() {
    let (mut c, _, right) = prepared();
    c.add_out_pt(right, IntPoint::new(0, 0));
    c.add_out_pt(right, IntPoint::new(5, 5));
    c.fixup_out_polygon(0);
    assert_eq!(c.rec(0).pts, INVALID);
    assert_eq!(c.out_pts.live_count(), 0);
}

#[test]
fn merged_records_forward_to_survivor() {
    let mut c = Clipper::new();
    let a = c.create_out_rec();
    let b = c.create_out_rec();
    let d = c.create_out_rec();
    c.rec_mut(d).idx = b;
    c.rec_mut(b).idx = a;
    assert_eq!(c.get_out_rec(d), a);
    assert_eq!(c.get_out_rec(a), a);
}

#[test]
fn parse_first_left_skips_dead_records() {
    let (mut c, _, right) = prepared();
    c.add_out_pt(right, IntPoint::new(0, 0));
    let dead = c.create_out_rec();
    c.rec_mut(dead).first_left = 0;
    let child = c.create_out_rec();
    c.rec_mut(child).first_left = dead;
    assert_eq!(c.parse_first_left(c.rec(child).first_left), 0);
    assert_eq!(c.parse_first_left(INVALID), INVALID);
}

#[test]
fn execute_leaves_no_sweep_state_behind() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 10), PolyType::Subject, true).unwrap();
    c.add_path(&square(5, 5, 10), PolyType::Clip, true).unwrap();
    let out = c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(c.active_edges, INVALID);
    assert_eq!(c.sorted_edges, INVALID);
    assert!(c.joins.is_empty());
    assert!(c.ghost_joins.is_empty());
    assert!(c.intersect_list.is_empty());
    assert!(c.poly_outs.is_empty());
    assert_eq!(c.out_pts.live_count(), 0);
    assert!(c.scanbeam.is_empty());
}

#[test]
fn execute_is_repeatable() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 10), PolyType::Subject, true).unwrap();
    c.add_path(&square(5, 5, 10), PolyType::Clip, true).unwrap();
    let first = c.execute(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    let second = c.execute(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(first, second);
    assert_eq!(area(&first[0]), 25.0);
}

#[test]
fn adjacent_squares_are_joined() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 10), PolyType::Subject, true).unwrap();
    c.add_path(&square(10, 0, 10), PolyType::Subject, true).unwrap();
    let out = c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].len(), 4);
    assert_eq!(area(&out[0]), 200.0);
}

#[test]
fn horizontal_run_between_minima() {
    // A "U" whose floor is a single long horizontal edge.
    let mut c = Clipper::new();
    let u = pts(&[(0, 0), (10, 0), (10, 20), (20, 20), (20, 0), (30, 0), (30, 30), (0, 30)]);
    c.add_path(&u, PolyType::Subject, true).unwrap();
    let out = c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(area(&out[0]).abs(), 30.0 * 30.0 - 10.0 * 20.0);
}

#[test]
fn hole_state_follows_nesting() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 100), PolyType::Subject, true).unwrap();
    c.add_path(&square(25, 25, 50), PolyType::Clip, true).unwrap();
    let out = c.execute(ClipType::Difference, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out.len(), 2);
    let outer = out.iter().find(|p| area(p) > 0.0).unwrap();
    let hole = out.iter().find(|p| area(p) < 0.0).unwrap();
    assert_eq!(area(outer), 10_000.0);
    assert_eq!(area(hole), -2_500.0);
}
