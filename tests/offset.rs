// Copyright 2025 Lars Brubaker
// Offsetting closed polygons and open paths with every join and end type.

mod helpers;

use approx::assert_relative_eq;
use helpers::{assert_area_approx, pts, regular_polygon, square, total_area};
use pretty_assertions::assert_eq;
use std::f64::consts::PI;
use test_case::test_case;
use vatti_clip::{area, reverse_path, ClipError, ClipperOffset, EndType, JoinType, Paths};

fn offset(paths: &[vatti_clip::Path], join: JoinType, end: EndType, delta: f64) -> Paths {
    let mut co = ClipperOffset::default();
    co.add_paths(paths, join, end);
    co.execute(delta).unwrap()
}

#[test]
fn miter_inflate_of_square_is_exact() {
    let out = offset(&[square(0, 0, 1000)], JoinType::Miter, EndType::ClosedPolygon, 100.0);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].len(), 4);
    assert_relative_eq!(area(&out[0]), 1200.0 * 1200.0);
}

#[test]
fn join_types_order_corner_areas() {
    let input = [square(0, 0, 1000)];
    let round = total_area(&offset(&input, JoinType::Round, EndType::ClosedPolygon, 100.0));
    let squared = total_area(&offset(&input, JoinType::Square, EndType::ClosedPolygon, 100.0));
    let miter = total_area(&offset(&input, JoinType::Miter, EndType::ClosedPolygon, 100.0));

    assert_area_approx(round, 1_400_000.0 + PI * 10_000.0, 0.005, "round joins");
    assert!(round < squared, "round {} should be below square {}", round, squared);
    assert!(squared < miter, "square {} should be below miter {}", squared, miter);
}

#[test]
fn round_trip_restores_convex_polygon() {
    let disc = regular_polygon(0, 0, 1000.0, 64);
    let mut co = ClipperOffset::new(2.0, 0.1);
    co.add_path(&disc, JoinType::Round, EndType::ClosedPolygon);
    let grown = co.execute(100.0).unwrap();
    assert_eq!(grown.len(), 1);

    let mut back = ClipperOffset::new(2.0, 0.1);
    back.add_paths(&grown, JoinType::Round, EndType::ClosedPolygon);
    let shrunk = back.execute(-100.0).unwrap();
    assert_eq!(shrunk.len(), 1);
    assert_area_approx(area(&shrunk[0]), area(&disc), 0.01, "inflate then deflate");
}

#[test]
fn deflate_square() {
    let out = offset(&[square(0, 0, 1000)], JoinType::Miter, EndType::ClosedPolygon, -100.0);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(area(&out[0]), 800.0 * 800.0);
}

#[test]
fn deflate_past_collapse_is_empty() {
    let out = offset(&[square(0, 0, 100)], JoinType::Miter, EndType::ClosedPolygon, -60.0);
    assert!(out.is_empty());
}

#[test]
fn negatively_oriented_input_is_treated_as_outer() {
    let mut sq = square(0, 0, 1000);
    reverse_path(&mut sq);
    let out = offset(&[sq], JoinType::Miter, EndType::ClosedPolygon, 100.0);
    assert_eq!(out.len(), 1);
    assert_relative_eq!(area(&out[0]), 1200.0 * 1200.0);
}

#[test]
fn inflating_shrinks_holes() {
    let mut hole = square(300, 300, 400);
    reverse_path(&mut hole);
    let mut co = ClipperOffset::default();
    co.add_paths(&[square(0, 0, 1000), hole], JoinType::Miter, EndType::ClosedPolygon);
    let tree = co.execute_tree(50.0).unwrap();
    assert_eq!(tree.child_count(), 1);
    let outer = &tree.childs()[0];
    assert_relative_eq!(area(outer.contour()), 1100.0 * 1100.0);
    assert_eq!(outer.child_count(), 1);
    assert!(outer.childs()[0].is_hole());
    assert_relative_eq!(area(outer.childs()[0].contour()), -300.0 * 300.0);
}

#[test]
fn deflate_tree_drops_the_frame() {
    let mut co = ClipperOffset::default();
    co.add_path(&square(0, 0, 1000), JoinType::Miter, EndType::ClosedPolygon);
    let tree = co.execute_tree(-100.0).unwrap();
    assert_eq!(tree.child_count(), 1);
    let node = &tree.childs()[0];
    assert!(!node.is_hole());
    assert_relative_eq!(area(node.contour()), 640_000.0);
}

#[test_case(EndType::OpenButt, 100_000.0, 0.0 ; "butt")]
#[test_case(EndType::OpenSquare, 110_000.0, 0.0 ; "square")]
#[test_case(EndType::OpenRound, 100_000.0 + PI * 2_500.0, 0.01 ; "round")]
fn open_segment_caps(end: EndType, expected: f64, tolerance: f64) {
    let out = offset(&[pts(&[(0, 0), (1000, 0)])], JoinType::Round, end, 50.0);
    assert_eq!(out.len(), 1);
    if tolerance == 0.0 {
        assert_relative_eq!(area(&out[0]), expected);
    } else {
        assert_area_approx(area(&out[0]), expected, tolerance, "round caps");
    }
}

#[test]
fn closed_line_outlines_both_sides() {
    let out = offset(&[square(0, 0, 1000)], JoinType::Miter, EndType::ClosedLine, 50.0);
    assert_eq!(out.len(), 2);
    assert_relative_eq!(total_area(&out), 1100.0 * 1100.0 - 900.0 * 900.0);
}

#[test]
fn single_point_becomes_disc_or_square() {
    let dot = [pts(&[(0, 0)])];
    let disc = offset(&dot, JoinType::Round, EndType::OpenRound, 100.0);
    assert_eq!(disc.len(), 1);
    assert_area_approx(area(&disc[0]), PI * 10_000.0, 0.01, "disc");

    let block = offset(&dot, JoinType::Square, EndType::OpenSquare, 100.0);
    assert_eq!(block.len(), 1);
    assert_relative_eq!(area(&block[0]), 200.0 * 200.0);
}

#[test]
fn arc_tolerance_controls_vertex_count() {
    let coarse = {
        let mut co = ClipperOffset::new(2.0, 5.0);
        co.add_path(&square(0, 0, 1000), JoinType::Round, EndType::ClosedPolygon);
        co.execute(100.0).unwrap()
    };
    let fine = {
        let mut co = ClipperOffset::new(2.0, 0.05);
        co.add_path(&square(0, 0, 1000), JoinType::Round, EndType::ClosedPolygon);
        co.execute(100.0).unwrap()
    };
    assert!(fine[0].len() > coarse[0].len());
}

#[test]
fn non_finite_delta_is_rejected() {
    let mut co = ClipperOffset::default();
    co.add_path(&square(0, 0, 10), JoinType::Miter, EndType::ClosedPolygon);
    assert!(matches!(co.execute(f64::NAN), Err(ClipError::InvalidParameter(_))));
    assert!(matches!(co.execute_tree(f64::INFINITY), Err(ClipError::InvalidParameter(_))));
}

#[test]
fn cleared_offsetter_produces_nothing() {
    let mut co = ClipperOffset::default();
    co.add_path(&square(0, 0, 10), JoinType::Miter, EndType::ClosedPolygon);
    co.clear();
    assert!(co.execute(5.0).unwrap().is_empty());
}
