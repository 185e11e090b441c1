// Copyright 2025 Lars Brubaker
// Nested results and open path clipping through execute_tree.

mod helpers;

use approx::assert_relative_eq;
use helpers::{path_inside, path_outside, pts, square};
use pretty_assertions::assert_eq;
use vatti_clip::{
    area, closed_paths_from_polytree, open_paths_from_polytree, polytree_to_paths, ClipType, Clipper, IntPoint,
    PolyFillType, PolyType,
};

fn nested_squares_tree() -> vatti_clip::PolyTree {
    let mut c = Clipper::new();
    c.add_paths(
        &[square(0, 0, 100), square(20, 20, 60), square(40, 40, 20)],
        PolyType::Subject,
        true,
    )
    .unwrap();
    c.execute_tree(ClipType::Union, PolyFillType::EvenOdd, PolyFillType::EvenOdd)
        .unwrap()
}

#[test]
fn nesting_depth_sets_hole_flags() {
    let tree = nested_squares_tree();
    assert_eq!(tree.child_count(), 1);
    assert_eq!(tree.total(), 3);

    let outer = &tree.childs()[0];
    assert!(!outer.is_hole());
    assert_relative_eq!(area(outer.contour()), 10_000.0);
    assert_eq!(outer.child_count(), 1);

    let hole = &outer.childs()[0];
    assert!(hole.is_hole());
    assert_relative_eq!(area(hole.contour()), -3_600.0);
    assert!(path_inside(hole.contour(), outer.contour()));

    let island = &hole.childs()[0];
    assert!(!island.is_hole());
    assert_eq!(island.child_count(), 0);
    assert_relative_eq!(area(island.contour()), 400.0);
}

#[test]
fn iteration_visits_parents_first() {
    let tree = nested_squares_tree();
    let areas: Vec<f64> = tree.iter().map(|n| area(n.contour())).collect();
    assert_eq!(areas, vec![10_000.0, -3_600.0, 400.0]);
    assert_eq!((&tree).into_iter().filter(|n| n.is_hole()).count(), 1);
}

#[test]
fn flattening_keeps_every_closed_contour() {
    let tree = nested_squares_tree();
    assert_eq!(polytree_to_paths(&tree).len(), 3);
    assert_eq!(closed_paths_from_polytree(&tree).len(), 3);
    assert!(open_paths_from_polytree(&tree).is_empty());
}

#[test]
fn sibling_outers_share_top_level() {
    let mut c = Clipper::new();
    c.add_paths(&[square(0, 0, 10), square(20, 0, 10)], PolyType::Subject, true)
        .unwrap();
    let tree = c
        .execute_tree(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();
    assert_eq!(tree.child_count(), 2);
    assert!(tree.childs().iter().all(|n| !n.is_hole() && !n.is_open()));
}

#[test]
fn disjoint_unit_squares_stay_unrelated() {
    let mut c = Clipper::new();
    c.add_paths(&[square(0, 0, 1), square(100, 100, 1)], PolyType::Subject, true)
        .unwrap();
    let tree = c
        .execute_tree(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();
    assert_eq!(tree.child_count(), 2);
    assert_eq!(tree.total(), 2);
    for node in tree.childs() {
        assert_eq!(node.child_count(), 0);
        assert_relative_eq!(area(node.contour()), 1.0);
    }
}

#[test]
fn sibling_holes_lie_outside_each_other() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 100), PolyType::Subject, true).unwrap();
    c.add_paths(&[square(10, 10, 20), square(60, 60, 20)], PolyType::Clip, true)
        .unwrap();
    let tree = c
        .execute_tree(ClipType::Difference, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();
    assert_eq!(tree.child_count(), 1);
    let outer = &tree.childs()[0];
    assert_eq!(outer.child_count(), 2);

    let holes = outer.childs();
    for (i, hole) in holes.iter().enumerate() {
        assert!(hole.is_hole());
        assert_relative_eq!(area(hole.contour()), -400.0);
        assert!(path_inside(hole.contour(), outer.contour()));
        let sibling = &holes[1 - i];
        assert!(path_outside(hole.contour(), sibling.contour()));
    }
}

#[test]
fn open_line_clipped_to_square() {
    let mut c = Clipper::new();
    c.add_path(&pts(&[(-10, 20), (110, 80)]), PolyType::Subject, false)
        .unwrap();
    c.add_path(&square(0, 0, 100), PolyType::Clip, true).unwrap();
    let tree = c
        .execute_tree(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();

    assert!(closed_paths_from_polytree(&tree).is_empty());
    let open = open_paths_from_polytree(&tree);
    assert_eq!(open.len(), 1);
    let mut line = open[0].clone();
    line.sort_by_key(|p| p.x);
    assert_eq!(line, vec![IntPoint::new(0, 25), IntPoint::new(100, 75)]);
    assert!(tree.childs()[0].is_open());
    assert!(!tree.childs()[0].is_hole());
}

#[test]
fn open_line_minus_square_leaves_both_ends() {
    let mut c = Clipper::new();
    c.add_path(&pts(&[(-10, 20), (110, 80)]), PolyType::Subject, false)
        .unwrap();
    c.add_path(&square(0, 0, 100), PolyType::Clip, true).unwrap();
    let tree = c
        .execute_tree(ClipType::Difference, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();
    let open = open_paths_from_polytree(&tree);
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|p| p.len() == 2));
    assert!(open.iter().any(|p| p.contains(&IntPoint::new(-10, 20))));
    assert!(open.iter().any(|p| p.contains(&IntPoint::new(110, 80))));
}

#[test]
fn closed_and_open_subjects_together() {
    let mut c = Clipper::new();
    c.add_path(&square(60, 0, 30), PolyType::Subject, true).unwrap();
    c.add_path(&pts(&[(-10, 20), (110, 80)]), PolyType::Subject, false)
        .unwrap();
    c.add_path(&square(0, 0, 100), PolyType::Clip, true).unwrap();
    let tree = c
        .execute_tree(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();
    assert_eq!(closed_paths_from_polytree(&tree).len(), 1);
    assert_eq!(open_paths_from_polytree(&tree).len(), 1);
    assert_eq!(tree.child_count(), 2);
}
