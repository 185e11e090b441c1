// Copyright 2025 Lars Brubaker
// Path ingestion: degenerate input, range checks and collinear handling.

mod helpers;

use approx::assert_relative_eq;
use helpers::{clip_area, pts, square};
use pretty_assertions::assert_eq;
use vatti_clip::{
    area, ClipError, ClipType, Clipper, InitOptions, IntRect, PolyFillType, PolyType, HI_RANGE, LO_RANGE,
};

#[test]
fn degenerate_paths_are_dropped() {
    let mut c = Clipper::new();
    assert_eq!(c.add_path(&[], PolyType::Subject, true), Ok(false));
    assert_eq!(c.add_path(&pts(&[(0, 0), (10, 0)]), PolyType::Subject, true), Ok(false));
    assert_eq!(c.add_path(&pts(&[(3, 3), (3, 3), (3, 3)]), PolyType::Subject, true), Ok(false));
    assert_eq!(c.add_path(&pts(&[(0, 0), (5, 0), (10, 0)]), PolyType::Subject, true), Ok(false));
    assert_eq!(c.add_path(&pts(&[(1, 1), (1, 1)]), PolyType::Subject, false), Ok(false));
    let out = c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert!(out.is_empty());
}

#[test]
fn add_paths_reports_any_kept() {
    let mut c = Clipper::new();
    let paths = vec![pts(&[(0, 0), (1, 0)]), square(0, 0, 10)];
    assert_eq!(c.add_paths(&paths, PolyType::Subject, true), Ok(true));
    assert_eq!(c.add_paths(&paths[..1], PolyType::Subject, true), Ok(false));
}

#[test]
fn open_clip_paths_are_rejected() {
    let mut c = Clipper::new();
    let line = pts(&[(0, 0), (10, 10)]);
    assert_eq!(c.add_path(&line, PolyType::Clip, false), Err(ClipError::OpenPathNotSupported));
    assert_eq!(c.add_path(&line, PolyType::Subject, false), Ok(true));
}

#[test]
fn flat_execute_keeps_closed_results_beside_open_subjects() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 10), PolyType::Subject, true).unwrap();
    c.add_path(&pts(&[(0, 0), (10, 10)]), PolyType::Subject, false).unwrap();
    let result = c
        .execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero)
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_relative_eq!(area(&result[0]), 100.0);
}

#[test]
fn coordinates_beyond_full_range_are_rejected() {
    let mut c = Clipper::new();
    let too_big = pts(&[(0, 0), (HI_RANGE + 1, 0), (0, 10)]);
    assert_eq!(
        c.add_path(&too_big, PolyType::Subject, true),
        Err(ClipError::CoordinateOutOfRange { x: HI_RANGE + 1, y: 0 })
    );
    let negative = pts(&[(0, 0), (10, 0), (0, -HI_RANGE - 1)]);
    assert!(c.add_path(&negative, PolyType::Subject, true).is_err());
}

#[test]
fn large_coordinates_switch_to_wide_arithmetic() {
    let s: i64 = 1 << 40;
    assert!(10 * s > LO_RANGE);
    let a = vec![square(0, 0, 10 * s)];
    let b = vec![square(5 * s, 5 * s, 10 * s)];
    let scale = (s as f64) * (s as f64);
    assert_relative_eq!(clip_area(ClipType::Intersection, &a, &b), 25.0 * scale);
    assert_relative_eq!(clip_area(ClipType::Union, &a, &b), 175.0 * scale);
}

#[test]
fn closing_duplicates_and_repeats_are_ignored() {
    let mut c = Clipper::new();
    let path = pts(&[(0, 0), (0, 0), (10, 0), (10, 10), (10, 10), (0, 10), (0, 0)]);
    assert_eq!(c.add_path(&path, PolyType::Subject, true), Ok(true));
    let out = c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].len(), 4);
}

#[test]
fn collinear_vertices_follow_preserve_flag() {
    let with_midpoint = pts(&[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);

    let mut plain = Clipper::new();
    plain.add_path(&with_midpoint, PolyType::Subject, true).unwrap();
    let out = plain.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out[0].len(), 4);

    let mut keep = Clipper::with_options(InitOptions {
        preserve_collinear: true,
        ..InitOptions::default()
    });
    keep.add_path(&with_midpoint, PolyType::Subject, true).unwrap();
    let out = keep.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert_eq!(out[0].len(), 5);
    assert!(out[0].contains(&(5, 0).into()));
}

#[test]
fn bounds_cover_all_ingested_paths() {
    let mut c = Clipper::new();
    assert_eq!(c.get_bounds(), IntRect::default());
    c.add_path(&square(-5, 2, 10), PolyType::Subject, true).unwrap();
    c.add_path(&pts(&[(20, -4), (30, 40)]), PolyType::Subject, false).unwrap();
    assert_eq!(
        c.get_bounds(),
        IntRect {
            left: -5,
            top: -4,
            right: 30,
            bottom: 40
        }
    );
}

#[test]
fn clear_discards_ingested_paths() {
    let mut c = Clipper::new();
    c.add_path(&square(0, 0, 10), PolyType::Subject, true).unwrap();
    c.clear();
    let out = c.execute(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero).unwrap();
    assert!(out.is_empty());
}
