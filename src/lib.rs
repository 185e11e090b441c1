// vatti-clip: Pure Rust port of Clipper 6.4.2 (Vatti polygon clipping and offsetting)
// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)

pub mod arena;
pub mod clipper;
pub mod clipper_base;
pub mod edge;
pub mod error;
pub mod geom;
pub mod offset;
pub mod polytree;
pub mod scanbeam;
pub mod simplify;

pub use clipper::{ClipType, Clipper, InitOptions, PolyFillType, PolyType};
pub use error::{ClipError, ClipResult};
pub use geom::{
    area, orientation, point_in_polygon, reverse_path, reverse_paths, CInt, DoublePoint, IntPoint, IntRect, Path,
    Paths, HI_RANGE, LO_RANGE,
};
pub use offset::{ClipperOffset, EndType, JoinType};
pub use polytree::{closed_paths_from_polytree, open_paths_from_polytree, polytree_to_paths, PolyNode, PolyTree};
pub use simplify::{
    clean_polygon, clean_polygons, minkowski_diff, minkowski_sum, minkowski_sum_paths, simplify_polygon,
    simplify_polygons,
};
