// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp/hpp (IntPoint, Area, PointInPolygon, SlopesEqual)
//
// Integer geometry primitives.
//
// Every topology decision in the sweep goes through the exact predicates
// here. Coordinates are i64; the cross products used for slope and
// orientation tests are evaluated with i64 arithmetic while every input
// coordinate fits in LO_RANGE, and with i128 once any coordinate exceeds it.

use std::cmp::Ordering;

use crate::error::{ClipError, ClipResult};

pub type CInt = i64;

/// Largest magnitude for which 64-bit cross products cannot overflow.
pub const LO_RANGE: CInt = 0x3FFF_FFFF;
/// Largest magnitude accepted at all.
pub const HI_RANGE: CInt = 0x3FFF_FFFF_FFFF_FFFF;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntPoint {
    pub x: CInt,
    pub y: CInt,
}

impl IntPoint {
    #[inline]
    pub const fn new(x: CInt, y: CInt) -> Self {
        IntPoint { x, y }
    }
}

impl From<(CInt, CInt)> for IntPoint {
    fn from((x, y): (CInt, CInt)) -> Self {
        IntPoint { x, y }
    }
}

pub type Path = Vec<IntPoint>;
pub type Paths = Vec<Path>;

/// Axis-aligned bounds. `top` is the minimum Y.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntRect {
    pub left: CInt,
    pub top: CInt,
    pub right: CInt,
    pub bottom: CInt,
}

/// Float point used by the offsetter for unit normals.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DoublePoint {
    pub x: f64,
    pub y: f64,
}

impl DoublePoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        DoublePoint { x, y }
    }
}

// ─────────────────────────── Range selection ──────────────────────────────────

/// Arithmetic strategy for exact cross-product signs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// All coordinates within LO_RANGE: i64 products.
    #[default]
    Low,
    /// Some coordinate beyond LO_RANGE: i128 products.
    Full,
}

impl RangeMode {
    /// Widens `self` as needed to cover `pt`. Fails beyond HI_RANGE.
    pub fn widen_for(self, pt: IntPoint) -> ClipResult<RangeMode> {
        let mag = pt.x.unsigned_abs().max(pt.y.unsigned_abs());
        if mag > HI_RANGE as u64 {
            return Err(ClipError::CoordinateOutOfRange { x: pt.x, y: pt.y });
        }
        if mag > LO_RANGE as u64 {
            Ok(RangeMode::Full)
        } else {
            Ok(self)
        }
    }
}

/// Sign of `a * b - c * d`, exact for the given range.
#[inline]
pub fn cross_sign(a: CInt, b: CInt, c: CInt, d: CInt, mode: RangeMode) -> Ordering {
    match mode {
        RangeMode::Low => (a * b).cmp(&(c * d)),
        RangeMode::Full => (a as i128 * b as i128).cmp(&(c as i128 * d as i128)),
    }
}

/// True if segment pt1-pt2 and pt2-pt3 are collinear.
#[inline]
pub fn slopes_equal3(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint, mode: RangeMode) -> bool {
    cross_sign(pt1.y - pt2.y, pt2.x - pt3.x, pt1.x - pt2.x, pt2.y - pt3.y, mode) == Ordering::Equal
}

/// True if segment pt1-pt2 is parallel to pt3-pt4.
#[inline]
pub fn slopes_equal4(
    pt1: IntPoint,
    pt2: IntPoint,
    pt3: IntPoint,
    pt4: IntPoint,
    mode: RangeMode,
) -> bool {
    cross_sign(pt1.y - pt2.y, pt3.x - pt4.x, pt1.x - pt2.x, pt3.y - pt4.y, mode) == Ordering::Equal
}

// ─────────────────────────── Path measures ────────────────────────────────────

/// Signed area; positive for counter-clockwise rings in a Y-up frame.
pub fn area(path: &[IntPoint]) -> f64 {
    let cnt = path.len();
    if cnt < 3 {
        return 0.0;
    }
    let mut a = 0.0f64;
    let mut j = cnt - 1;
    for i in 0..cnt {
        a += (path[j].x as f64 + path[i].x as f64) * (path[j].y as f64 - path[i].y as f64);
        j = i;
    }
    -a * 0.5
}

/// True when the ring's signed area is non-negative.
#[inline]
pub fn orientation(path: &[IntPoint]) -> bool {
    area(path) >= 0.0
}

/// Returns 0 if `pt` is outside, 1 if inside, -1 if on the boundary.
pub fn point_in_polygon(pt: IntPoint, path: &[IntPoint]) -> i32 {
    if path.len() < 3 {
        return 0;
    }
    point_in_ring(pt, path.iter().copied())
}

/// Crossing-number test over any closed vertex sequence.
pub(crate) fn point_in_ring<I>(pt: IntPoint, ring: I) -> i32
where
    I: IntoIterator<Item = IntPoint>,
{
    let mut iter = ring.into_iter();
    let first = match iter.next() {
        Some(p) => p,
        None => return 0,
    };
    let mut result = 0;
    let mut ip = first;
    for ip_next in iter.chain(std::iter::once(first)) {
        if ip_next.y == pt.y
            && (ip_next.x == pt.x || (ip.y == pt.y && ((ip_next.x > pt.x) == (ip.x < pt.x))))
        {
            return -1;
        }
        if (ip.y < pt.y) != (ip_next.y < pt.y) {
            if ip.x >= pt.x {
                if ip_next.x > pt.x {
                    result = 1 - result;
                } else {
                    match crossing_side(pt, ip, ip_next) {
                        None => return -1,
                        Some(flip) if flip => result = 1 - result,
                        _ => {}
                    }
                }
            } else if ip_next.x > pt.x {
                match crossing_side(pt, ip, ip_next) {
                    None => return -1,
                    Some(flip) if flip => result = 1 - result,
                    _ => {}
                }
            }
        }
        ip = ip_next;
    }
    result
}

/// None when `pt` lies on segment ip-ip_next.
#[inline]
fn crossing_side(pt: IntPoint, ip: IntPoint, ip_next: IntPoint) -> Option<bool> {
    let d = (ip.x - pt.x) as f64 * (ip_next.y - pt.y) as f64
        - (ip_next.x - pt.x) as f64 * (ip.y - pt.y) as f64;
    if d == 0.0 {
        None
    } else {
        Some((d > 0.0) == (ip_next.y > ip.y))
    }
}

pub fn reverse_path(path: &mut Path) {
    path.reverse();
}

pub fn reverse_paths(paths: &mut Paths) {
    for p in paths.iter_mut() {
        p.reverse();
    }
}

// ─────────────────────────── Helpers ──────────────────────────────────────────

#[inline]
pub fn round(value: f64) -> CInt {
    if value < 0.0 {
        (value - 0.5) as CInt
    } else {
        (value + 0.5) as CInt
    }
}

#[inline]
pub fn dist_sqrd(a: IntPoint, b: IntPoint) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx * dx + dy * dy
}

/// Squared perpendicular distance from `pt` to the infinite line ln1-ln2.
pub fn distance_from_line_sqrd(pt: IntPoint, ln1: IntPoint, ln2: IntPoint) -> f64 {
    let a = ln1.y as f64 - ln2.y as f64;
    let b = ln2.x as f64 - ln1.x as f64;
    let mut c = a * ln1.x as f64 + b * ln1.y as f64;
    c = a * pt.x as f64 + b * pt.y as f64 - c;
    (c * c) / (a * a + b * b)
}

/// True if pt2 is within `dist_sqrd` of the line pt1-pt3.
pub fn slopes_near_collinear(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint, dist_sqrd_max: f64) -> bool {
    // Test the point that lies between the other two along the dominant axis.
    if (pt1.x - pt2.x).abs() > (pt1.y - pt2.y).abs() {
        if (pt1.x > pt2.x) == (pt1.x < pt3.x) {
            distance_from_line_sqrd(pt1, pt2, pt3) < dist_sqrd_max
        } else if (pt2.x > pt1.x) == (pt2.x < pt3.x) {
            distance_from_line_sqrd(pt2, pt1, pt3) < dist_sqrd_max
        } else {
            distance_from_line_sqrd(pt3, pt1, pt2) < dist_sqrd_max
        }
    } else if (pt1.y > pt2.y) == (pt1.y < pt3.y) {
        distance_from_line_sqrd(pt1, pt2, pt3) < dist_sqrd_max
    } else if (pt2.y > pt1.y) == (pt2.y < pt3.y) {
        distance_from_line_sqrd(pt2, pt1, pt3) < dist_sqrd_max
    } else {
        distance_from_line_sqrd(pt3, pt1, pt2) < dist_sqrd_max
    }
}

#[inline]
pub fn points_are_close(a: IntPoint, b: IntPoint, dist_sqrd_max: f64) -> bool {
    dist_sqrd(a, b) <= dist_sqrd_max
}

/// True if pt2 lies strictly between pt1 and pt3 on their shared axis.
pub fn pt2_is_between_pt1_and_pt3(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint) -> bool {
    if pt1 == pt3 || pt1 == pt2 || pt3 == pt2 {
        false
    } else if pt1.x != pt3.x {
        (pt2.x > pt1.x) == (pt2.x < pt3.x)
    } else {
        (pt2.y > pt1.y) == (pt2.y < pt3.y)
    }
}

pub fn horz_segments_overlap(mut a1: CInt, mut a2: CInt, mut b1: CInt, mut b2: CInt) -> bool {
    if a1 > a2 {
        std::mem::swap(&mut a1, &mut a2);
    }
    if b1 > b2 {
        std::mem::swap(&mut b1, &mut b2);
    }
    a1 < b2 && b1 < a2
}

/// Overlapping open interval of two X ranges, if non-empty.
pub fn get_overlap(a1: CInt, a2: CInt, b1: CInt, b2: CInt) -> Option<(CInt, CInt)> {
    let (left, right) = if a1 < a2 {
        if b1 < b2 {
            (a1.max(b1), a2.min(b2))
        } else {
            (a1.max(b2), a2.min(b1))
        }
    } else if b1 < b2 {
        (a2.max(b1), a1.min(b2))
    } else {
        (a2.max(b2), a1.min(b1))
    };
    if left < right {
        Some((left, right))
    } else {
        None
    }
}

/// Unit normal of the directed segment pt1-pt2 (rotated clockwise).
pub fn get_unit_normal(pt1: IntPoint, pt2: IntPoint) -> DoublePoint {
    if pt2.x == pt1.x && pt2.y == pt1.y {
        return DoublePoint::new(0.0, 0.0);
    }
    let dx = (pt2.x - pt1.x) as f64;
    let dy = (pt2.y - pt1.y) as f64;
    let f = 1.0 / (dx * dx + dy * dy).sqrt();
    DoublePoint::new(dy * f, -dx * f)
}
