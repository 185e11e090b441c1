// Copyright 2025 Lars Brubaker
// License: Boost Software License 1.0 (MIT-compatible)
//
// Port of Clipper 6.4.2 clipper.cpp (SetWindingCount, IsContributing)
//
// Winding counts and fill-rule decisions.
//
// The decision tables are pure functions over an edge's winding state so
// that they can be tested without running a sweep.

use super::{ClipType, Clipper, PolyFillType, PolyType};
use crate::arena::INVALID;
use crate::edge::EdgeIdx;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FillRules {
    pub clip_type: ClipType,
    pub subject: PolyFillType,
    pub clip: PolyFillType,
}

impl FillRules {
    pub fn new(clip_type: ClipType, subject: PolyFillType, clip: PolyFillType) -> Self {
        FillRules { clip_type, subject, clip }
    }

    /// Fill rule of the edge's own polygon type.
    #[inline]
    pub fn own(&self, pt: PolyType) -> PolyFillType {
        match pt {
            PolyType::Subject => self.subject,
            PolyType::Clip => self.clip,
        }
    }

    /// Fill rule of the opposite polygon type.
    #[inline]
    pub fn other(&self, pt: PolyType) -> PolyFillType {
        match pt {
            PolyType::Subject => self.clip,
            PolyType::Clip => self.subject,
        }
    }
}

/// Winding state of one edge as seen by the decision tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Winding {
    pub poly_type: PolyType,
    pub wind_delta: i32,
    pub wind_cnt: i32,
    pub wind_cnt2: i32,
}

/// What a crossing of two closed-path edges does to the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CrossingAction {
    /// Close a local maximum (may merge two output records).
    AddLocalMax,
    /// Both edges continue their rings through the crossing.
    PassThrough,
    /// Only the first edge's ring continues; sides and indices swap.
    ContinueFirst,
    /// Only the second edge's ring continues; sides and indices swap.
    ContinueSecond,
    /// Start a new contributing region.
    AddLocalMin,
    SwapSides,
    Nothing,
}

/// Winding value under the given fill rule, sign-normalised.
#[inline]
pub(crate) fn effective_winding(pft: PolyFillType, cnt: i32) -> i32 {
    match pft {
        PolyFillType::Positive => cnt,
        PolyFillType::Negative => -cnt,
        _ => cnt.abs(),
    }
}

/// True if the opposite polygon's winding satisfies `pft` as "inside".
#[inline]
fn inside_other(pft: PolyFillType, cnt2: i32) -> bool {
    match pft {
        PolyFillType::EvenOdd | PolyFillType::NonZero => cnt2 != 0,
        PolyFillType::Positive => cnt2 > 0,
        PolyFillType::Negative => cnt2 < 0,
    }
}

/// True if an edge with this winding bounds a region of the result.
pub(crate) fn is_contributing(rules: &FillRules, w: Winding) -> bool {
    let pft = rules.own(w.poly_type);
    let pft2 = rules.other(w.poly_type);
    let own_ok = match pft {
        // A subject line is hidden when flagged inside a subject polygon.
        PolyFillType::EvenOdd => !(w.wind_delta == 0 && w.wind_cnt != 1),
        PolyFillType::NonZero => w.wind_cnt.abs() == 1,
        PolyFillType::Positive => w.wind_cnt == 1,
        PolyFillType::Negative => w.wind_cnt == -1,
    };
    if !own_ok {
        return false;
    }
    match rules.clip_type {
        ClipType::Intersection => inside_other(pft2, w.wind_cnt2),
        ClipType::Union => !inside_other(pft2, w.wind_cnt2),
        ClipType::Difference => match w.poly_type {
            PolyType::Subject => !inside_other(pft2, w.wind_cnt2),
            PolyType::Clip => inside_other(pft2, w.wind_cnt2),
        },
        ClipType::Xor => {
            if w.wind_delta == 0 {
                !inside_other(pft2, w.wind_cnt2)
            } else {
                true
            }
        }
    }
}

/// Updates both edges' winding counts for a crossing of closed-path edges.
/// `e1` is to the right of `e2` above the crossing.
pub(crate) fn cross_windings(rules: &FillRules, e1: &mut Winding, e2: &mut Winding) {
    if e1.poly_type == e2.poly_type {
        if rules.own(e1.poly_type) == PolyFillType::EvenOdd {
            std::mem::swap(&mut e1.wind_cnt, &mut e2.wind_cnt);
        } else {
            if e1.wind_cnt + e2.wind_delta == 0 {
                e1.wind_cnt = -e1.wind_cnt;
            } else {
                e1.wind_cnt += e2.wind_delta;
            }
            if e2.wind_cnt - e1.wind_delta == 0 {
                e2.wind_cnt = -e2.wind_cnt;
            } else {
                e2.wind_cnt -= e1.wind_delta;
            }
        }
    } else {
        if rules.own(e2.poly_type) != PolyFillType::EvenOdd {
            e1.wind_cnt2 += e2.wind_delta;
        } else {
            e1.wind_cnt2 = if e1.wind_cnt2 == 0 { 1 } else { 0 };
        }
        if rules.own(e1.poly_type) != PolyFillType::EvenOdd {
            e2.wind_cnt2 -= e1.wind_delta;
        } else {
            e2.wind_cnt2 = if e2.wind_cnt2 == 0 { 1 } else { 0 };
        }
    }
}

/// Output action for a crossing, given the already-updated windings.
pub(crate) fn crossing_action(
    rules: &FillRules,
    e1: Winding,
    e2: Winding,
    e1_contributing: bool,
    e2_contributing: bool,
) -> CrossingAction {
    let e1_wc = effective_winding(rules.own(e1.poly_type), e1.wind_cnt);
    let e2_wc = effective_winding(rules.own(e2.poly_type), e2.wind_cnt);
    let unit = |wc: i32| wc == 0 || wc == 1;

    if e1_contributing && e2_contributing {
        if !unit(e1_wc) || !unit(e2_wc) || (e1.poly_type != e2.poly_type && rules.clip_type != ClipType::Xor) {
            CrossingAction::AddLocalMax
        } else {
            CrossingAction::PassThrough
        }
    } else if e1_contributing {
        if unit(e2_wc) {
            CrossingAction::ContinueFirst
        } else {
            CrossingAction::Nothing
        }
    } else if e2_contributing {
        if unit(e1_wc) {
            CrossingAction::ContinueSecond
        } else {
            CrossingAction::Nothing
        }
    } else if unit(e1_wc) && unit(e2_wc) {
        let e1_wc2 = effective_winding(rules.other(e1.poly_type), e1.wind_cnt2);
        let e2_wc2 = effective_winding(rules.other(e2.poly_type), e2.wind_cnt2);
        if e1.poly_type != e2.poly_type {
            CrossingAction::AddLocalMin
        } else if e1_wc == 1 && e2_wc == 1 {
            let starts = match rules.clip_type {
                ClipType::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                ClipType::Union => e1_wc2 <= 0 && e2_wc2 <= 0,
                ClipType::Difference => {
                    (e1.poly_type == PolyType::Clip && e1_wc2 > 0 && e2_wc2 > 0)
                        || (e1.poly_type == PolyType::Subject && e1_wc2 <= 0 && e2_wc2 <= 0)
                }
                ClipType::Xor => true,
            };
            if starts {
                CrossingAction::AddLocalMin
            } else {
                CrossingAction::Nothing
            }
        } else {
            CrossingAction::SwapSides
        }
    } else {
        CrossingAction::Nothing
    }
}

impl Clipper {
    pub(crate) fn winding_of(&self, e: EdgeIdx) -> Winding {
        let ed = self.edge(e);
        Winding {
            poly_type: ed.poly_type,
            wind_delta: ed.wind_delta,
            wind_cnt: ed.wind_cnt,
            wind_cnt2: ed.wind_cnt2,
        }
    }

    pub(crate) fn store_winding(&mut self, e: EdgeIdx, w: Winding) {
        let ed = self.edge_mut(e);
        ed.wind_cnt = w.wind_cnt;
        ed.wind_cnt2 = w.wind_cnt2;
    }

    #[inline]
    pub(crate) fn is_contributing(&self, e: EdgeIdx) -> bool {
        is_contributing(&self.rules, self.winding_of(e))
    }

    #[inline]
    fn is_even_odd(&self, e: EdgeIdx) -> bool {
        self.rules.own(self.edge(e).poly_type) == PolyFillType::EvenOdd
    }

    #[inline]
    fn is_even_odd_alt(&self, e: EdgeIdx) -> bool {
        self.rules.other(self.edge(e).poly_type) == PolyFillType::EvenOdd
    }

    /// Derives a newly inserted edge's winding counts from its left
    /// neighbours in the AEL.
    pub(crate) fn set_winding_count(&mut self, edge: EdgeIdx) {
        let poly_type = self.edge(edge).poly_type;
        let wind_delta = self.edge(edge).wind_delta;

        // Nearest preceding closed edge of the same polygon type.
        let mut e = self.edge(edge).prev_in_ael;
        while e != INVALID && (self.edge(e).poly_type != poly_type || self.edge(e).wind_delta == 0) {
            e = self.edge(e).prev_in_ael;
        }

        let wind_cnt;
        let mut wind_cnt2;
        if e == INVALID {
            wind_cnt = if wind_delta == 0 {
                if self.rules.own(poly_type) == PolyFillType::Negative {
                    -1
                } else {
                    1
                }
            } else {
                wind_delta
            };
            wind_cnt2 = 0;
            e = self.active_edges;
        } else if wind_delta == 0 && self.clip_type != ClipType::Union {
            wind_cnt = 1;
            wind_cnt2 = self.edge(e).wind_cnt2;
            e = self.edge(e).next_in_ael;
        } else if self.is_even_odd(edge) {
            wind_cnt = if wind_delta == 0 {
                // Is the open edge inside a subject polygon?
                let mut inside = true;
                let mut e2 = self.edge(e).prev_in_ael;
                while e2 != INVALID {
                    if self.edge(e2).poly_type == self.edge(e).poly_type && self.edge(e2).wind_delta != 0 {
                        inside = !inside;
                    }
                    e2 = self.edge(e2).prev_in_ael;
                }
                if inside {
                    0
                } else {
                    1
                }
            } else {
                wind_delta
            };
            wind_cnt2 = self.edge(e).wind_cnt2;
            e = self.edge(e).next_in_ael;
        } else {
            let prev_cnt = self.edge(e).wind_cnt;
            let prev_delta = self.edge(e).wind_delta;
            wind_cnt = if prev_cnt * prev_delta < 0 {
                // The previous edge winds toward zero: we are outside it.
                if prev_cnt.abs() > 1 {
                    if prev_delta * wind_delta < 0 {
                        prev_cnt
                    } else {
                        prev_cnt + wind_delta
                    }
                } else if wind_delta == 0 {
                    1
                } else {
                    wind_delta
                }
            } else if wind_delta == 0 {
                if prev_cnt < 0 {
                    prev_cnt - 1
                } else {
                    prev_cnt + 1
                }
            } else if prev_delta * wind_delta < 0 {
                prev_cnt
            } else {
                prev_cnt + wind_delta
            };
            wind_cnt2 = self.edge(e).wind_cnt2;
            e = self.edge(e).next_in_ael;
        }

        // Accumulate the opposite type's winding up to `edge`.
        if self.is_even_odd_alt(edge) {
            while e != edge {
                if self.edge(e).wind_delta != 0 {
                    wind_cnt2 = if wind_cnt2 == 0 { 1 } else { 0 };
                }
                e = self.edge(e).next_in_ael;
            }
        } else {
            while e != edge {
                wind_cnt2 += self.edge(e).wind_delta;
                e = self.edge(e).next_in_ael;
            }
        }

        let ed = self.edge_mut(edge);
        ed.wind_cnt = wind_cnt;
        ed.wind_cnt2 = wind_cnt2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn closed(poly_type: PolyType, wind_cnt: i32, wind_cnt2: i32) -> Winding {
        Winding {
            poly_type,
            wind_delta: 1,
            wind_cnt,
            wind_cnt2,
        }
    }

    #[test_case(PolyFillType::EvenOdd, -3 => 3)]
    #[test_case(PolyFillType::NonZero, -2 => 2)]
    #[test_case(PolyFillType::Positive, -2 => -2)]
    #[test_case(PolyFillType::Negative, -2 => 2)]
    fn effective_winding_by_rule(pft: PolyFillType, cnt: i32) -> i32 {
        effective_winding(pft, cnt)
    }

    #[test_case(ClipType::Intersection, 0 => false)]
    #[test_case(ClipType::Intersection, 1 => true)]
    #[test_case(ClipType::Union, 0 => true)]
    #[test_case(ClipType::Union, 1 => false)]
    #[test_case(ClipType::Difference, 0 => true)]
    #[test_case(ClipType::Difference, 1 => false)]
    #[test_case(ClipType::Xor, 1 => true)]
    fn subject_contribution_by_clip_type(ct: ClipType, wind_cnt2: i32) -> bool {
        let rules = FillRules::new(ct, PolyFillType::NonZero, PolyFillType::NonZero);
        is_contributing(&rules, closed(PolyType::Subject, 1, wind_cnt2))
    }

    #[test]
    fn clip_edges_contribute_inside_subject_for_difference() {
        let rules = FillRules::new(ClipType::Difference, PolyFillType::NonZero, PolyFillType::NonZero);
        assert!(is_contributing(&rules, closed(PolyType::Clip, 1, 1)));
        assert!(!is_contributing(&rules, closed(PolyType::Clip, 1, 0)));
    }

    #[test]
    fn deep_winding_never_contributes_under_nonzero() {
        let rules = FillRules::new(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);
        assert!(!is_contributing(&rules, closed(PolyType::Subject, 2, 0)));
        let pos = FillRules::new(ClipType::Union, PolyFillType::Positive, PolyFillType::Positive);
        assert!(is_contributing(&rules, closed(PolyType::Subject, -1, 0)));
        assert!(!is_contributing(&pos, closed(PolyType::Subject, -1, 0)));
    }

    #[test]
    fn even_odd_same_type_crossing_swaps_counts() {
        let rules = FillRules::new(ClipType::Union, PolyFillType::EvenOdd, PolyFillType::EvenOdd);
        let mut a = closed(PolyType::Subject, 1, 0);
        let mut b = closed(PolyType::Subject, 0, 0);
        cross_windings(&rules, &mut a, &mut b);
        assert_eq!((a.wind_cnt, b.wind_cnt), (0, 1));
    }

    #[test]
    fn nonzero_same_type_crossing_adds_deltas() {
        let rules = FillRules::new(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);
        let mut a = closed(PolyType::Subject, 1, 0);
        let mut b = closed(PolyType::Subject, 2, 0);
        cross_windings(&rules, &mut a, &mut b);
        assert_eq!((a.wind_cnt, b.wind_cnt), (2, 1));
    }

    #[test]
    fn mixed_type_crossing_updates_opposite_counts() {
        let rules = FillRules::new(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::EvenOdd);
        let mut a = closed(PolyType::Subject, 1, 0);
        let mut b = closed(PolyType::Clip, 1, 0);
        cross_windings(&rules, &mut a, &mut b);
        // a sees clip (even-odd) toggled, b sees subject (non-zero) decremented.
        assert_eq!(a.wind_cnt2, 1);
        assert_eq!(b.wind_cnt2, -1);
    }

    #[test]
    fn crossing_action_table() {
        let rules = FillRules::new(ClipType::Intersection, PolyFillType::NonZero, PolyFillType::NonZero);
        let s = closed(PolyType::Subject, 1, 1);
        let c = closed(PolyType::Clip, 1, 1);
        assert_eq!(crossing_action(&rules, s, c, true, true), CrossingAction::AddLocalMax);
        assert_eq!(crossing_action(&rules, s, s, true, true), CrossingAction::PassThrough);
        assert_eq!(crossing_action(&rules, s, c, true, false), CrossingAction::ContinueFirst);
        assert_eq!(crossing_action(&rules, s, c, false, true), CrossingAction::ContinueSecond);
        assert_eq!(crossing_action(&rules, s, c, false, false), CrossingAction::AddLocalMin);
        let deep = closed(PolyType::Subject, 2, 0);
        assert_eq!(crossing_action(&rules, s, deep, true, false), CrossingAction::Nothing);
        let outside = closed(PolyType::Subject, 1, 0);
        assert_eq!(crossing_action(&rules, outside, outside, false, false), CrossingAction::Nothing);
        let zero = closed(PolyType::Subject, 0, 0);
        assert_eq!(crossing_action(&rules, outside, zero, false, false), CrossingAction::SwapSides);
    }
}
