// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! IOU-based shape matching between two frames.
//!
//! Set matching solves the full assignment problem so crossing objects are
//! paired globally, not greedily. Single-best lookups (used by label
//! propagation) go through a cheap pre-filter that only ever rejects
//! candidates whose IOU provably falls below the threshold.

use crate::models::Shape;
use crate::track::hungarian;
use crate::util::geometry::{self, BoundingBox};

/// Default minimum IOU for a pairing to count as a match.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.4;

/// One accepted pairing between a previous-frame and a current-frame shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPair {
    pub prev: usize,
    pub curr: usize,
    pub iou: f64,
}

/// Matcher with a fixed IOU acceptance threshold.
#[derive(Debug, Clone)]
pub struct Matcher {
    iou_threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_IOU_THRESHOLD)
    }
}

impl Matcher {
    pub fn new(iou_threshold: f64) -> Self {
        Self { iou_threshold }
    }

    pub fn iou_threshold(&self) -> f64 {
        self.iou_threshold
    }

    /// IOU between two shapes' bounding boxes.
    ///
    /// A malformed shape (fewer than 2 points) has no box and scores 0,
    /// so it can never match.
    pub fn shape_iou(a: &Shape, b: &Shape) -> f64 {
        match (geometry::bbox(&a.points), geometry::bbox(&b.points)) {
            (Ok(ba), Ok(bb)) => geometry::iou(&ba, &bb),
            _ => 0.0,
        }
    }

    /// Optimal one-to-one matching between two shape sets.
    ///
    /// Builds a `1 - IOU` cost matrix, solves it, and keeps only pairs at
    /// or above the threshold. Current-frame shapes absent from the result
    /// are unmatched and should receive a fresh identity.
    pub fn match_sets(&self, prev: &[Shape], curr: &[Shape]) -> Vec<MatchPair> {
        if prev.is_empty() || curr.is_empty() {
            return Vec::new();
        }

        let cost: Vec<Vec<f64>> = prev
            .iter()
            .map(|p| curr.iter().map(|c| 1.0 - Self::shape_iou(p, c)).collect())
            .collect();

        let assignment = hungarian::solve(&cost);
        let mut pairs = Vec::new();
        for (i, assigned) in assignment.into_iter().enumerate() {
            if let Some(j) = assigned {
                let iou = 1.0 - cost[i][j];
                if iou >= self.iou_threshold {
                    pairs.push(MatchPair {
                        prev: i,
                        curr: j,
                        iou,
                    });
                }
            }
        }
        pairs
    }

    /// Find the candidate with the highest IOU against `prev`, if any
    /// clears the threshold.
    ///
    /// Candidates are pre-filtered on an IOU upper bound before the full
    /// computation; ties go to the first candidate with the highest IOU.
    pub fn best_match(&self, prev: &Shape, candidates: &[Shape]) -> Option<(usize, f64)> {
        let prev_box = geometry::bbox(&prev.points).ok()?;

        let mut best: Option<(usize, f64)> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            let Ok(cand_box) = geometry::bbox(&candidate.points) else {
                continue;
            };
            if iou_upper_bound(&prev_box, &cand_box) < self.iou_threshold {
                continue;
            }
            let iou = geometry::iou(&prev_box, &cand_box);
            if iou >= self.iou_threshold && best.map_or(true, |(_, b)| iou > b) {
                best = Some((idx, iou));
            }
        }
        best.filter(|&(_, iou)| iou > 0.0)
    }
}

/// Cheap upper bound on `iou(a, b)`.
///
/// Boxes separated on either axis cannot intersect; otherwise the
/// intersection never exceeds the smaller extent per axis and the union is
/// at least the larger of the two areas. Rejecting when the bound is below
/// the threshold can therefore never drop a pair the full computation
/// would accept.
fn iou_upper_bound(a: &BoundingBox, b: &BoundingBox) -> f64 {
    if a.xmax <= b.xmin || b.xmax <= a.xmin || a.ymax <= b.ymin || b.ymax <= a.ymin {
        return 0.0;
    }
    let max_area = a.area().max(b.area());
    if max_area <= 0.0 {
        return 0.0;
    }
    let max_intersection = a.width().min(b.width()) * a.height().min(b.height());
    max_intersection / max_area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(xmin: f64, xmax: f64) -> Shape {
        Shape::rect("", xmin, 0.0, xmax, 100.0)
    }

    #[test]
    fn test_match_sets_empty() {
        let matcher = Matcher::default();
        assert!(matcher.match_sets(&[], &[strip(0.0, 10.0)]).is_empty());
        assert!(matcher.match_sets(&[strip(0.0, 10.0)], &[]).is_empty());
    }

    #[test]
    fn test_match_sets_crossing_boxes() {
        // Two boxes swap positions between frames; each previous box still
        // overlaps its counterpart's new position far more than its own.
        let prev = vec![strip(0.0, 100.0), strip(60.0, 160.0)];
        let curr = vec![strip(58.0, 158.0), strip(2.0, 102.0)];

        let matcher = Matcher::default();
        let pairs = matcher.match_sets(&prev, &curr);
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].prev, pairs[0].curr), (0, 1));
        assert_eq!((pairs[1].prev, pairs[1].curr), (1, 0));
        assert!(pairs.iter().all(|p| p.iou > 0.9));
    }

    #[test]
    fn test_match_sets_beats_greedy() {
        // Row-greedy matching would give P0 its slightly better neighbor C0
        // and leave P1 with a sub-threshold leftover; the optimal pairing
        // crosses over and matches both.
        let prev = vec![strip(0.0, 100.0), strip(26.0, 126.0)];
        let curr = vec![strip(23.0, 123.0), strip(-26.0, 74.0)];

        let matcher = Matcher::default();
        let pairs = matcher.match_sets(&prev, &curr);
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].prev, pairs[0].curr), (0, 1));
        assert_eq!((pairs[1].prev, pairs[1].curr), (1, 0));
    }

    #[test]
    fn test_match_sets_threshold_gating() {
        let prev = vec![strip(0.0, 100.0)];
        let curr = vec![strip(90.0, 190.0)]; // IOU 10/190, well below 0.4
        let matcher = Matcher::default();
        assert!(matcher.match_sets(&prev, &curr).is_empty());
    }

    #[test]
    fn test_best_match_picks_highest_iou() {
        let prev = strip(0.0, 100.0);
        let candidates = vec![strip(40.0, 140.0), strip(10.0, 110.0), strip(200.0, 300.0)];
        let matcher = Matcher::default();
        let (idx, iou) = matcher.best_match(&prev, &candidates).unwrap();
        assert_eq!(idx, 1);
        assert!((iou - 90.0 / 110.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_match_none_below_threshold() {
        let prev = strip(0.0, 100.0);
        let candidates = vec![strip(80.0, 180.0)]; // IOU 20/180
        let matcher = Matcher::default();
        assert!(matcher.best_match(&prev, &candidates).is_none());
    }

    #[test]
    fn test_best_match_ignores_malformed_candidates() {
        let prev = strip(0.0, 100.0);
        let mut degenerate = Shape::new("");
        degenerate.add_point(crate::models::Point::new(50.0, 50.0));
        let candidates = vec![degenerate, strip(5.0, 105.0)];
        let matcher = Matcher::default();
        assert_eq!(matcher.best_match(&prev, &candidates).unwrap().0, 1);
    }

    #[test]
    fn test_prefilter_keeps_half_width_candidate() {
        // A candidate at 49% of the source width still reaches IOU 0.49;
        // the pre-filter must not reject it the way a naive 50% size gate
        // would.
        let prev = strip(0.0, 100.0);
        let candidates = vec![strip(0.0, 49.0)];
        let matcher = Matcher::default();
        let (idx, iou) = matcher.best_match(&prev, &candidates).unwrap();
        assert_eq!(idx, 0);
        assert!((iou - 0.49).abs() < 1e-12);
    }

    #[test]
    fn test_prefilter_agrees_with_full_scan() {
        let prev = strip(0.0, 100.0);
        let candidates: Vec<Shape> = (0..20)
            .map(|i| strip(i as f64 * 15.0, i as f64 * 15.0 + 80.0))
            .collect();
        let matcher = Matcher::default();

        // Exhaustive reference without the pre-filter.
        let mut expected: Option<(usize, f64)> = None;
        for (idx, c) in candidates.iter().enumerate() {
            let iou = Matcher::shape_iou(&prev, c);
            if iou >= matcher.iou_threshold() && expected.map_or(true, |(_, b)| iou > b) {
                expected = Some((idx, iou));
            }
        }
        assert_eq!(matcher.best_match(&prev, &candidates), expected);
    }
}
