// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides axis-aligned bounding-box extraction from point
//! sets and the Intersection-over-Union similarity used by the matcher.

use crate::error::{Error, Result};
use crate::models::Point;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.xmin + self.xmax) / 2.0, (self.ymin + self.ymax) / 2.0)
    }
}

/// Extract the bounding box of a point set.
///
/// Fails with `InsufficientPoints` for fewer than 2 points; a degenerate
/// (zero-area) box is still a valid result.
pub fn bbox(points: &[Point]) -> Result<BoundingBox> {
    if points.len() < 2 {
        return Err(Error::InsufficientPoints {
            count: points.len(),
        });
    }

    let mut b = BoundingBox {
        xmin: points[0].x,
        ymin: points[0].y,
        xmax: points[0].x,
        ymax: points[0].y,
    };
    for p in &points[1..] {
        b.xmin = b.xmin.min(p.x);
        b.ymin = b.ymin.min(p.y);
        b.xmax = b.xmax.max(p.x);
        b.ymax = b.ymax.max(p.y);
    }
    Ok(b)
}

/// Intersection over Union of two boxes, in `[0, 1]`.
///
/// Returns 0 when the boxes do not overlap or either has zero area.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let ix_min = a.xmin.max(b.xmin);
    let iy_min = a.ymin.max(b.ymin);
    let ix_max = a.xmax.min(b.xmax);
    let iy_max = a.ymax.min(b.ymax);

    if ix_max < ix_min || iy_max < iy_min {
        return 0.0;
    }

    let intersection = (ix_max - ix_min) * (iy_max - iy_min);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> BoundingBox {
        BoundingBox {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    #[test]
    fn test_bbox_from_points() {
        let points = vec![
            Point::new(5.0, 8.0),
            Point::new(1.0, 12.0),
            Point::new(9.0, 2.0),
        ];
        let b = bbox(&points).unwrap();
        assert_eq!(b, bx(1.0, 2.0, 9.0, 12.0));
    }

    #[test]
    fn test_bbox_insufficient_points() {
        assert!(matches!(
            bbox(&[Point::new(1.0, 1.0)]),
            Err(Error::InsufficientPoints { count: 1 })
        ));
        assert!(bbox(&[]).is_err());
    }

    #[test]
    fn test_iou_identity() {
        let a = bx(10.0, 10.0, 50.0, 50.0);
        assert_eq!(iou(&a, &a), 1.0);
    }

    #[test]
    fn test_iou_disjoint() {
        let a = bx(0.0, 0.0, 10.0, 10.0);
        let b = bx(20.0, 20.0, 30.0, 30.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_symmetric() {
        let a = bx(0.0, 0.0, 10.0, 10.0);
        let b = bx(5.0, 5.0, 15.0, 15.0);
        assert_eq!(iou(&a, &b), iou(&b, &a));
        // 25 / (100 + 100 - 25)
        assert!((iou(&a, &b) - 25.0 / 175.0).abs() < 1e-12);
    }

    #[test]
    fn test_iou_zero_area() {
        let a = bx(0.0, 0.0, 0.0, 10.0);
        let b = bx(0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_containment() {
        let outer = bx(0.0, 0.0, 10.0, 10.0);
        let inner = bx(2.0, 2.0, 8.0, 8.0);
        assert!((iou(&outer, &inner) - 36.0 / 100.0).abs() < 1e-12);
    }
}
