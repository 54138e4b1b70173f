// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape data structures.
//!
//! This module defines the core data structures for representing
//! annotated shapes and their serialized form.

use serde::{Deserialize, Serialize};

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An annotated shape: a closed polygon with labels and tracking state.
///
/// Rectangles carry exactly 4 points; any polygon with at least 2 points
/// has a well-defined bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// Primary label (may be empty).
    pub label: String,
    /// Optional secondary label (dual-label mode).
    pub label2: Option<String>,
    pub points: Vec<Point>,
    pub difficult: bool,
    /// Stable object identity within a tracking session.
    pub track_id: Option<u32>,
}

impl Shape {
    /// Create a shape with the given primary label and no points.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            label2: None,
            points: Vec::new(),
            difficult: false,
            track_id: None,
        }
    }

    /// Create a rectangle from two opposite corners.
    pub fn rect(label: impl Into<String>, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            label: label.into(),
            label2: None,
            points: vec![
                Point::new(xmin, ymin),
                Point::new(xmax, ymin),
                Point::new(xmax, ymax),
                Point::new(xmin, ymax),
            ],
            difficult: false,
            track_id: None,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Whether this shape is a 4-point rectangle.
    pub fn is_rect(&self) -> bool {
        self.points.len() == 4
    }

    /// Annotation equality: label, label2, points and difficult flag.
    ///
    /// The track id is session-local state and deliberately excluded, so a
    /// re-tracked frame compares equal to its snapshot.
    pub fn same_annotation(&self, other: &Shape) -> bool {
        self.label == other.label
            && self.label2 == other.label2
            && self.points == other.points
            && self.difficult == other.difficult
    }
}

/// Wire form of a shape as exchanged with the annotation storage layer.
///
/// Mirrors what the format readers and writers produce: no tracking state,
/// bare coordinate pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label2: Option<String>,
    pub points: Vec<(f64, f64)>,
    #[serde(default)]
    pub difficult: bool,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        Self {
            label: shape.label.clone(),
            label2: shape.label2.clone(),
            points: shape.points.iter().map(|p| (p.x, p.y)).collect(),
            difficult: shape.difficult,
        }
    }
}

impl From<&ShapeRecord> for Shape {
    fn from(record: &ShapeRecord) -> Self {
        Self {
            label: record.label.clone(),
            label2: record.label2.clone(),
            points: record.points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            difficult: record.difficult,
            track_id: None,
        }
    }
}

/// Convert a shape list to its wire form.
pub fn to_records(shapes: &[Shape]) -> Vec<ShapeRecord> {
    shapes.iter().map(ShapeRecord::from).collect()
}

/// Convert a wire-form list back to shapes.
pub fn from_records(records: &[ShapeRecord]) -> Vec<Shape> {
    records.iter().map(Shape::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_has_four_points() {
        let shape = Shape::rect("cow", 10.0, 20.0, 30.0, 40.0);
        assert!(shape.is_rect());
        assert_eq!(shape.points[0], Point::new(10.0, 20.0));
        assert_eq!(shape.points[2], Point::new(30.0, 40.0));
    }

    #[test]
    fn test_annotation_equality_ignores_track_id() {
        let mut a = Shape::rect("cow", 0.0, 0.0, 10.0, 10.0);
        let mut b = a.clone();
        a.track_id = Some(1);
        b.track_id = Some(2);
        assert!(a.same_annotation(&b));

        b.label = "horse".to_string();
        assert!(!a.same_annotation(&b));
    }

    #[test]
    fn test_record_roundtrip_drops_track_id() {
        let mut shape = Shape::rect("cow", 1.0, 2.0, 3.0, 4.0);
        shape.label2 = Some("7".to_string());
        shape.difficult = true;
        shape.track_id = Some(5);

        let record = ShapeRecord::from(&shape);
        let back = Shape::from(&record);
        assert!(shape.same_annotation(&back));
        assert_eq!(back.track_id, None);
    }
}
