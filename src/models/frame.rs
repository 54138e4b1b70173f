// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-frame annotation state.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// The complete annotation state of one frame at a point in time.
///
/// Snapshots of this type are what the history system stores and restores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameState {
    /// Frame identifier (the image file path in the full application).
    pub frame_id: String,
    pub shapes: Vec<Shape>,
}

impl FrameState {
    pub fn new(frame_id: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self {
            frame_id: frame_id.into(),
            shapes,
        }
    }

    /// An empty frame: no annotation present.
    pub fn empty(frame_id: impl Into<String>) -> Self {
        Self::new(frame_id, Vec::new())
    }
}

/// Two frame states are equal iff their shape sequences are element-wise
/// equal on label, label2, points and difficult.
impl PartialEq for FrameState {
    fn eq(&self, other: &Self) -> bool {
        self.frame_id == other.frame_id
            && self.shapes.len() == other.shapes.len()
            && self
                .shapes
                .iter()
                .zip(other.shapes.iter())
                .all(|(a, b)| a.same_annotation(b))
    }
}
