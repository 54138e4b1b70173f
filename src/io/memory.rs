// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory annotation store.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::io::AnnotationPort;
use crate::models::ShapeRecord;

/// Annotation storage held entirely in memory.
///
/// The standard fake for engine tests, also usable by hosts that keep
/// annotations in their own model and only need the core's semantics.
#[derive(Debug, Default)]
pub struct MemoryPort {
    frames: HashMap<String, Vec<ShapeRecord>>,
    active_frame: Option<String>,
    failing_frames: HashSet<String>,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a frame with an annotation.
    pub fn insert(&mut self, frame_id: impl Into<String>, shapes: Vec<ShapeRecord>) {
        self.frames.insert(frame_id.into(), shapes);
    }

    /// The frame most recently activated by a restore, if any.
    pub fn active_frame(&self) -> Option<&str> {
        self.active_frame.as_deref()
    }

    /// Make every save to `frame_id` fail, for exercising abort paths.
    pub fn fail_saves_for(&mut self, frame_id: impl Into<String>) {
        self.failing_frames.insert(frame_id.into());
    }
}

impl AnnotationPort for MemoryPort {
    fn load_shapes(&self, frame_id: &str) -> Option<Vec<ShapeRecord>> {
        self.frames.get(frame_id).cloned()
    }

    fn save_shapes(&mut self, frame_id: &str, shapes: &[ShapeRecord]) -> Result<()> {
        if self.failing_frames.contains(frame_id) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("simulated save failure for {frame_id}"),
            )));
        }
        self.frames.insert(frame_id.to_string(), shapes.to_vec());
        Ok(())
    }

    fn activate_frame(&mut self, frame_id: &str) {
        self.active_frame = Some(frame_id.to_string());
    }
}
