// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation storage port.
//!
//! The history and tracking engines never touch annotation files directly;
//! they go through [`AnnotationPort`], implemented by the format layer of
//! the host application. [`MemoryPort`] is an in-memory implementation for
//! tests and embedding, [`FilePort`] a minimal file-backed one.

pub mod file;
pub mod memory;

pub use file::{AnnotationFormat, FilePort};
pub use memory::MemoryPort;

use crate::error::Result;
use crate::models::ShapeRecord;

/// Storage collaborator contract for the annotation core.
pub trait AnnotationPort {
    /// Load the shapes annotated on a frame, or `None` if no annotation
    /// exists for it.
    fn load_shapes(&self, frame_id: &str) -> Option<Vec<ShapeRecord>>;

    /// Persist the full shape list of a frame, replacing what was there.
    fn save_shapes(&mut self, frame_id: &str, shapes: &[ShapeRecord]) -> Result<()>;

    /// Notification that a restore changed `frame_id`; hosts use this to
    /// refresh their display of the frame. Default: ignore.
    fn activate_frame(&mut self, _frame_id: &str) {}
}
