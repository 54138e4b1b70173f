// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-frame operations: one logical user action spanning several frames.

use crate::models::FrameState;

/// What kind of user action produced a multi-frame operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    LabelPropagation,
    BbDuplication,
    ContinuousTracking,
}

/// Before/after states of one frame touched by a multi-frame operation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameChange {
    pub frame_id: String,
    pub before: FrameState,
    pub after: FrameState,
}

/// An ordered set of frame changes undone and redone as one unit.
///
/// Built incrementally by an engine while it walks frames, then committed
/// to the operation log, after which it is never mutated again.
#[derive(Debug, Clone)]
pub struct MultiFrameOperation {
    pub kind: OperationKind,
    pub description: String,
    changes: Vec<FrameChange>,
}

impl MultiFrameOperation {
    pub fn new(kind: OperationKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            changes: Vec::new(),
        }
    }

    /// Record a frame's transition. Skips frames whose state did not
    /// actually change.
    pub fn record(&mut self, before: FrameState, after: FrameState) {
        if before == after {
            return;
        }
        debug_assert_eq!(before.frame_id, after.frame_id);
        self.changes.push(FrameChange {
            frame_id: after.frame_id.clone(),
            before,
            after,
        });
    }

    pub fn changes(&self) -> &[FrameChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}
