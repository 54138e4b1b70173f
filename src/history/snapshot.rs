// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-frame linear undo/redo stack of immutable state snapshots.
//!
//! Each frame owns one store, created lazily on first touch. The entry at
//! index 0 is the frame's baseline (its state as loaded from storage) and
//! is never undone past. Snapshots are deep copies on both save and
//! retrieval, so stored history is immune to later mutation of live shapes.

use crate::models::FrameState;

/// Default per-frame history bound.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 30;

#[derive(Debug, Clone)]
struct Snapshot {
    state: FrameState,
    /// Operation tag, for logging only.
    label: String,
}

/// Linear snapshot history for a single frame.
///
/// Invariant: `cursor` stays within `[-1, len - 1]`; -1 only while the
/// store is empty. The restoring guard is enforced by the owning
/// [`OperationLog`](crate::history::OperationLog), the sole caller of
/// [`save`](Self::save).
#[derive(Debug)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
    cursor: isize,
    max_snapshots: usize,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SNAPSHOTS)
    }
}

impl SnapshotStore {
    pub fn new(max_snapshots: usize) -> Self {
        debug_assert!(max_snapshots >= 1);
        Self {
            snapshots: Vec::new(),
            cursor: -1,
            max_snapshots,
        }
    }

    /// Append a snapshot of `state`, discarding any redo branch.
    ///
    /// Evicts the oldest snapshot when the bound is exceeded, shifting the
    /// cursor so the current logical entry is unchanged.
    pub fn save(&mut self, state: &FrameState, label: &str) -> bool {
        // Drop everything after the cursor before appending.
        self.snapshots.truncate((self.cursor + 1) as usize);

        self.snapshots.push(Snapshot {
            state: state.clone(),
            label: label.to_string(),
        });
        self.cursor += 1;

        if self.snapshots.len() > self.max_snapshots {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }

        log::debug!(
            "snapshot saved: {} ({} states, cursor {})",
            label,
            self.snapshots.len(),
            self.cursor
        );
        self.check_invariant();
        true
    }

    /// Step back one snapshot and return the state now current.
    ///
    /// The baseline at index 0 is a floor: returns `None` once there.
    pub fn undo(&mut self) -> Option<FrameState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        let snapshot = &self.snapshots[self.cursor as usize];
        log::debug!("snapshot undo: {} (cursor {})", snapshot.label, self.cursor);
        Some(snapshot.state.clone())
    }

    /// Step forward one snapshot and return the state now current.
    pub fn redo(&mut self) -> Option<FrameState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        let snapshot = &self.snapshots[self.cursor as usize];
        log::debug!("snapshot redo: {} (cursor {})", snapshot.label, self.cursor);
        Some(snapshot.state.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len() as isize - 1
    }

    /// Deep copy of the snapshot at the cursor, if any.
    pub fn current(&self) -> Option<FrameState> {
        if self.cursor < 0 {
            return None;
        }
        Some(self.snapshots[self.cursor as usize].state.clone())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    fn check_invariant(&self) {
        debug_assert!(self.cursor >= -1 && self.cursor < self.snapshots.len() as isize);
        debug_assert!(self.snapshots.len() <= self.max_snapshots);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shape;

    fn state(n_shapes: usize) -> FrameState {
        let shapes = (0..n_shapes)
            .map(|i| Shape::rect(format!("s{i}"), 0.0, 0.0, 10.0 + i as f64, 10.0))
            .collect();
        FrameState::new("frame.jpg", shapes)
    }

    #[test]
    fn test_save_undo_redo_roundtrip() {
        let mut store = SnapshotStore::default();
        store.save(&state(1), "add shape");
        store.save(&state(2), "add shape");

        assert!(store.can_undo());
        assert_eq!(store.undo().unwrap(), state(1));
        assert!(store.can_redo());
        assert_eq!(store.redo().unwrap(), state(2));
        assert!(!store.can_redo());
    }

    #[test]
    fn test_baseline_is_never_undone_past() {
        let mut store = SnapshotStore::default();
        store.save(&state(0), "initial");
        assert!(!store.can_undo());
        assert_eq!(store.undo(), None);
        assert_eq!(store.current().unwrap(), state(0));
    }

    #[test]
    fn test_save_after_undo_discards_redo_branch() {
        let mut store = SnapshotStore::default();
        store.save(&state(1), "one");
        store.save(&state(2), "two");
        store.undo();
        store.save(&state(3), "three");

        assert!(!store.can_redo());
        assert_eq!(store.redo(), None);
        assert_eq!(store.current().unwrap(), state(3));
        assert_eq!(store.undo().unwrap(), state(1));
    }

    #[test]
    fn test_eviction_keeps_logical_current() {
        let mut store = SnapshotStore::new(3);
        for i in 0..5 {
            store.save(&state(i), "edit");
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.current().unwrap(), state(4));
        // Oldest surviving snapshot is state(2); two undos reach it.
        assert_eq!(store.undo().unwrap(), state(3));
        assert_eq!(store.undo().unwrap(), state(2));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_snapshots_are_deep_copies() {
        let mut store = SnapshotStore::default();
        let mut live = state(1);
        store.save(&live, "add");
        live.shapes[0].label = "mutated".to_string();
        assert_eq!(store.current().unwrap(), state(1));
    }
}
