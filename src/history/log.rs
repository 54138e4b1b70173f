// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Unified chronological undo/redo history.
//!
//! One global cursor over a single list mixing per-frame snapshot entries
//! and multi-frame operations, so plain edits and batch operations undo in
//! true chronological order regardless of which frame is active.
//!
//! A restore must never record itself as a new entry. The log is therefore
//! a two-state machine (`Idle` / `Restoring`): every mutating entry point
//! checks the mode, `undo`/`redo` run in `Restoring`, and hosts whose
//! apply path has side effects that re-enter the save path hold the
//! `Restoring` state open with [`begin_restore`](OperationLog::begin_restore).

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::history::operation::MultiFrameOperation;
use crate::history::snapshot::{SnapshotStore, DEFAULT_MAX_SNAPSHOTS};
use crate::io::AnnotationPort;
use crate::models::{to_records, FrameState};

/// Default bound on the unified history length.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// One entry in the unified history.
#[derive(Debug)]
pub enum UndoEntry {
    /// A single-frame edit, referencing a position in that frame's
    /// snapshot store.
    Single {
        frame_id: String,
        snapshot_index: usize,
    },
    /// A committed multi-frame operation.
    Multi { operation: MultiFrameOperation },
}

/// Restore re-entrancy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Idle,
    Restoring,
}

/// What an undo or redo restored.
#[derive(Debug, PartialEq)]
pub enum RestoreOutcome {
    /// A single-frame entry. `state` is `None` when the frame's store was
    /// already at its baseline: the cursor still moved, nothing changed in
    /// the frame. That is a legitimate outcome, not an error.
    Single {
        frame_id: String,
        state: Option<FrameState>,
    },
    /// A multi-frame operation; every listed state was written back
    /// through the port.
    Multi {
        description: String,
        restored: Vec<FrameState>,
    },
}

/// The unified operation log plus the per-frame snapshot stores it owns.
#[derive(Debug)]
pub struct OperationLog {
    entries: Vec<UndoEntry>,
    cursor: isize,
    max_entries: usize,
    frames: HashMap<String, SnapshotStore>,
    max_snapshots_per_frame: usize,
    mode: HistoryMode,
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_SNAPSHOTS)
    }
}

impl OperationLog {
    pub fn new(max_entries: usize, max_snapshots_per_frame: usize) -> Self {
        debug_assert!(max_entries >= 1);
        Self {
            entries: Vec::new(),
            cursor: -1,
            max_entries,
            frames: HashMap::new(),
            max_snapshots_per_frame,
            mode: HistoryMode::Idle,
        }
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Enter the `Restoring` state. Every save path becomes a no-op until
    /// [`end_restore`](Self::end_restore).
    pub fn begin_restore(&mut self) {
        debug_assert_eq!(self.mode, HistoryMode::Idle, "restore already in progress");
        self.mode = HistoryMode::Restoring;
    }

    pub fn end_restore(&mut self) {
        debug_assert_eq!(self.mode, HistoryMode::Restoring);
        self.mode = HistoryMode::Idle;
    }

    /// Seed a frame's snapshot store with its as-loaded state.
    ///
    /// Creates the store lazily; does nothing if the frame already has
    /// history or a restore is in progress. No log entry is created: the
    /// baseline is the floor undo never goes past.
    pub fn baseline(&mut self, state: &FrameState) -> bool {
        if self.mode == HistoryMode::Restoring {
            return false;
        }
        let store = self.store_mut(&state.frame_id);
        if !store.is_empty() {
            return false;
        }
        store.save(state, "initial")
    }

    /// Record a single-frame edit: snapshot the frame's new state and
    /// append a chronological entry pointing at it.
    ///
    /// Returns false (and records nothing) while a restore is in progress.
    pub fn record_single(&mut self, state: &FrameState, label: &str) -> bool {
        if self.mode == HistoryMode::Restoring {
            log::debug!("ignoring save during restore: {label}");
            return false;
        }

        let frame_id = state.frame_id.clone();
        let store = self.store_mut(&frame_id);
        store.save(state, label);
        let snapshot_index = store.cursor() as usize;

        self.push_entry(UndoEntry::Single {
            frame_id,
            snapshot_index,
        });
        true
    }

    /// Commit a completed multi-frame operation as one undoable unit.
    ///
    /// Empty operations are dropped; nothing is recorded during a restore.
    pub fn record_multi(&mut self, operation: MultiFrameOperation) -> bool {
        if self.mode == HistoryMode::Restoring {
            log::debug!("ignoring multi-frame commit during restore");
            return false;
        }
        if operation.is_empty() {
            return false;
        }
        log::info!(
            "committing multi-frame operation: {} ({} frames)",
            operation.description,
            operation.len()
        );
        self.push_entry(UndoEntry::Multi { operation });
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor >= 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() as isize - 1
    }

    /// Undo the entry at the cursor and move the cursor back.
    ///
    /// Single entries delegate to the frame's snapshot store; multi-frame
    /// operations write every `before` state back through `port`. The
    /// cursor move is atomic: it happens before any I/O, so a failed write
    /// never leaves it half-stepped.
    pub fn undo(&mut self, port: &mut dyn AnnotationPort) -> Result<RestoreOutcome> {
        if !self.can_undo() {
            return Err(Error::NothingToUndo);
        }
        let index = self.cursor as usize;
        self.cursor -= 1;

        let previous_mode = self.mode;
        self.mode = HistoryMode::Restoring;
        let outcome = self.apply(index, port, Direction::Undo);
        self.mode = previous_mode;
        outcome
    }

    /// Redo the entry after the cursor and move the cursor forward.
    pub fn redo(&mut self, port: &mut dyn AnnotationPort) -> Result<RestoreOutcome> {
        if !self.can_redo() {
            return Err(Error::NothingToRedo);
        }
        self.cursor += 1;
        let index = self.cursor as usize;

        let previous_mode = self.mode;
        self.mode = HistoryMode::Restoring;
        let outcome = self.apply(index, port, Direction::Redo);
        self.mode = previous_mode;
        outcome
    }

    /// Current snapshot of a frame, if it has history.
    pub fn current_state(&self, frame_id: &str) -> Option<FrameState> {
        self.frames.get(frame_id).and_then(|s| s.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per entry with the cursor marked, for debugging.
    pub fn describe(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let text = match entry {
                    UndoEntry::Single {
                        frame_id,
                        snapshot_index,
                    } => format!("{i}: edit {frame_id} @{snapshot_index}"),
                    UndoEntry::Multi { operation } => format!(
                        "{i}: {} ({} frames)",
                        operation.description,
                        operation.len()
                    ),
                };
                if i as isize == self.cursor {
                    format!("{text} <-- current")
                } else {
                    text
                }
            })
            .collect()
    }

    fn store_mut(&mut self, frame_id: &str) -> &mut SnapshotStore {
        let max = self.max_snapshots_per_frame;
        self.frames
            .entry(frame_id.to_string())
            .or_insert_with(|| SnapshotStore::new(max))
    }

    fn push_entry(&mut self, entry: UndoEntry) {
        // Truncate the redo branch before appending.
        self.entries.truncate((self.cursor + 1) as usize);
        self.entries.push(entry);
        self.cursor += 1;

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
            self.cursor -= 1;
        }
        debug_assert!(self.cursor >= -1 && self.cursor < self.entries.len() as isize);
    }

    fn apply(
        &mut self,
        index: usize,
        port: &mut dyn AnnotationPort,
        direction: Direction,
    ) -> Result<RestoreOutcome> {
        match &self.entries[index] {
            UndoEntry::Single { frame_id, .. } => {
                let frame_id = frame_id.clone();
                let store = self.frames.get_mut(&frame_id);
                debug_assert!(store.is_some(), "single entry without snapshot store");
                let state = store.and_then(|s| match direction {
                    Direction::Undo => s.undo(),
                    Direction::Redo => s.redo(),
                });
                if state.is_some() {
                    port.activate_frame(&frame_id);
                }
                Ok(RestoreOutcome::Single { frame_id, state })
            }
            UndoEntry::Multi { operation } => {
                let description = operation.description.clone();
                // Undo walks the changes in reverse, redo forward, so a
                // frame touched twice lands on the right state.
                let states: Vec<FrameState> = match direction {
                    Direction::Undo => operation
                        .changes()
                        .iter()
                        .rev()
                        .map(|c| c.before.clone())
                        .collect(),
                    Direction::Redo => {
                        operation.changes().iter().map(|c| c.after.clone()).collect()
                    }
                };
                for state in &states {
                    port.save_shapes(&state.frame_id, &to_records(&state.shapes))?;
                    port.activate_frame(&state.frame_id);
                }
                Ok(RestoreOutcome::Multi {
                    description,
                    restored: states,
                })
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Undo,
    Redo,
}
