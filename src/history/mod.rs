// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history: per-frame snapshot stores and the unified
//! chronological operation log.

pub mod log;
pub mod operation;
pub mod snapshot;

pub use self::log::{HistoryMode, OperationLog, RestoreOutcome, UndoEntry, DEFAULT_MAX_ENTRIES};
pub use operation::{FrameChange, MultiFrameOperation, OperationKind};
pub use snapshot::{SnapshotStore, DEFAULT_MAX_SNAPSHOTS};
