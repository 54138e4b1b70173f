// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-frame mutation engines.
//!
//! Each engine walks forward through a frame sequence, mutates frames
//! through the annotation port, and commits the whole walk to the
//! operation log as a single undoable unit. The engines are synchronous
//! and not reentrant: callers run one multi-frame operation at a time,
//! cancelling cooperatively via a [`CancelToken`](crate::util::CancelToken).

pub mod duplicate;
pub mod propagate;
pub mod tracking;

pub use duplicate::{DuplicationEngine, DuplicationReport, DEFAULT_OVERLAP_THRESHOLD};
pub use propagate::{LabelField, PropagationEngine, PropagationReport, StopReason};
pub use tracking::{TrackingEngine, TrackingReport};
