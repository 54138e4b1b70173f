// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ROIDS core - cross-frame annotation history and IOU tracking.
//!
//! The engine room of a frame-sequence annotation tool: a unified,
//! bounded undo/redo history mixing single-frame edits with multi-frame
//! batch operations, and an IOU-based optimal-assignment matcher that
//! powers label propagation, bounding-box duplication and continuous
//! tracking.
//!
//! The GUI, format readers/writers and file scanning live in the host
//! application; it talks to this crate through the
//! [`AnnotationPort`](io::AnnotationPort) trait and the
//! [`OperationLog`](history::OperationLog).

pub mod engine;
pub mod error;
pub mod history;
pub mod io;
pub mod models;
pub mod track;
pub mod util;

pub use engine::{DuplicationEngine, PropagationEngine, TrackingEngine};
pub use error::{Error, Result};
pub use history::{MultiFrameOperation, OperationKind, OperationLog, RestoreOutcome};
pub use io::AnnotationPort;
pub use models::{FrameState, Point, Shape, ShapeRecord};
pub use track::{Matcher, Tracker};
pub use util::CancelToken;
