// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error taxonomy for the annotation core.
//!
//! Geometry failures on malformed shapes are treated as "no match" by the
//! matcher rather than surfaced; undo/redo exhaustion is a user-facing
//! no-op; I/O failures abort the in-progress multi-frame step while keeping
//! frames already committed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A bounding box was requested for a shape with fewer than 2 points.
    #[error("shape needs at least 2 points for a bounding box, got {count}")]
    InsufficientPoints { count: usize },

    /// The history cursor is at its oldest reachable state.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The history cursor is at its newest state.
    #[error("nothing to redo")]
    NothingToRedo,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported annotation format: {extension}")]
    UnsupportedFormat { extension: String },
}

pub type Result<T> = std::result::Result<T, Error>;
