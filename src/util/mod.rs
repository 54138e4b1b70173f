// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared utilities: geometry and cancellation.

pub mod cancel;
pub mod geometry;

pub use cancel::CancelToken;
pub use geometry::{bbox, iou, BoundingBox};
