// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: shapes, points and per-frame state.

pub mod frame;
pub mod shape;

pub use frame::FrameState;
pub use shape::{from_records, to_records, Point, Shape, ShapeRecord};
