// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape matching and tracking.

pub mod hungarian;
pub mod matcher;
pub mod tracker;

pub use matcher::{MatchPair, Matcher, DEFAULT_IOU_THRESHOLD};
pub use tracker::Tracker;
