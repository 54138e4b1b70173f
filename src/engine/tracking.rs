// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Continuous tracking sweep over a frame range.
//!
//! Runs the tracker frame by frame so labels and identities flow forward
//! through the whole range, persisting each frame whose annotation
//! changed and recording the sweep as one multi-frame operation.

use crate::error::Error;
use crate::history::{MultiFrameOperation, OperationKind, OperationLog};
use crate::io::AnnotationPort;
use crate::models::{from_records, to_records, FrameState, Shape};
use crate::track::Tracker;
use crate::util::CancelToken;

#[derive(Debug, Default)]
pub struct TrackingReport {
    /// Frames the sweep committed (saved, or visited with nothing to save).
    pub frames_tracked: usize,
    /// Shapes that inherited an identity from the previous frame.
    pub shapes_matched: usize,
    pub cancelled: bool,
    /// Set when persisting a frame failed; earlier frames are kept.
    pub error: Option<Error>,
}

/// Continuous tracking engine.
pub struct TrackingEngine<'a, P: AnnotationPort> {
    port: &'a mut P,
    tracker: Tracker,
}

impl<'a, P: AnnotationPort> TrackingEngine<'a, P> {
    pub fn new(port: &'a mut P, tracker: Tracker) -> Self {
        Self { port, tracker }
    }

    /// Track identities forward from `frames[start]` to the end of the
    /// range, committing label inheritance to `log` as one operation.
    ///
    /// Stops at the first frame without an annotation. Not reentrant;
    /// callers serialize multi-frame operations.
    pub fn track_range(
        &mut self,
        log: &mut OperationLog,
        frames: &[String],
        start: usize,
        cancel: &CancelToken,
    ) -> TrackingReport {
        log::info!("tracking sweep from frame {start}");
        let mut report = TrackingReport::default();
        let mut operation =
            MultiFrameOperation::new(OperationKind::ContinuousTracking, "Continuous tracking");
        let mut prev: Vec<Shape> = Vec::new();

        for frame_id in frames.iter().skip(start) {
            if cancel.is_cancelled() {
                log::info!("tracking cancelled at {frame_id}");
                report.cancelled = true;
                break;
            }

            let Some(records) = self.port.load_shapes(frame_id) else {
                log::debug!("no annotation at {frame_id}, stopping sweep");
                break;
            };
            let mut shapes = from_records(&records);
            let before = FrameState::new(frame_id.clone(), shapes.clone());

            report.shapes_matched += self.tracker.track(&prev, &mut shapes);

            let after = FrameState::new(frame_id.clone(), shapes.clone());
            if after != before {
                if let Err(e) = self.port.save_shapes(frame_id, &to_records(&shapes)) {
                    log::warn!("failed to save {frame_id}: {e}");
                    report.error = Some(e);
                    break;
                }
                operation.record(before, after);
            }
            report.frames_tracked += 1;
            prev = shapes;
        }

        log.record_multi(operation);
        log::info!(
            "tracked {} frames, {} shapes matched",
            report.frames_tracked,
            report.shapes_matched
        );
        report
    }
}
