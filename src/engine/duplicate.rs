// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bounding-box duplication into subsequent frames.
//!
//! Copies a source shape into the next N frames. Existing rectangles that
//! overlap the copy beyond the threshold are either overwritten or, in
//! skip mode, cause the whole frame to be left alone. Every frame whose
//! state actually changed is recorded into one multi-frame operation.

use crate::error::Error;
use crate::history::{MultiFrameOperation, OperationKind, OperationLog};
use crate::io::AnnotationPort;
use crate::models::{from_records, to_records, FrameState, Shape};
use crate::util::geometry;
use crate::util::CancelToken;

/// Default minimum IOU for an existing box to count as a conflict.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.5;

#[derive(Debug, Default)]
pub struct DuplicationReport {
    /// Frames the shape was copied into.
    pub frames_duplicated: usize,
    /// Frames left alone because of an overlap in skip mode.
    pub frames_skipped: usize,
    pub cancelled: bool,
    /// Set when persisting a frame failed; earlier frames are kept.
    pub error: Option<Error>,
}

/// Duplicates a shape across frames, resolving overlap conflicts.
pub struct DuplicationEngine<'a, P: AnnotationPort> {
    port: &'a mut P,
    overlap_threshold: f64,
}

impl<'a, P: AnnotationPort> DuplicationEngine<'a, P> {
    pub fn new(port: &'a mut P, overlap_threshold: f64) -> Self {
        Self {
            port,
            overlap_threshold,
        }
    }

    /// Copy `source` (on `frames[start]`) into the next `count` frames and
    /// commit the result to `log` as one operation.
    ///
    /// `overwrite` selects conflict handling: replace overlapping boxes,
    /// or skip the frame entirely. Not reentrant; callers serialize
    /// multi-frame operations.
    pub fn duplicate(
        &mut self,
        log: &mut OperationLog,
        frames: &[String],
        start: usize,
        count: usize,
        source: &Shape,
        overwrite: bool,
        cancel: &CancelToken,
    ) -> DuplicationReport {
        let mut report = DuplicationReport::default();

        let Ok(source_box) = geometry::bbox(&source.points) else {
            log::warn!("duplication source has no bounding box");
            return report;
        };

        log::info!(
            "duplicating '{}' into {} frames from {} (overwrite: {})",
            source.label,
            count,
            start,
            overwrite
        );
        let mut operation = MultiFrameOperation::new(
            OperationKind::BbDuplication,
            format!("Duplicate '{}' into {count} frames", source.label),
        );

        for frame_id in frames.iter().skip(start + 1).take(count) {
            if cancel.is_cancelled() {
                log::info!("duplication cancelled at {frame_id}");
                report.cancelled = true;
                break;
            }

            // A frame with no annotation file is an empty frame; the copy
            // creates its annotation.
            let mut shapes = self
                .port
                .load_shapes(frame_id)
                .map(|records| from_records(&records))
                .unwrap_or_default();
            let before = FrameState::new(frame_id.clone(), shapes.clone());

            let mut conflicts = Vec::new();
            let mut skip_frame = false;
            for (idx, existing) in shapes.iter().enumerate() {
                if !existing.is_rect() {
                    continue;
                }
                let Ok(existing_box) = geometry::bbox(&existing.points) else {
                    continue;
                };
                let iou = geometry::iou(&source_box, &existing_box);
                if iou < self.overlap_threshold {
                    continue;
                }
                if overwrite {
                    log::debug!("{frame_id}: overwriting box (iou {iou:.2})");
                    conflicts.push(idx);
                } else {
                    // One qualifying overlap is enough to skip the frame.
                    log::debug!("{frame_id}: skipping due to overlap (iou {iou:.2})");
                    skip_frame = true;
                    break;
                }
            }

            if skip_frame {
                report.frames_skipped += 1;
                continue;
            }

            for idx in conflicts.into_iter().rev() {
                shapes.remove(idx);
            }
            let mut copy = source.clone();
            copy.track_id = None;
            shapes.push(copy);

            // Overwriting a conflict with an identical copy can leave the
            // frame as it was; such frames are neither saved nor recorded.
            let after = FrameState::new(frame_id.clone(), shapes.clone());
            if after == before {
                log::debug!("{frame_id}: duplicate leaves frame unchanged");
                continue;
            }

            if let Err(e) = self.port.save_shapes(frame_id, &to_records(&shapes)) {
                log::warn!("failed to save {frame_id}: {e}");
                report.error = Some(e);
                break;
            }
            operation.record(before, after);
            report.frames_duplicated += 1;
        }

        log.record_multi(operation);
        log::info!(
            "duplicated into {} frames, skipped {}",
            report.frames_duplicated,
            report.frames_skipped
        );
        report
    }
}
